use std::sync::Arc;
use std::time::Duration;

use ie::{DebugSink, HandState};
use leveler::capture::{Focus, GameWindow};
use leveler::clock::SystemClock;
use leveler::config::{Config, HealingSpell};
use leveler::input::SystemInput;
use leveler::logging::LogBuffer;
use leveler::perception::ScreenEyes;
use leveler::registry::{self, Training};
use leveler::runner::{RunHandle, Runner};
use leveler::session::Devices;
use leveler::assets;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tab {
	Home,
	Settings,
}

pub struct Leveler {
	config: Config,
	logs: LogBuffer,
	/// `Err` holds the start-up failure shown instead of the trainings.
	runner: Result<Runner, String>,
	run: Option<RunHandle>,
	/// Why the last Start was refused.
	notice: Option<String>,
	tab: Tab,
}

/// Wire the screen, the input injector and the image engine together.
fn devices(config: &Config) -> anyhow::Result<Devices> {
	let assets = assets::resolve()?;
	let icons = ie::EquipIcons::load(&assets.icons)?;
	let debug = match Config::debug_dir() {
		Some(dir) if config.debug => DebugSink::to_dir(dir),
		_ => DebugSink::disabled(),
	};
	let engine = ie::Ie::try_new(&assets.detection, &assets.recognition, &assets.charset, icons, debug)?;

	let window: Arc<dyn Focus> = Arc::new(GameWindow::new(config.window_name.clone()));
	let eyes = ScreenEyes::new(
		config.window_name.clone(),
		config.regions.clone(),
		window.clone(),
		Arc::new(engine),
	);
	Ok(Devices {
		input: Arc::new(SystemInput),
		clock: Arc::new(SystemClock::new()),
		eyes: Arc::new(eyes),
		window,
	})
}

impl Leveler {
	pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, logs: LogBuffer) -> Self {
		let runner = devices(&config).map(Runner::new).map_err(|err| {
			tracing::error!(error = %format!("{err:#}"), "start-up failed");
			format!("{err:#}")
		});

		Self {
			config,
			logs,
			runner,
			run: None,
			notice: None,
			tab: Tab::Home,
		}
	}

	fn start(&mut self, training: &'static Training) {
		let Ok(runner) = &self.runner else { return };
		match runner.start(training, self.config.clone()) {
			Ok(handle) => {
				self.run = Some(handle);
				self.notice = None;
			}
			Err(err) => {
				tracing::warn!(error = %format!("{err:#}"), id = training.id, "could not start training");
				self.notice = Some(format!("{err:#}"));
			}
		}
	}

	fn ui_home(&mut self, ui: &mut egui::Ui) {
		if let Err(err) = &self.runner {
			ui.group(|ui| {
				ui.label(egui::RichText::new("Trainings are unavailable").strong());
				ui.add_space(4.0);
				ui.small(err);
			});
			ui.add_space(6.0);
		}
		if let Some(notice) = &self.notice {
			ui.colored_label(egui::Color32::YELLOW, notice);
			ui.add_space(6.0);
		}

		let running = self.run.as_ref().map(|run| (run.id(), run.is_stopping()));
		let can_start = self.runner.is_ok() && running.is_none();

		let mut clicked = None;
		for training in registry::TRAININGS {
			ui.group(|ui| {
				ui.horizontal(|ui| {
					ui.label(egui::RichText::new(training.name).strong());
					ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
						match running {
							Some((id, stopping)) if id == training.id => {
								if ui.add_enabled(!stopping, egui::Button::new("Stop")).clicked()
									&& let Some(run) = &self.run
								{
									run.stop();
								}
								ui.spinner();
							}
							_ => {
								if ui.add_enabled(can_start, egui::Button::new("Start")).clicked() {
									clicked = Some(training);
								}
							}
						}
					});
				});
				ui.small(training.summary);
			});
		}
		if let Some(training) = clicked {
			self.start(training);
		}

		ui.separator();
		ui.label("Log");
		egui::ScrollArea::vertical()
			.stick_to_bottom(true)
			.auto_shrink([false, false])
			.show(ui, |ui| {
				for line in self.logs.lines() {
					ui.monospace(line);
				}
			});
	}

	fn ui_settings(&mut self, ui: &mut egui::Ui) {
		let mut changed = false;
		let config = &mut self.config;

		ui.label(egui::RichText::new("Illusion").strong());
		changed |= ui.add(egui::DragValue::new(&mut config.illusion.repeat).range(1..=1000).prefix("repeat ")).changed();
		changed |= hand_combo(ui, "illusion_hand", &mut config.illusion.hand);
		changed |= ui.checkbox(&mut config.illusion.bed, "Sleep in the targeted bed").changed();

		ui.separator();
		ui.label(egui::RichText::new("Conjuration").strong());
		changed |= ui.add(egui::DragValue::new(&mut config.conjuration.repeat).range(1..=1000).prefix("repeat ")).changed();
		changed |= hand_combo(ui, "conjuration_hand", &mut config.conjuration.hand);

		ui.separator();
		ui.label(egui::RichText::new("Armor").strong());
		changed |= ui.add(egui::DragValue::new(&mut config.armor.minutes).range(1..=600).suffix(" min")).changed();
		egui::ComboBox::from_id_salt("healing_spell")
			.selected_text(config.armor.healing_spell.favorite_name())
			.show_ui(ui, |ui| {
				for spell in HealingSpell::ALL {
					changed |= ui
						.selectable_value(&mut config.armor.healing_spell, spell, spell.favorite_name())
						.changed();
				}
			});
		changed |= hand_combo(ui, "armor_hand", &mut config.armor.hand);
		changed |= ui.add(egui::Slider::new(&mut config.armor.start_healing, 1.0..=100.0).text("start healing below %")).changed();
		changed |= ui.add(egui::Slider::new(&mut config.armor.stop_healing, 1.0..=100.0).text("stop healing at %")).changed();
		changed |= ui.add(egui::Slider::new(&mut config.armor.abort_floor, 0.0..=100.0).text("abort below %")).changed();

		ui.separator();
		ui.label(egui::RichText::new("General (applies after restart)").strong());
		ui.horizontal(|ui| {
			ui.label("Game window");
			changed |= ui.text_edit_singleline(&mut config.window_name).changed();
		});
		changed |= ui.checkbox(&mut config.debug, "Save debug images").changed();

		if changed {
			match config.validate().and_then(|_| config.save()) {
				Ok(()) => tracing::debug!("config saved"),
				Err(err) => tracing::warn!(error = %format!("{err:#}"), "config not saved"),
			}
		}
	}
}

fn hand_combo(ui: &mut egui::Ui, id: &str, hand: &mut HandState) -> bool {
	let mut changed = false;
	egui::ComboBox::from_id_salt(id)
		.selected_text(format!("{hand} hand"))
		.show_ui(ui, |ui| {
			for option in [HandState::Left, HandState::Right, HandState::Both] {
				changed |= ui.selectable_value(hand, option, option.to_string()).changed();
			}
		});
	changed
}

impl eframe::App for Leveler {
	fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
		if let Some(run) = &mut self.run
			&& run.poll()
		{
			self.run = None;
		}

		egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
			ui.horizontal(|ui| {
				ui.selectable_value(&mut self.tab, Tab::Home, "Trainings");
				ui.selectable_value(&mut self.tab, Tab::Settings, "Settings");
			});
		});

		egui::CentralPanel::default().show(ctx, |ui| match self.tab {
			Tab::Home => self.ui_home(ui),
			Tab::Settings => self.ui_settings(ui),
		});

		// Log lines and the completion notification arrive from other threads.
		ctx.request_repaint_after(Duration::from_millis(250));
	}
}
