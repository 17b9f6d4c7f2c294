//! Dragonborn Leveler.
//!
//! This binary hosts the egui window and owns the training runner.

mod app;

use leveler::{Config, logging};

fn main() -> eframe::Result {
	// The log level lives in the config, so read it before logging exists and
	// report any problem once the subscriber is up.
	let loaded = Config::try_load().and_then(|config| config.validate().map(|_| config));
	let level = loaded.as_ref().map(|config| config.log_level).unwrap_or_default();
	let logs = logging::init(level);
	let config = loaded.unwrap_or_else(|err| {
		tracing::warn!(error = %format!("{err:#}"), "failed to load config; using defaults");
		Config::default()
	});

	let options = eframe::NativeOptions {
		viewport: egui::ViewportBuilder::default()
			.with_title("Dragonborn Leveler")
			.with_inner_size([560.0, 680.0]),
		..Default::default()
	};
	eframe::run_native(
		"Dragonborn Leveler",
		options,
		Box::new(move |cc| Ok(Box::new(app::Leveler::new(cc, config, logs)))),
	)
}
