//! Finding a named entry in the favorites list.
//!
//! The list can only be read one entry at a time (the highlighted caption)
//! and moved one step at a time. The scan goes up until the caption stops
//! changing (the top), jumps back past its starting point and then goes
//! down until the caption stops changing again (the bottom).

use crate::action::secs;
use crate::game;
use crate::session::Session;
use crate::{Error, Result};

/// Navigation steps a scan may take before giving up. Rewind steps are free.
pub const MAX_SCAN_STEPS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Up,
	Down,
}

/// What the scan wants done after a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	Found,
	Move(Direction),
	/// The top was hit: go back down `steps` entries, then scan downwards.
	Rewind { steps: u32 },
	NotFound,
}

#[derive(Debug)]
pub struct ScanState {
	previous_text: Option<String>,
	steps_taken: u32,
	direction: Direction,
	wrapped: bool,
}

impl Default for ScanState {
	fn default() -> Self {
		Self {
			previous_text: None,
			steps_taken: 0,
			direction: Direction::Up,
			wrapped: false,
		}
	}
}

impl ScanState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn steps_taken(&self) -> u32 {
		self.steps_taken
	}

	pub fn direction(&self) -> Direction {
		self.direction
	}

	pub fn wrapped(&self) -> bool {
		self.wrapped
	}

	/// Feed one caption sample. `target` must already be normalized.
	pub fn observe(&mut self, text: &str, target: &str) -> Result<Step> {
		let text = text.trim().to_lowercase();
		if text.is_empty() {
			return Err(Error::PerceptionFailure("favorites caption is empty".into()));
		}
		if text.contains(target) {
			return Ok(Step::Found);
		}

		// Same caption twice in a row: the cursor hit an end of the list.
		if self.previous_text.as_deref() == Some(text.as_str()) {
			if self.wrapped {
				return Ok(Step::NotFound);
			}
			self.wrapped = true;
			self.direction = Direction::Down;
			return Ok(Step::Rewind { steps: self.steps_taken });
		}

		self.previous_text = Some(text);
		self.steps_taken += 1;
		Ok(Step::Move(self.direction))
	}
}

/// Lowercase, with underscores read as spaces ("soul_trap" names "soul trap").
pub fn normalize_target(name: &str) -> String {
	name.trim().replace('_', " ").to_lowercase()
}

/// Move the favorites cursor onto `name`. The favorites menu must be open.
///
/// Returns the number of navigation steps it took.
pub fn locate(session: &Session, name: &str) -> Result<u32> {
	let target = normalize_target(name);
	let keys = session.keys();
	let actions = session.actions();
	let not_found = |steps| Error::NotFound {
		name: target.clone(),
		steps,
	};

	let mut scan = ScanState::new();
	loop {
		if scan.steps_taken() >= MAX_SCAN_STEPS {
			tracing::warn!(favorite = %target, steps = scan.steps_taken(), "scan cap reached");
			return Err(not_found(scan.steps_taken()));
		}

		let text = session.eyes().favorite_text()?;
		let step = scan.observe(&text, &target)?;
		tracing::debug!(caption = %text, ?step, steps = scan.steps_taken(), "favorites scan");

		match step {
			Step::Found => {
				tracing::info!(favorite = %target, steps = scan.steps_taken(), "favorite located");
				return Ok(scan.steps_taken());
			}
			Step::Move(Direction::Up) => actions.tap(keys.scroll_up, secs(0.2))?,
			Step::Move(Direction::Down) => actions.tap(keys.scroll_down, secs(0.2))?,
			Step::Rewind { steps } => {
				tracing::debug!(steps, "top of favorites reached, rewinding");
				for _ in 0..steps {
					actions.tap(keys.scroll_down, secs(0.2))?;
				}
			}
			Step::NotFound => return Err(not_found(scan.steps_taken())),
		}
	}
}

/// Run `f` with the favorites menu open, closing it again whatever `f` returns.
pub fn with_favorites<T>(session: &Session, f: impl FnOnce(&Session) -> Result<T>) -> Result<T> {
	game::close_menu_if_open(session)?;
	game::open_favorites(session)?;
	let result = f(session);
	let closed = game::close_favorites(session);
	let value = result?;
	closed?;
	Ok(value)
}

/// Open favorites, select `name`, close favorites.
pub fn find_favorite(session: &Session, name: &str) -> Result<u32> {
	with_favorites(session, |session| locate(session, name))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::input::Key;
	use crate::testing::World;

	const SPELLS: [&str; 6] = ["flames", "healing", "muffle", "oakflesh", "soul trap", "sparks"];

	fn open_list(cursor: usize) -> std::sync::Arc<World> {
		let world = World::new().with_favorites(&SPELLS, cursor);
		game::open_favorites(&world.session()).unwrap();
		world.clear_events();
		world
	}

	#[test]
	fn target_above_is_found_scanning_up() {
		let world = open_list(4);
		let steps = locate(&world.session(), "muffle").unwrap();
		assert_eq!(steps, 2);
		assert_eq!(world.cursor(), 2);
		assert_eq!(world.key_presses(Key::Char('s')), 0);
	}

	#[test]
	fn target_below_is_found_after_the_wrap() {
		let world = open_list(1);
		locate(&world.session(), "soul_trap").unwrap();
		assert_eq!(world.cursor(), 4);
		assert!(world.key_presses(Key::Char('s')) > 0);
	}

	#[test]
	fn found_within_list_length() {
		for start in 0..SPELLS.len() {
			for target in SPELLS {
				let world = open_list(start);
				let steps = locate(&world.session(), target).unwrap();
				assert!(steps as usize <= SPELLS.len(), "{target} from {start} took {steps}");
				assert_eq!(world.session().eyes().favorite_text().unwrap(), target);
			}
		}
	}

	#[test]
	fn absent_name_fails_after_both_ends() {
		let world = open_list(2);
		let err = locate(&world.session(), "fireball").unwrap_err();
		assert!(matches!(err, Error::NotFound { .. }));
		assert_eq!(world.cursor(), SPELLS.len() - 1);
	}

	#[test]
	fn long_list_stops_at_the_cap() {
		let names: Vec<String> = (0..40).map(|i| format!("scroll {i:02}")).collect();
		let names: Vec<&str> = names.iter().map(String::as_str).collect();
		let world = World::new().with_favorites(&names, 30);
		game::open_favorites(&world.session()).unwrap();
		world.clear_events();

		let err = locate(&world.session(), "fireball").unwrap_err();
		match err {
			Error::NotFound { steps, .. } => assert_eq!(steps, MAX_SCAN_STEPS),
			other => panic!("unexpected {other:?}"),
		}
		assert_eq!(world.key_presses(Key::Char('w')) as u32, MAX_SCAN_STEPS);
	}

	#[test]
	fn blank_caption_is_a_perception_failure() {
		let world = open_list(0);
		world.blank_caption();
		let err = locate(&world.session(), "muffle").unwrap_err();
		assert!(matches!(err, Error::PerceptionFailure(_)));
		assert!(world.events().is_empty());
	}

	#[test]
	fn first_repeat_rewinds_second_gives_up() {
		let mut scan = ScanState::new();
		assert_eq!(scan.observe("b", "x").unwrap(), Step::Move(Direction::Up));
		assert_eq!(scan.observe("a", "x").unwrap(), Step::Move(Direction::Up));
		assert_eq!(scan.observe("a", "x").unwrap(), Step::Rewind { steps: 2 });
		assert!(scan.wrapped());
		assert_eq!(scan.direction(), Direction::Down);
		assert_eq!(scan.observe("c", "x").unwrap(), Step::Move(Direction::Down));
		assert_eq!(scan.observe("c", "x").unwrap(), Step::NotFound);
	}

	#[test]
	fn match_is_a_case_insensitive_substring() {
		let mut scan = ScanState::new();
		assert_eq!(scan.observe("Soul Trap (1)\n", "soul trap").unwrap(), Step::Found);
	}

	#[test]
	fn favorites_close_even_when_the_scan_fails() {
		let world = World::new().with_favorites(&SPELLS, 0);
		assert!(find_favorite(&world.session(), "fireball").is_err());
		assert!(!world.favorites_are_open());
	}

	#[test]
	fn underscores_read_as_spaces() {
		assert_eq!(normalize_target(" Soul_Trap "), "soul trap");
	}
}
