use crate::Result;
use crate::config::Config;
use crate::session::Session;

use super::{CastAndRest, Completion};

pub const FAVORITE: &str = "soul trap";

/// Cast Soul Trap on the targeted corpse, wait an hour, repeat.
pub fn run(session: &Session, config: &Config) -> Result<Completion> {
	let settings = &config.conjuration;
	tracing::info!(repeat = settings.repeat, hand = %settings.hand, "conjuration training");
	CastAndRest {
		favorite: FAVORITE,
		hand: settings.hand,
		repeat: settings.repeat,
		bed: false,
	}
	.run(session)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Error;
	use crate::input::{Button, Key};
	use crate::testing::World;

	#[test]
	fn waits_between_casts() {
		let world = World::new().with_favorites(&["soul trap"], 0);
		let mut config = Config::default();
		config.conjuration.repeat = 4;

		assert_eq!(run(&world.session(), &config).unwrap(), Completion::Finished);
		// One equip click, then one cast per cycle.
		assert_eq!(world.button_presses(), vec![Button::Right; 5]);
		assert_eq!(world.key_presses(Key::Char('t')), 4);
	}

	#[test]
	fn missing_spell_fails_the_run() {
		let world = World::new().with_favorites(&["flames", "muffle"], 1);
		let err = run(&world.session(), &Config::default()).unwrap_err();
		assert!(matches!(err, Error::NotFound { .. }));
		assert!(world.button_presses().is_empty());
	}
}
