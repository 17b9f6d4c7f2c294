use crate::Result;
use crate::config::Config;
use crate::session::Session;

use super::{CastAndRest, Completion};

pub const FAVORITE: &str = "muffle";

/// Cast Muffle, rest an hour for magicka, repeat.
pub fn run(session: &Session, config: &Config) -> Result<Completion> {
	let settings = &config.illusion;
	tracing::info!(repeat = settings.repeat, hand = %settings.hand, bed = settings.bed, "illusion training");
	CastAndRest {
		favorite: FAVORITE,
		hand: settings.hand,
		repeat: settings.repeat,
		bed: settings.bed,
	}
	.run(session)
}
