//! The training loops.
//!
//! Each training focuses the game, equips its favorite and then loops until
//! it is done, stopped or fails. Stops are honoured between actions only: an
//! in-flight hold always completes.

use ie::HandState;

use crate::action::secs;
use crate::session::Session;
use crate::{Result, equip, game};

pub mod armor;
pub mod conjuration;
pub mod illusion;

/// How a run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
	Finished,
	/// A stop was requested before the work was done.
	Stopped,
}

impl std::fmt::Display for Completion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Completion::Finished => write!(f, "finished"),
			Completion::Stopped => write!(f, "stopped"),
		}
	}
}

/// Cast-then-rest cycle shared by the magicka trainings.
pub(crate) struct CastAndRest<'a> {
	pub favorite: &'a str,
	pub hand: HandState,
	pub repeat: u32,
	pub bed: bool,
}

impl CastAndRest<'_> {
	pub(crate) fn run(&self, session: &Session) -> Result<Completion> {
		session.focus()?;
		equip::equip_favorite(session, self.favorite, self.hand)?;

		for cycle in 1..=self.repeat {
			if session.is_cancelled() {
				tracing::info!(cycle, "stopping early");
				return Ok(Completion::Stopped);
			}
			tracing::info!(cycle, of = self.repeat, "cycle");

			session.actions().cast(self.hand, secs(1.0))?;
			session.pause(secs(1.0));

			if session.is_cancelled() {
				tracing::info!(cycle, "stopping before rest");
				return Ok(Completion::Stopped);
			}
			// One in-game hour refills magicka.
			game::rest(session, self.bed, 1, false)?;
			session.pause(secs(1.0));
		}
		Ok(Completion::Finished)
	}
}
