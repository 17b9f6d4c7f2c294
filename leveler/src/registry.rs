//! The trainings the host can start.

use crate::config::Config;
use crate::session::Session;
use crate::training::{self, Completion};

pub type Entry = fn(&Session, &Config) -> crate::Result<Completion>;

pub struct Training {
	pub id: &'static str,
	pub name: &'static str,
	pub summary: &'static str,
	pub run: Entry,
}

impl std::fmt::Debug for Training {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Training").field("id", &self.id).finish_non_exhaustive()
	}
}

pub static TRAININGS: &[Training] = &[
	Training {
		id: "train_illusion",
		name: "Train Illusion",
		summary: "Selects Muffle from your favorites (add it beforehand), casts it with the chosen hand and rests \
		          one hour to regain magicka. With \"bed\" enabled, aim at a bed before starting so the hour is slept \
		          instead of waited.",
		run: training::illusion::run,
	},
	Training {
		id: "train_conjuration",
		name: "Train Conjuration",
		summary: "Selects Soul Trap from your favorites (add it beforehand), casts it on the corpse you are aiming \
		          at and waits one hour to regain magicka.",
		run: training::conjuration::run,
	},
	Training {
		id: "train_armor",
		name: "Train Armor",
		summary: "Selects the configured healing spell from your favorites and heals whenever health runs low \
		          while you take hits. Start it in combat, wearing the armor type you want to level. Stops when \
		          the timer runs out, or when health gets critically low.",
		run: training::armor::run,
	},
];

pub fn find(id: &str) -> Option<&'static Training> {
	TRAININGS.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_are_unique() {
		let mut ids: Vec<_> = TRAININGS.iter().map(|t| t.id).collect();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), TRAININGS.len());
	}

	#[test]
	fn lookup_by_id() {
		assert_eq!(find("train_armor").map(|t| t.name), Some("Train Armor"));
		assert!(find("train_smithing").is_none());
	}
}
