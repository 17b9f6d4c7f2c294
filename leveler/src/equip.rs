//! Putting a favorite into the casting hand(s).

use ie::HandState;

use crate::Result;
use crate::action::secs;
use crate::locator;
use crate::session::Session;

/// What to click, given the desired and the observed hand state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipAction {
	/// Already held where it is needed.
	Nothing,
	/// Click the favorite with this hand (`Both` clicks both buttons together).
	Click(HandState),
	/// Held in the opposite hand only. A click would equip it twice over
	/// (dual wield) rather than move it, so nothing is sent.
	Unsupported,
}

pub fn plan(desired: HandState, current: HandState) -> EquipAction {
	use HandState::*;

	match (desired, current) {
		(None, _) => EquipAction::Nothing,
		(Left, Left | Both) | (Right, Right | Both) | (Both, Both) => EquipAction::Nothing,
		(Left, None) => EquipAction::Click(Left),
		(Right, None) => EquipAction::Click(Right),
		(Both, None) => EquipAction::Click(Both),
		(Both, Left) => EquipAction::Click(Right),
		(Both, Right) => EquipAction::Click(Left),
		(Left, Right) | (Right, Left) => EquipAction::Unsupported,
	}
}

/// Select `name` in favorites and equip it to `hand`.
///
/// Returns the hand state observed before any click. The favorites menu is
/// closed again on every path.
pub fn equip_favorite(session: &Session, name: &str, hand: HandState) -> Result<HandState> {
	locator::with_favorites(session, |session| {
		locator::locate(session, name)?;
		session.pause(secs(1.0));

		let current = session.eyes().hand_state()?;
		match plan(hand, current) {
			EquipAction::Nothing => {
				tracing::info!(favorite = name, %current, "already equipped");
			}
			EquipAction::Click(click) => {
				tracing::info!(favorite = name, %current, %click, "equipping");
				session.actions().click(click)?;
				session.pause(secs(1.0));
			}
			EquipAction::Unsupported => {
				tracing::warn!(favorite = name, %current, desired = %hand, "held in the other hand, leaving as is");
			}
		}
		Ok(current)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::input::Button;
	use crate::testing::World;

	#[test]
	fn decision_table() {
		use HandState::*;

		let expected = [
			(None, [EquipAction::Nothing; 4]),
			(
				Left,
				[EquipAction::Click(Left), EquipAction::Nothing, EquipAction::Unsupported, EquipAction::Nothing],
			),
			(
				Right,
				[EquipAction::Click(Right), EquipAction::Unsupported, EquipAction::Nothing, EquipAction::Nothing],
			),
			(
				Both,
				[EquipAction::Click(Both), EquipAction::Click(Right), EquipAction::Click(Left), EquipAction::Nothing],
			),
		];
		for (desired, row) in expected {
			for (current, action) in HandState::ALL.into_iter().zip(row) {
				assert_eq!(plan(desired, current), action, "desired {desired}, current {current}");
			}
		}
	}

	#[test]
	fn every_cell_clicks_only_what_the_table_says() {
		for desired in HandState::ALL {
			for current in HandState::ALL {
				let world = World::new().with_favorites(&["flames", "muffle"], 1);
				world.set_hand("muffle", current);
				let seen = equip_favorite(&world.session(), "muffle", desired).unwrap();
				assert_eq!(seen, current);

				let presses = world.button_presses();
				let expected: Vec<Button> = match plan(desired, current) {
					EquipAction::Nothing | EquipAction::Unsupported => vec![],
					EquipAction::Click(HandState::Left) => vec![Button::Left],
					EquipAction::Click(HandState::Right) => vec![Button::Right],
					EquipAction::Click(_) => vec![Button::Left, Button::Right],
				};
				assert_eq!(presses, expected, "desired {desired}, current {current}");
			}
		}
	}

	#[test]
	fn clicks_reach_the_requested_hands() {
		let world = World::new().with_favorites(&["flames", "muffle"], 0);
		equip_favorite(&world.session(), "muffle", HandState::Both).unwrap();
		assert_eq!(world.hand_of("muffle"), HandState::Both);
		assert_eq!(world.hand_of("flames"), HandState::None);
		assert!(!world.favorites_are_open());
	}

	#[test]
	fn missing_favorite_clicks_nothing_and_closes_the_menu() {
		let world = World::new().with_favorites(&["flames"], 0);
		assert!(equip_favorite(&world.session(), "muffle", HandState::Right).is_err());
		assert!(world.button_presses().is_empty());
		assert!(!world.favorites_are_open());
	}
}
