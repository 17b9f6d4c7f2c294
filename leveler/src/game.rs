//! Composite key sequences of the game's menus.

use crate::Result;
use crate::action::secs;
use crate::session::Session;

/// Open the favorites menu and let it draw.
pub fn open_favorites(session: &Session) -> Result<()> {
	tracing::debug!("opening favorites");
	session.actions().tap(session.keys().favorites, secs(1.0))
}

pub fn close_favorites(session: &Session) -> Result<()> {
	tracing::debug!("closing favorites");
	session.actions().tap(session.keys().favorites, secs(1.0))
}

/// Escape out of whatever menu may be open.
///
/// Escape toggles the system menu, so one press either closes a menu or
/// opens the system menu; a second press is sent only if a menu is showing.
pub fn close_menu_if_open(session: &Session) -> Result<()> {
	let menu = session.keys().menu;
	session.actions().tap(menu, secs(1.0))?;
	if session.eyes().menu_open()? {
		tracing::debug!("menu still open, escaping again");
		session.actions().tap(menu, secs(1.0))?;
	}
	Ok(())
}

/// Pass `hours` in game, by sleeping in the targeted bed or by waiting.
pub fn rest(session: &Session, bed: bool, hours: u32, check_menu: bool) -> Result<()> {
	if check_menu {
		close_menu_if_open(session)?;
	}

	let keys = session.keys();
	let actions = session.actions();
	actions.tap(if bed { keys.activate } else { keys.wait }, secs(1.0))?;
	// The dialog opens at one hour.
	for _ in 1..hours.max(1) {
		actions.tap(keys.more_hours, secs(0.2))?;
	}
	actions.tap(keys.confirm, secs(2.0))?;
	tracing::debug!(bed, hours, "rested");
	Ok(())
}

pub fn quicksave(session: &Session) -> Result<()> {
	tracing::info!("quicksaving");
	session.actions().tap(session.keys().quicksave, secs(2.0))
}

pub fn open_menu(session: &Session) -> Result<()> {
	session.actions().tap(session.keys().menu, secs(1.0))
}

/// Leave the game saved and paused. Runs after every training.
pub fn cleanup(session: &Session) -> Result<()> {
	quicksave(session)?;
	open_menu(session)
}
