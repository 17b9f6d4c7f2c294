use std::sync::Arc;
use std::time::Duration;

use crate::action::Actions;
use crate::cancel::CancellationToken;
use crate::capture::Focus;
use crate::clock::Clock;
use crate::config::KeyBindings;
use crate::input::Input;
use crate::perception::Perceive;
use crate::{Error, Result};

/// Everything a run talks to outside the process.
#[derive(Clone)]
pub struct Devices {
	pub input: Arc<dyn Input>,
	pub clock: Arc<dyn Clock>,
	pub eyes: Arc<dyn Perceive>,
	pub window: Arc<dyn Focus>,
}

/// One training run's view of the world: devices, key bindings and the
/// stop flag.
pub struct Session {
	devices: Devices,
	keys: KeyBindings,
	cancel: CancellationToken,
}

impl Session {
	pub fn new(devices: Devices, keys: KeyBindings, cancel: CancellationToken) -> Self {
		Self { devices, keys, cancel }
	}

	pub fn actions(&self) -> Actions<'_> {
		Actions::new(self.devices.input.as_ref(), self.devices.clock.as_ref())
			.with_focus(self.devices.window.as_ref())
	}

	pub fn eyes(&self) -> &dyn Perceive {
		self.devices.eyes.as_ref()
	}

	pub fn clock(&self) -> &dyn Clock {
		self.devices.clock.as_ref()
	}

	pub fn keys(&self) -> &KeyBindings {
		&self.keys
	}

	pub fn cancel_token(&self) -> &CancellationToken {
		&self.cancel
	}

	/// Checkpoint: has a stop been requested?
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	pub fn pause(&self, duration: Duration) {
		self.devices.clock.sleep(duration);
	}

	/// Bring the game window forward; a run cannot start without it.
	pub fn focus(&self) -> Result<()> {
		if self.devices.window.focus() {
			Ok(())
		} else {
			Err(Error::InputFailure("failed to focus the game window".into()))
		}
	}
}
