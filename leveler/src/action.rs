//! Timed input primitives.
//!
//! Every call blocks for its full duration: the game samples input state
//! continuously, so how long a button stays down is the signal.

use std::time::Duration;

use ie::HandState;

use crate::capture::Focus;
use crate::clock::Clock;
use crate::input::{Button, Input, Key};
use crate::{Error, Result};

/// How long an equip click is held.
const CLICK: Duration = Duration::from_millis(100);

pub fn secs(s: f32) -> Duration {
	Duration::from_secs_f32(s.max(0.0))
}

#[derive(Clone, Copy)]
pub struct Actions<'a> {
	input: &'a dyn Input,
	clock: &'a dyn Clock,
	window: Option<&'a dyn Focus>,
}

impl<'a> Actions<'a> {
	pub fn new(input: &'a dyn Input, clock: &'a dyn Clock) -> Self {
		Self {
			input,
			clock,
			window: None,
		}
	}

	/// Re-request focus once when an event is not delivered, then retry it.
	pub fn with_focus(self, window: &'a dyn Focus) -> Self {
		Self {
			window: Some(window),
			..self
		}
	}

	fn deliver(&self, send: impl Fn(&dyn Input) -> Result<()>) -> Result<()> {
		match send(self.input) {
			Err(Error::InputFailure(reason)) => match self.window {
				Some(window) => {
					tracing::warn!(%reason, "input not delivered, refocusing");
					if !window.focus() {
						return Err(Error::InputFailure(reason));
					}
					send(self.input)
				}
				None => Err(Error::InputFailure(reason)),
			},
			other => other,
		}
	}

	fn key(&self, key: Key, down: bool) -> Result<()> {
		self.deliver(|input| input.key(key, down))
	}

	fn button(&self, button: Button, down: bool) -> Result<()> {
		self.deliver(|input| input.button(button, down))
	}

	pub fn press_and_release(&self, key: Key, hold: Duration) -> Result<()> {
		self.key(key, true)?;
		if !hold.is_zero() {
			self.clock.sleep(hold);
		}
		self.key(key, false)
	}

	/// Press-and-release, then give the game `settle` to react.
	pub fn tap(&self, key: Key, settle: Duration) -> Result<()> {
		tracing::trace!(%key, "tap");
		self.press_and_release(key, Duration::ZERO)?;
		self.clock.sleep(settle);
		Ok(())
	}

	pub fn mouse_hold(&self, button: Button, duration: Duration) -> Result<()> {
		self.button(button, true)?;
		self.clock.sleep(duration);
		self.button(button, false)
	}

	/// Hold both buttons together (dual cast).
	pub fn mouse_hold_both(&self, duration: Duration) -> Result<()> {
		self.button(Button::Left, true)?;
		if let Err(err) = self.button(Button::Right, true) {
			let _ = self.button(Button::Left, false);
			return Err(err);
		}
		self.clock.sleep(duration);
		let left = self.button(Button::Left, false);
		let right = self.button(Button::Right, false);
		left.and(right)
	}

	/// Hold the button(s) of `hand` for `duration`.
	pub fn cast(&self, hand: HandState, duration: Duration) -> Result<()> {
		tracing::debug!(%hand, secs = duration.as_secs_f32(), "cast");
		match hand {
			HandState::Left => self.mouse_hold(Button::Left, duration),
			HandState::Right => self.mouse_hold(Button::Right, duration),
			HandState::Both => self.mouse_hold_both(duration),
			HandState::None => Err(Error::InputFailure("cannot cast with no hand selected".into())),
		}
	}

	/// Short click used to assign a favorite to a hand.
	pub fn click(&self, hand: HandState) -> Result<()> {
		self.cast(hand, CLICK)
	}
}
