//! Scripted stand-ins for the game, used by unit tests.
//!
//! `World` is a tiny model of the game: a favorites list with a cursor that
//! follows the scroll keys, hand markers that follow equip clicks, a system
//! menu toggled by Escape, a scripted health bar and a virtual clock.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use ie::HandState;

use crate::action::Actions;
use crate::cancel::CancellationToken;
use crate::capture::Focus;
use crate::clock::Clock;
use crate::config::KeyBindings;
use crate::input::{Button, Input, Key};
use crate::perception::Perceive;
use crate::session::{Devices, Session};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
	Key(Key, bool),
	Button(Button, bool),
}

#[derive(Default)]
struct State {
	now: Duration,
	events: Vec<Event>,
	rejected: Vec<Button>,
	focus_fails: bool,
	/// Input is dropped until the window is focused again.
	unfocused: bool,

	favorites: Vec<String>,
	cursor: usize,
	favorites_open: bool,
	blank_caption: bool,
	hands: HashMap<usize, HandState>,

	menu_open: bool,

	health: VecDeque<f32>,
	last_health: f32,
	health_samples: usize,

	cancel: Option<CancellationToken>,
	/// Cancel once this many button presses have been seen.
	cancel_after_presses: Option<usize>,
	presses: usize,
}

pub struct World {
	keys: KeyBindings,
	state: Mutex<State>,
}

impl World {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			keys: KeyBindings::default(),
			state: Mutex::new(State {
				last_health: 100.0,
				..State::default()
			}),
		})
	}

	fn state(&self) -> MutexGuard<'_, State> {
		self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	/// Fill the favorites list and put the cursor on `cursor`.
	pub fn with_favorites(self: Arc<Self>, names: &[&str], cursor: usize) -> Arc<Self> {
		{
			let mut state = self.state();
			state.favorites = names.iter().map(|s| s.to_string()).collect();
			state.cursor = cursor;
		}
		self
	}

	pub fn set_hand(&self, favorite: &str, hand: HandState) {
		let mut state = self.state();
		if let Some(index) = state.favorites.iter().position(|f| f == favorite) {
			state.hands.insert(index, hand);
		}
	}

	pub fn hand_of(&self, favorite: &str) -> HandState {
		let state = self.state();
		state
			.favorites
			.iter()
			.position(|f| f == favorite)
			.and_then(|index| state.hands.get(&index).copied())
			.unwrap_or_default()
	}

	pub fn script_health(&self, samples: &[f32]) {
		self.state().health = samples.iter().copied().collect();
	}

	pub fn health_samples(&self) -> usize {
		self.state().health_samples
	}

	pub fn blank_caption(&self) {
		self.state().blank_caption = true;
	}

	pub fn lose_focus(&self) {
		self.state().unfocused = true;
	}

	pub fn fail_focus(&self) {
		self.state().focus_fails = true;
	}

	pub fn set_menu_open(&self, open: bool) {
		self.state().menu_open = open;
	}

	pub fn menu_is_open(&self) -> bool {
		self.state().menu_open
	}

	pub fn favorites_are_open(&self) -> bool {
		self.state().favorites_open
	}

	pub fn cursor(&self) -> usize {
		self.state().cursor
	}

	pub fn reject_button(&self, button: Button) {
		self.state().rejected.push(button);
	}

	/// Request a stop on `token` right after the `presses`-th mouse press.
	pub fn cancel_after_presses(&self, token: &CancellationToken, presses: usize) {
		let mut state = self.state();
		state.cancel = Some(token.clone());
		state.cancel_after_presses = Some(presses);
	}

	pub fn events(&self) -> Vec<Event> {
		self.state().events.clone()
	}

	pub fn clear_events(&self) {
		self.state().events.clear();
	}

	/// Key-downs only, the way the game counts them.
	pub fn key_presses(&self, key: Key) -> usize {
		self.state()
			.events
			.iter()
			.filter(|e| **e == Event::Key(key, true))
			.count()
	}

	pub fn button_presses(&self) -> Vec<Button> {
		self.state()
			.events
			.iter()
			.filter_map(|e| match e {
				Event::Button(b, true) => Some(*b),
				_ => None,
			})
			.collect()
	}

	pub fn now(&self) -> Duration {
		self.state().now
	}

	pub fn actions(&self) -> Actions<'_> {
		Actions::new(self, self)
	}

	pub fn devices(self: &Arc<Self>) -> Devices {
		Devices {
			input: self.clone(),
			clock: self.clone(),
			eyes: self.clone(),
			window: self.clone(),
		}
	}

	pub fn session(self: &Arc<Self>) -> Session {
		self.session_with(CancellationToken::new())
	}

	pub fn session_with(self: &Arc<Self>, cancel: CancellationToken) -> Session {
		Session::new(self.devices(), self.keys.clone(), cancel)
	}
}

impl Input for World {
	fn key(&self, key: Key, down: bool) -> Result<()> {
		let mut state = self.state();
		if state.unfocused {
			return Err(Error::InputFailure("game window not focused".into()));
		}
		state.events.push(Event::Key(key, down));
		if !down {
			return Ok(());
		}
		let last = state.favorites.len().saturating_sub(1);
		if key == self.keys.favorites {
			state.favorites_open = !state.favorites_open;
		} else if key == self.keys.menu {
			state.menu_open = !state.menu_open;
		} else if state.favorites_open && key == self.keys.scroll_up {
			state.cursor = state.cursor.saturating_sub(1);
		} else if state.favorites_open && key == self.keys.scroll_down {
			state.cursor = (state.cursor + 1).min(last);
		}
		Ok(())
	}

	fn button(&self, button: Button, down: bool) -> Result<()> {
		let mut state = self.state();
		if state.unfocused {
			return Err(Error::InputFailure("game window not focused".into()));
		}
		if state.rejected.contains(&button) {
			return Err(Error::InputFailure(format!("{button:?} rejected")));
		}
		state.events.push(Event::Button(button, down));
		if !down {
			return Ok(());
		}

		if state.favorites_open {
			let cursor = state.cursor;
			let current = state.hands.get(&cursor).copied().unwrap_or_default();
			let next = match (current, button) {
				(HandState::None | HandState::Left, Button::Left) => HandState::Left,
				(HandState::None | HandState::Right, Button::Right) => HandState::Right,
				_ => HandState::Both,
			};
			state.hands.insert(cursor, next);
		}

		state.presses += 1;
		if state.cancel_after_presses == Some(state.presses)
			&& let Some(token) = &state.cancel
		{
			token.cancel();
		}
		Ok(())
	}
}

impl Clock for World {
	fn elapsed(&self) -> Duration {
		self.state().now
	}

	fn sleep(&self, duration: Duration) {
		self.state().now += duration;
	}
}

impl Perceive for World {
	fn favorite_text(&self) -> Result<String> {
		let state = self.state();
		if state.blank_caption {
			return Ok(String::new());
		}
		Ok(state.favorites.get(state.cursor).cloned().unwrap_or_default())
	}

	fn hand_state(&self) -> Result<HandState> {
		let state = self.state();
		Ok(state.hands.get(&state.cursor).copied().unwrap_or_default())
	}

	fn health(&self) -> Result<f32> {
		let mut state = self.state();
		state.health_samples += 1;
		if let Some(next) = state.health.pop_front() {
			state.last_health = next;
		}
		Ok(state.last_health)
	}

	fn menu_open(&self) -> Result<bool> {
		Ok(self.state().menu_open)
	}
}

impl Focus for World {
	fn focus(&self) -> bool {
		let mut state = self.state();
		if state.focus_fails {
			return false;
		}
		state.unfocused = false;
		true
	}
}
