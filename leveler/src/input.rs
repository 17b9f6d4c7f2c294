//! Synthetic keyboard and mouse input.
//!
//! Events go to whichever window has focus; callers focus the game first.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
	Char(char),
	Enter,
	Escape,
	F5,
}

impl std::fmt::Display for Key {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Key::Char(c) => write!(f, "{c}"),
			Key::Enter => write!(f, "enter"),
			Key::Escape => write!(f, "esc"),
			Key::F5 => write!(f, "f5"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
	Left,
	Right,
}

/// Raw press/release delivery. No timing and no retries at this level.
pub trait Input: Send + Sync {
	fn key(&self, key: Key, down: bool) -> Result<()>;
	fn button(&self, button: Button, down: bool) -> Result<()>;
}

/// `SendInput`-backed injection. Keys are sent as scan codes because the game
/// reads DirectInput and ignores virtual-key-only events.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInput;

#[cfg(windows)]
impl Input for SystemInput {
	fn key(&self, key: Key, down: bool) -> Result<()> {
		win::send(&[win::key_event(key, down)?])
	}

	fn button(&self, button: Button, down: bool) -> Result<()> {
		win::send(&[win::button_event(button, down)])
	}
}

#[cfg(not(windows))]
impl Input for SystemInput {
	fn key(&self, key: Key, _down: bool) -> Result<()> {
		Err(Error::InputFailure(format!("cannot send key {key}: input injection needs Windows")))
	}

	fn button(&self, button: Button, _down: bool) -> Result<()> {
		Err(Error::InputFailure(format!("cannot press {button:?} button: input injection needs Windows")))
	}
}

#[cfg(windows)]
mod win {
	use windows::Win32::UI::Input::KeyboardAndMouse::{
		INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBD_EVENT_FLAGS, KEYBDINPUT, KEYEVENTF_KEYUP,
		KEYEVENTF_SCANCODE, MAPVK_VK_TO_VSC, MOUSE_EVENT_FLAGS, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
		MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP, MOUSEINPUT, MapVirtualKeyW, SendInput, VIRTUAL_KEY,
		VK_ESCAPE, VK_F5, VK_RETURN, VkKeyScanW,
	};

	use super::{Button, Key};
	use crate::{Error, Result};

	fn virtual_key(key: Key) -> Option<VIRTUAL_KEY> {
		match key {
			Key::Enter => Some(VK_RETURN),
			Key::Escape => Some(VK_ESCAPE),
			Key::F5 => Some(VK_F5),
			Key::Char(c) => {
				// Low byte is the virtual key, high byte the shift state (ignored).
				let scan = unsafe { VkKeyScanW(c as u32 as u16) };
				(scan != -1).then(|| VIRTUAL_KEY((scan as u16) & 0xff))
			}
		}
	}

	pub fn key_event(key: Key, down: bool) -> Result<INPUT> {
		let vk = virtual_key(key).ok_or_else(|| Error::InputFailure(format!("no virtual key for {key}")))?;
		let scan = unsafe { MapVirtualKeyW(vk.0 as u32, MAPVK_VK_TO_VSC) } as u16;
		let mut flags: KEYBD_EVENT_FLAGS = KEYEVENTF_SCANCODE;
		if !down {
			flags = flags | KEYEVENTF_KEYUP;
		}

		Ok(INPUT {
			r#type: INPUT_KEYBOARD,
			Anonymous: INPUT_0 {
				ki: KEYBDINPUT {
					wVk: VIRTUAL_KEY(0),
					wScan: scan,
					dwFlags: flags,
					time: 0,
					dwExtraInfo: 0,
				},
			},
		})
	}

	pub fn button_event(button: Button, down: bool) -> INPUT {
		let flags: MOUSE_EVENT_FLAGS = match (button, down) {
			(Button::Left, true) => MOUSEEVENTF_LEFTDOWN,
			(Button::Left, false) => MOUSEEVENTF_LEFTUP,
			(Button::Right, true) => MOUSEEVENTF_RIGHTDOWN,
			(Button::Right, false) => MOUSEEVENTF_RIGHTUP,
		};

		INPUT {
			r#type: INPUT_MOUSE,
			Anonymous: INPUT_0 {
				mi: MOUSEINPUT {
					dx: 0,
					dy: 0,
					mouseData: 0,
					dwFlags: flags,
					time: 0,
					dwExtraInfo: 0,
				},
			},
		}
	}

	pub fn send(inputs: &[INPUT]) -> Result<()> {
		let sent = unsafe { SendInput(inputs, std::mem::size_of::<INPUT>() as i32) };
		if sent as usize != inputs.len() {
			return Err(Error::InputFailure(format!(
				"SendInput delivered {sent} of {} events: {}",
				inputs.len(),
				std::io::Error::last_os_error()
			)));
		}
		Ok(())
	}
}
