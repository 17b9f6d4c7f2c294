//! Game window lookup, focus and capture.

use xcap::image::EncodableLayout;

use crate::{Error, Result};

/// Brings the game window to the foreground.
pub trait Focus: Send + Sync {
	/// `true` when the window is (now) in the foreground.
	fn focus(&self) -> bool;
}

pub fn find_window(title: &str) -> Option<xcap::Window> {
	let windows = xcap::Window::all().ok()?;
	windows.into_iter().find(|window| {
		window.title().ok().as_deref() == Some(title) || window.app_name().ok().as_deref() == Some(title)
	})
}

/// Capture the whole client area of the named window.
pub fn capture_window(title: &str) -> Result<ie::OwnedImage> {
	let window = find_window(title).ok_or_else(|| Error::Capture(format!("no window titled {title:?}")))?;
	if window.is_minimized().unwrap_or(false) {
		return Err(Error::Capture(format!("window {title:?} is minimized")));
	}
	let img = window
		.capture_image()
		.map_err(|err| Error::Capture(format!("capture {title:?}: {err}")))?;
	Ok(ie::OwnedImage::from_rgba(img.width() as usize, img.as_bytes()))
}

/// The game window, addressed by title.
#[derive(Debug, Clone)]
pub struct GameWindow {
	title: String,
}

impl GameWindow {
	pub fn new(title: impl Into<String>) -> Self {
		Self { title: title.into() }
	}

	pub fn title(&self) -> &str {
		&self.title
	}
}

#[cfg(windows)]
impl Focus for GameWindow {
	fn focus(&self) -> bool {
		use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, IsIconic, SW_RESTORE, SetForegroundWindow, ShowWindow};
		use windows::core::{HSTRING, PCWSTR};

		let hwnd = match unsafe { FindWindowW(PCWSTR::null(), &HSTRING::from(self.title.as_str())) } {
			Ok(hwnd) => hwnd,
			Err(err) => {
				tracing::error!(title = %self.title, error = %err, "no window found to focus");
				return false;
			}
		};

		unsafe {
			if IsIconic(hwnd).as_bool() {
				let _ = ShowWindow(hwnd, SW_RESTORE);
			}
			let focused = SetForegroundWindow(hwnd).as_bool();
			if focused {
				tracing::trace!(title = %self.title, "window focused");
			} else {
				tracing::warn!(title = %self.title, "SetForegroundWindow refused");
			}
			focused
		}
	}
}

#[cfg(not(windows))]
impl Focus for GameWindow {
	fn focus(&self) -> bool {
		// Without a window manager API we can only check that the window exists.
		let found = find_window(&self.title).is_some();
		if !found {
			tracing::error!(title = %self.title, "no window found to focus");
		}
		found
	}
}
