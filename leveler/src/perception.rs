//! What the controllers can observe about the game.

use std::sync::Arc;

use ie::HandState;

use crate::capture::{self, Focus};
use crate::config::{Region, Regions};
use crate::Result;

/// One fresh sample per call. Implementations hold no state between calls.
pub trait Perceive: Send + Sync {
	/// Normalized caption of the highlighted favorite. May be empty.
	fn favorite_text(&self) -> Result<String>;
	/// Hand marker of the highlighted favorite.
	fn hand_state(&self) -> Result<HandState>;
	/// Raw health-bar coverage in percent (0 is ambiguous, see the armor training).
	fn health(&self) -> Result<f32>;
	/// Whether the system menu covers the game.
	fn menu_open(&self) -> Result<bool>;
}

/// Perception over live captures of the game window.
pub struct ScreenEyes {
	title: String,
	regions: Regions,
	window: Arc<dyn Focus>,
	ie: Arc<ie::Ie>,
}

impl ScreenEyes {
	pub fn new(title: impl Into<String>, regions: Regions, window: Arc<dyn Focus>, ie: Arc<ie::Ie>) -> Self {
		Self {
			title: title.into(),
			regions,
			window,
			ie,
		}
	}

	/// Capture the window and hand `f` the requested region.
	fn with_region<T>(&self, region: Region, f: impl FnOnce(&ie::Ie, ie::Image) -> ie::Result<T>) -> Result<T> {
		// Overlays and alt-tabs steal focus; captures of a background window come out black.
		if !self.window.focus() {
			tracing::warn!(title = %self.title, "capturing without focus");
		}
		let frame = capture::capture_window(&self.title)?;
		let crop = frame
			.as_image()
			.sub_image(region.x, region.y, region.width, region.height);
		Ok(f(&self.ie, crop)?)
	}
}

impl Perceive for ScreenEyes {
	fn favorite_text(&self) -> Result<String> {
		self.with_region(self.regions.favorite_select, |ie, img| ie.favorite_name(img))
	}

	fn hand_state(&self) -> Result<HandState> {
		self.with_region(self.regions.favorite_equip, |ie, img| ie.hand_state(img))
	}

	fn health(&self) -> Result<f32> {
		self.with_region(self.regions.health_bar, |ie, img| ie.health(img))
	}

	fn menu_open(&self) -> Result<bool> {
		self.with_region(self.regions.menu, |ie, img| ie.menu_open(img))
	}
}
