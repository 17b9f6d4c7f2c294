mod error;
pub use error::{Error, Result};
mod image;
pub use self::image::*;
mod debug;
pub use debug::DebugSink;
mod ocr;
pub use ocr::{Ocr, Recognize};

pub mod coverage;
pub mod screen;
pub mod template;
pub mod text;

pub use screen::favorites::{EquipIcons, HandState};

/// One perception sample, for logging and diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
	Text(String),
	Match { label: String, confidence: f32 },
	Coverage(f32),
}

impl std::fmt::Display for Reading {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Reading::Text(text) => write!(f, "text {text:?}"),
			Reading::Match { label, confidence } => write!(f, "match {label} ({confidence:.2})"),
			Reading::Coverage(pct) => write!(f, "coverage {pct:.1}%"),
		}
	}
}

/// The image engine: OCR, the hand-marker icons and the debug sink, bundled
/// so callers can hand it a crop and get a typed answer back.
pub struct Ie {
	ocr: Ocr,
	icons: EquipIcons,
	debug: DebugSink,
}

impl Ie {
	pub fn try_new(
		ocr_detection: impl AsRef<std::path::Path>,
		ocr_recognition: impl AsRef<std::path::Path>,
		ocr_charset: impl AsRef<std::path::Path>,
		icons: EquipIcons,
		debug: DebugSink,
	) -> anyhow::Result<Self> {
		Ok(Self {
			ocr: Ocr::try_new(ocr_detection, ocr_recognition, ocr_charset)?,
			icons,
			debug,
		})
	}

	/// Normalized caption of the highlighted favorite (may be empty).
	pub fn favorite_name(&self, image: Image) -> Result<String> {
		let name = screen::favorites::favorite_name(image, &self.ocr)?;
		tracing::debug!(reading = %Reading::Text(name.clone()), "favorite caption");
		Ok(name)
	}

	pub fn hand_state(&self, image: Image) -> Result<HandState> {
		self.debug.image("favequip_crop", image);
		let best = screen::favorites::best_marker(image, &self.icons)?;
		if let Some(m) = &best {
			let reading = Reading::Match {
				label: m.label.symbol().to_string(),
				confidence: m.confidence,
			};
			tracing::debug!(reading = %reading, "equip marker");
		}
		Ok(screen::favorites::classify(best))
	}

	/// Raw health-bar coverage percentage.
	pub fn health(&self, image: Image) -> Result<f32> {
		let pct = screen::hud::health(image, &self.debug)?;
		tracing::debug!(reading = %Reading::Coverage(pct), "health bar");
		Ok(pct)
	}

	pub fn menu_open(&self, image: Image) -> Result<bool> {
		screen::menu::menu_open(image, &self.ocr)
	}
}
