//! Favorites menu: the highlighted entry's caption and its hand marker.

use std::path::Path;

use crate::template::{Template, TemplateMatch, match_best_template};
use crate::text::{TextMode, extract_text, normalize_favorite_text};
use crate::{Error, Image, Result, ocr::Recognize};

/// Minimum correlation for a hand marker to count as present.
pub const EQUIP_MIN_CONFIDENCE: f32 = 0.8;

/// Which hand(s) hold the highlighted favorite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum HandState {
	#[default]
	None,
	Left,
	Right,
	Both,
}

impl HandState {
	pub const ALL: [HandState; 4] = [HandState::None, HandState::Left, HandState::Right, HandState::Both];

	/// The marker the game draws next to an equipped favorite.
	pub fn symbol(self) -> &'static str {
		match self {
			HandState::None => "none",
			HandState::Left => "l",
			HandState::Right => "r",
			HandState::Both => "lr",
		}
	}

	pub fn holds_left(self) -> bool {
		matches!(self, HandState::Left | HandState::Both)
	}

	pub fn holds_right(self) -> bool {
		matches!(self, HandState::Right | HandState::Both)
	}
}

impl std::fmt::Display for HandState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			HandState::None => write!(f, "none"),
			HandState::Left => write!(f, "left"),
			HandState::Right => write!(f, "right"),
			HandState::Both => write!(f, "both"),
		}
	}
}

/// The three hand-marker glyphs (left, right, both).
#[derive(Debug, Clone)]
pub struct EquipIcons {
	templates: Vec<Template<HandState>>,
}

impl EquipIcons {
	pub const FILES: [(HandState, &'static str); 3] = [
		(HandState::Right, "fav_right_icon.png"),
		(HandState::Left, "fav_left_icon.png"),
		(HandState::Both, "fav_both_icon.png"),
	];

	pub fn new(templates: Vec<Template<HandState>>) -> Self {
		Self { templates }
	}

	/// Load the three marker PNGs from a directory.
	pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
		let dir = dir.as_ref();
		let templates = Self::FILES
			.iter()
			.map(|(state, file)| Template::load(*state, dir.join(file)))
			.collect::<anyhow::Result<Vec<_>>>()?;
		Ok(Self { templates })
	}

	pub fn templates(&self) -> &[Template<HandState>] {
		&self.templates
	}
}

/// OCR the highlighted favorite's caption, normalized.
pub fn favorite_name(image: Image, ocr: &impl Recognize) -> Result<String> {
	let raw = extract_text(image, TextMode::default(), ocr)?;
	Ok(normalize_favorite_text(&raw))
}

/// Best marker match for the equip region. `None` only when there are no icons.
pub fn best_marker(image: Image, icons: &EquipIcons) -> Result<Option<TemplateMatch<HandState>>> {
	if image.is_empty() {
		return Err(Error::InvalidInput("equip region is empty".into()));
	}
	Ok(match_best_template(&image.to_gray_image(), icons.templates()))
}

/// Classify the equip region. A marker below [`EQUIP_MIN_CONFIDENCE`] reads as
/// [`HandState::None`].
pub fn hand_state(image: Image, icons: &EquipIcons) -> Result<HandState> {
	Ok(classify(best_marker(image, icons)?))
}

pub fn classify(best: Option<TemplateMatch<HandState>>) -> HandState {
	match best {
		Some(m) if m.confidence >= EQUIP_MIN_CONFIDENCE => m.label,
		_ => HandState::None,
	}
}
