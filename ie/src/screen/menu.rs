//! System menu detection.
//!
//! The journal/system menu shows a "QUESTS" tab caption; its presence is the
//! cheapest reliable signal that a menu is covering the game.

use crate::text::{TextMode, extract_text};
use crate::{Image, Result, ocr::Recognize};

const CAPTION: &str = "quests";

/// Whether OCR'd text reads like the menu caption.
///
/// One edit of slack per word: the caption font turns "S" into "5" often
/// enough to matter.
pub fn mentions_caption(text: &str) -> bool {
	let text = text.to_lowercase();
	if text.contains("quest") {
		return true;
	}
	text.split(|c: char| !c.is_alphanumeric())
		.filter(|w| !w.is_empty())
		.any(|w| levenshtein::levenshtein(w, CAPTION) <= 1)
}

pub fn menu_open(image: Image, ocr: &impl Recognize) -> Result<bool> {
	let text = extract_text(image, TextMode::Otsu, ocr)?;
	Ok(mentions_caption(&text))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn caption_variants() {
		assert!(mentions_caption("QUESTS"));
		assert!(mentions_caption("  Quest log"));
		assert!(mentions_caption("QUE5TS"));
		assert!(!mentions_caption("SKILLS"));
		assert!(!mentions_caption(""));
	}
}
