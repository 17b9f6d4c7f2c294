//! Text extraction: grayscale, binarize, upscale, OCR.

use imageproc::contrast::{ThresholdType, equalize_histogram, otsu_level, threshold};

use crate::{Error, Image, OwnedImage, Result, ocr::Recognize};

/// Upscale factor applied after binarization.
const UPSCALE: u32 = 2;

/// How a crop is binarized before OCR.
///
/// Both modes produce dark glyphs on a light background: the game draws light
/// text over dark, translucent panels, so the threshold is inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
	/// Fixed luma cutoff. Pixels brighter than the level become black.
	Threshold(u8),
	/// Histogram-equalised, Otsu-selected cutoff. Copes with panels whose
	/// backdrop brightness follows the scene behind them.
	Otsu,
}

impl Default for TextMode {
	fn default() -> Self {
		Self::Threshold(150)
	}
}

pub fn binarize(image: Image, mode: TextMode) -> image::GrayImage {
	let gray = image.to_gray_image();
	match mode {
		TextMode::Threshold(level) => threshold(&gray, level, ThresholdType::BinaryInverted),
		TextMode::Otsu => {
			let gray = equalize_histogram(&gray);
			let level = otsu_level(&gray);
			threshold(&gray, level, ThresholdType::BinaryInverted)
		}
	}
}

/// Run the OCR pipeline on a crop and return the raw recognized text.
///
/// An empty result is a normal outcome (nothing legible). Only an empty crop
/// is rejected.
pub fn extract_text(image: Image, mode: TextMode, ocr: &impl Recognize) -> Result<String> {
	if image.is_empty() {
		return Err(Error::InvalidInput(format!(
			"cannot read text from a {}x{} image",
			image.width(),
			image.height()
		)));
	}

	let bin = binarize(image, mode);
	let prepared = OwnedImage::from_gray_as_rgb(&bin)
		.upscaled(UPSCALE)
		.map_err(|err| Error::Preprocess(format!("{err:#}")))?;

	Ok(ocr.recognize(prepared.as_image()))
}

/// Canonical form of a favorites-menu caption.
///
/// OCR regularly reads the parentheses of "Elven Dagger (2)" as braces.
pub fn normalize_favorite_text(text: &str) -> String {
	text.to_lowercase()
		.chars()
		.filter(|c| *c != '\n' && *c != '\r')
		.map(|c| match c {
			'{' => '(',
			'}' => ')',
			c => c,
		})
		.collect()
}
