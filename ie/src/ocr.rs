//! OCR wrapper.
//!
//! The project relies on `ocr-rs` (Rust PaddleOCR bindings). OCR engines are
//! sensitive to input quality, so preprocessing is done in [`crate::text`]
//! before calling into this module.

use std::path::Path;

use anyhow::Context;

/// Anything that can turn a (preprocessed) image into text.
///
/// Implemented by the PaddleOCR engine; tests substitute scripted recognizers.
pub trait Recognize {
	fn recognize(&self, image: crate::Image) -> String;
}

pub struct Ocr {
	engine: ocr_rs::OcrEngine,
}

impl Ocr {
	/// Initialize the OCR engine with the given model paths.
	///
	/// Missing or invalid model files are a configuration error the caller
	/// should surface to the operator, so this is fallible.
	pub fn try_new(
		detection: impl AsRef<Path>,
		recognition: impl AsRef<Path>,
		charset: impl AsRef<Path>,
	) -> anyhow::Result<Self> {
		let thread_count = std::thread::available_parallelism()
			.map(|n| n.get())
			.unwrap_or(1);

		let engine = ocr_rs::OcrEngine::new(
			detection,
			recognition,
			charset,
			Some(ocr_rs::OcrEngineConfig {
				backend: ocr_rs::Backend::CPU,
				thread_count: thread_count as i32,
				// Favorite names are short, anti-aliased lines; High costs CPU but
				// noticeably reduces bracket/paren confusion.
				precision_mode: ocr_rs::PrecisionMode::High,
				enable_parallel: thread_count > 1,
				min_result_confidence: 0.5,
				..Default::default()
			}),
		)
		.context("failed to initialize OCR engine")?;

		Ok(Self { engine })
	}
}

impl Recognize for Ocr {
	/// Recognize text from an RGB image view. Engine failures read as no text.
	fn recognize(&self, image: crate::Image) -> String {
		let image = ocr_rs::preprocess::rgb_to_image(&image.get_bytes(), image.width(), image.height());

		match self.engine.recognize(&image) {
			Ok(results) => results
				.into_iter()
				.map(|v| v.text)
				.collect::<Vec<_>>()
				.join(" "),
			Err(err) => {
				tracing::debug!(error = %err, "ocr engine failed; treating as empty text");
				String::new()
			}
		}
	}
}
