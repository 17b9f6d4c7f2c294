/// Errors raised by the perception layer.
///
/// Expected "nothing there" outcomes (empty OCR text, weak template matches)
/// are values, not errors. Only input the layer cannot work with at all ends
/// up here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("image preprocessing failed: {0}")]
	Preprocess(String),
}

pub type Result<T> = std::result::Result<T, Error>;
