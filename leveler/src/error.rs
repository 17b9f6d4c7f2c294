/// Why a run (or one of its steps) could not go on.
///
/// Cancellation is deliberately absent: a stopped run is a normal
/// [`crate::training::Completion::Stopped`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A sample carried no usable signal (e.g. the favorites caption read empty).
	#[error("no usable perception signal: {0}")]
	PerceptionFailure(String),

	/// The favorite is not in the list, or the scan ran out of steps.
	#[error("favorite '{name}' not found after {steps} steps")]
	NotFound { name: String, steps: u32 },

	/// Key or mouse input could not be delivered to the game window.
	#[error("input could not be delivered: {0}")]
	InputFailure(String),

	/// Health dropped under the abort floor while healing.
	#[error("health {health:.0}% fell below the abort floor of {floor:.0}%")]
	CriticalThreshold { health: f32, floor: f32 },

	#[error("screen capture failed: {0}")]
	Capture(String),

	#[error(transparent)]
	Perception(#[from] ie::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
