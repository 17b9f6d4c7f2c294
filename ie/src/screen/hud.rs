//! HUD bars.

use crate::coverage::{HEALTH_RED, coverage_mask, mask_percentage};
use crate::{DebugSink, Error, Image, Result};

/// Raw health reading: share of the health-bar region that is bar-red.
///
/// A full bar can read 0 when its colour drifts out of the red band, so
/// callers decide what a zero means.
pub fn health(image: Image, debug: &DebugSink) -> Result<f32> {
	if image.is_empty() {
		return Err(Error::InvalidInput("health bar region is empty".into()));
	}
	let mask = coverage_mask(image, &HEALTH_RED);
	debug.gray("healthbar_redmask", &mask);
	Ok(mask_percentage(&mask))
}
