//! Best-effort diagnostic image dumps.
//!
//! Nothing in here may fail a perception call: write errors are logged and
//! swallowed.

use std::path::{Path, PathBuf};

use crate::Image;

#[derive(Debug, Clone, Default)]
pub struct DebugSink {
	dir: Option<PathBuf>,
}

impl DebugSink {
	pub fn disabled() -> Self {
		Self { dir: None }
	}

	pub fn to_dir(dir: impl Into<PathBuf>) -> Self {
		Self { dir: Some(dir.into()) }
	}

	pub fn is_enabled(&self) -> bool {
		self.dir.is_some()
	}

	pub fn dir(&self) -> Option<&Path> {
		self.dir.as_deref()
	}

	/// Write an RGB crop as `<name>.png`.
	pub fn image(&self, name: &str, image: Image) {
		let Some(path) = self.prepare(name) else { return };
		if let Err(err) = image.save_png(&path) {
			tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "failed to write debug image");
		}
	}

	/// Write a grayscale mask as `<name>.png`.
	pub fn gray(&self, name: &str, image: &image::GrayImage) {
		let Some(path) = self.prepare(name) else { return };
		if let Err(err) = image.save_with_format(&path, image::ImageFormat::Png) {
			tracing::warn!(path = %path.display(), error = %err, "failed to write debug mask");
		}
	}

	fn prepare(&self, name: &str) -> Option<PathBuf> {
		let dir = self.dir.as_ref()?;
		if let Err(err) = std::fs::create_dir_all(dir) {
			tracing::warn!(dir = %dir.display(), error = %err, "failed to create debug directory");
			return None;
		}
		Some(dir.join(format!("{name}.png")))
	}
}
