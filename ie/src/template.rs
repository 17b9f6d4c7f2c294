//! Template matching against a small, fixed set of glyphs.
//!
//! Scores are zero-mean normalized cross-correlation (the "correlation
//! coefficient" form), so a flat bright crop does not score high just for
//! being bright. `imageproc::template_matching` only offers the plain
//! normalized forms, which do.

use std::path::Path;

use anyhow::Context;
use image::GrayImage;

#[derive(Debug, Clone)]
pub struct Template<L> {
	pub label: L,
	pub image: GrayImage,
}

impl<L> Template<L> {
	pub fn new(label: L, image: GrayImage) -> Self {
		Self { label, image }
	}

	/// Load a template from disk as grayscale.
	pub fn load(label: L, path: impl AsRef<Path>) -> anyhow::Result<Self> {
		let path = path.as_ref();
		let image = image::open(path)
			.with_context(|| format!("load template {}", path.display()))?
			.to_luma8();
		Ok(Self { label, image })
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMatch<L> {
	pub label: L,
	/// Best placement score, in `[0, 1]`.
	pub confidence: f32,
}

/// Score every template over the whole image and return the best one.
///
/// Ties keep the template that came first. Returns `None` only for an empty
/// template set.
pub fn match_best_template<L: Clone>(image: &GrayImage, templates: &[Template<L>]) -> Option<TemplateMatch<L>> {
	let mut best: Option<TemplateMatch<L>> = None;

	for template in templates {
		let confidence = best_placement(image, &template.image);
		match &best {
			Some(b) if confidence <= b.confidence => {}
			_ => {
				best = Some(TemplateMatch {
					label: template.label.clone(),
					confidence,
				})
			}
		}
	}

	best
}

/// Highest correlation coefficient of `template` over all placements inside `image`.
fn best_placement(image: &GrayImage, template: &GrayImage) -> f32 {
	let (iw, ih) = image.dimensions();
	let (tw, th) = template.dimensions();
	if tw == 0 || th == 0 || tw > iw || th > ih {
		return 0.0;
	}

	let n = (tw * th) as f64;
	let t_mean = template.pixels().map(|p| p.0[0] as f64).sum::<f64>() / n;
	let t_dev: Vec<f64> = template.pixels().map(|p| p.0[0] as f64 - t_mean).collect();
	let t_norm = t_dev.iter().map(|v| v * v).sum::<f64>();
	if t_norm <= f64::EPSILON {
		return 0.0;
	}

	let mut best = 0.0f64;
	for oy in 0..=(ih - th) {
		for ox in 0..=(iw - tw) {
			let mut sum = 0.0f64;
			let mut sum_sq = 0.0f64;
			let mut cross = 0.0f64;
			for ty in 0..th {
				for tx in 0..tw {
					let v = image.get_pixel(ox + tx, oy + ty).0[0] as f64;
					sum += v;
					sum_sq += v * v;
					cross += v * t_dev[(tx + ty * tw) as usize];
				}
			}
			let w_norm = sum_sq - sum * sum / n;
			if w_norm <= f64::EPSILON {
				continue;
			}
			let score = cross / (t_norm * w_norm).sqrt();
			if score > best {
				best = score;
			}
		}
	}

	best.clamp(0.0, 1.0) as f32
}
