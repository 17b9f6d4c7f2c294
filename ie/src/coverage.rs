//! Colour-range coverage (how much of a bar is filled).

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, dilate};

use crate::{Error, Hsv, Image, Result};

/// Inclusive HSV box on the OpenCV scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct HsvRange {
	pub low: Hsv,
	pub high: Hsv,
}

impl HsvRange {
	pub const fn new(low: Hsv, high: Hsv) -> Self {
		Self { low, high }
	}

	#[inline]
	pub fn contains(&self, hsv: Hsv) -> bool {
		(self.low.h..=self.high.h).contains(&hsv.h)
			&& (self.low.s..=self.high.s).contains(&hsv.s)
			&& (self.low.v..=self.high.v).contains(&hsv.v)
	}
}

/// The health bar red. Red straddles hue 0, so it takes two boxes.
pub const HEALTH_RED: [HsvRange; 2] = [
	HsvRange::new(Hsv::new(0, 70, 50), Hsv::new(10, 255, 255)),
	HsvRange::new(Hsv::new(170, 70, 50), Hsv::new(180, 255, 255)),
];

/// Radius of the square structuring element (2 -> 5x5).
const KERNEL_RADIUS: u8 = 2;

/// Union mask of all ranges, closed then dilated to bridge anti-aliased gaps
/// and swallow speckle between bar segments.
pub fn coverage_mask(image: Image, ranges: &[HsvRange]) -> GrayImage {
	let mut mask = GrayImage::new(image.width(), image.height());
	for (p, clr) in mask.pixels_mut().zip(image.pixels()) {
		let hsv = clr.to_hsv();
		if ranges.iter().any(|r| r.contains(hsv)) {
			*p = Luma([255]);
		}
	}

	let mask = close(&mask, Norm::LInf, KERNEL_RADIUS);
	dilate(&mask, Norm::LInf, KERNEL_RADIUS)
}

/// Percentage of masked pixels, in `[0, 100]`.
pub fn mask_percentage(mask: &GrayImage) -> f32 {
	let total = mask.width() as u64 * mask.height() as u64;
	if total == 0 {
		return 0.0;
	}
	let on = mask.pixels().filter(|p| p.0[0] == 255).count() as u64;
	(100.0 * on as f64 / total as f64) as f32
}

pub fn estimate_coverage(image: Image, ranges: &[HsvRange]) -> Result<f32> {
	if image.is_empty() {
		return Err(Error::InvalidInput("cannot estimate coverage of an empty image".into()));
	}
	Ok(mask_percentage(&coverage_mask(image, ranges)))
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::{Color, OwnedImage};

	const RED: Color = Color::new(200, 20, 20);
	const GREY: Color = Color::new(60, 60, 60);

	#[test]
	fn fully_red_is_full() {
		let img = OwnedImage::filled(40, 6, RED);
		assert_eq!(estimate_coverage(img.as_image(), &HEALTH_RED).unwrap(), 100.0);
	}

	#[test]
	fn no_red_is_empty() {
		let img = OwnedImage::filled(40, 6, GREY);
		assert_eq!(estimate_coverage(img.as_image(), &HEALTH_RED).unwrap(), 0.0);
	}

	#[test]
	fn half_bar_reads_about_half() {
		let mut img = OwnedImage::filled(100, 10, GREY);
		for y in 0..10 {
			for x in 0..50 {
				img.put_pixel(x, y, RED);
			}
		}
		let pct = estimate_coverage(img.as_image(), &HEALTH_RED).unwrap();
		// Dilation grows the bar edge by the kernel radius.
		assert!((50.0..=53.0).contains(&pct), "read {pct}");
	}

	#[test]
	fn speckle_gaps_are_bridged() {
		let mut img = OwnedImage::filled(30, 5, RED);
		img.put_pixel(10, 2, GREY);
		img.put_pixel(20, 1, GREY);
		assert_eq!(estimate_coverage(img.as_image(), &HEALTH_RED).unwrap(), 100.0);
	}

	#[test]
	fn wrapped_hue_counts_as_red() {
		let img = OwnedImage::filled(10, 10, Color::new(220, 10, 40));
		assert_eq!(estimate_coverage(img.as_image(), &HEALTH_RED).unwrap(), 100.0);
	}

	#[test]
	fn empty_image_is_invalid() {
		let img = OwnedImage::filled(3, 3, RED);
		let err = estimate_coverage(img.as_image().sub_image(3, 0, 1, 1), &HEALTH_RED).unwrap_err();
		assert!(matches!(err, Error::InvalidInput(_)));
	}

	proptest! {
		#[test]
		fn coverage_stays_in_range(
			w in 1u32..24,
			h in 1u32..12,
			seed in proptest::collection::vec(any::<(u8, u8, u8)>(), 1..64),
		) {
			let mut img = OwnedImage::filled(w, h, GREY);
			for y in 0..h {
				for x in 0..w {
					let (r, g, b) = seed[((x + y * w) as usize) % seed.len()];
					img.put_pixel(x, y, Color::new(r, g, b));
				}
			}
			let pct = estimate_coverage(img.as_image(), &HEALTH_RED).unwrap();
			prop_assert!((0.0..=100.0).contains(&pct));
		}
	}
}
