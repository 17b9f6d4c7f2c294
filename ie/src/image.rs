//! Image primitives and utilities.
//!
//! Captures are stored as a lightweight owned RGB image (`OwnedImage`).
//! Regions of a capture are borrowed views (`Image<'a>`) so that cropping the
//! favorites box, the equip icon or the health bar out of one window grab
//! never copies pixels until a pipeline actually needs them.

use anyhow::{Context, Result};

/// Owned RGB image (no alpha).
#[derive(Clone, Debug)]
pub struct OwnedImage {
	width: u32,
	height: u32,
	data: Vec<Color>,
}

impl OwnedImage {
	/// Build an `OwnedImage` from RGBA bytes (alpha is discarded).
	///
	/// The buffer is expected to be tightly packed: `width * height * 4` bytes.
	pub fn from_rgba(width: usize, bytes: &[u8]) -> Self {
		let height = bytes.len() / width.max(1) / 4;
		let data = bytes
			.chunks_exact(4)
			.take(width * height)
			.map(|v| Color::new(v[0], v[1], v[2]))
			.collect::<Vec<_>>();

		Self {
			width: width as u32,
			height: height as u32,
			data,
		}
	}

	/// Build a solid image. Mostly useful for synthetic captures.
	pub fn filled(width: u32, height: u32, color: Color) -> Self {
		Self {
			width,
			height,
			data: vec![color; (width * height) as usize],
		}
	}

	/// Decode an encoded image (PNG, BMP, ...).
	///
	/// Anything that does not decode to a non-empty picture is rejected as
	/// [`crate::Error::InvalidInput`].
	pub fn decode(bytes: &[u8]) -> crate::Result<Self> {
		let img = image::load_from_memory(bytes)
			.map_err(|err| crate::Error::InvalidInput(format!("not an image: {err}")))?
			.to_rgb8();
		if img.width() == 0 || img.height() == 0 {
			return Err(crate::Error::InvalidInput("decoded image is empty".into()));
		}
		Ok(Self::from_rgb_image(&img))
	}

	pub fn from_rgb_image(img: &image::RgbImage) -> Self {
		let (width, height) = img.dimensions();
		let data = img
			.pixels()
			.map(|p| Color::new(p.0[0], p.0[1], p.0[2]))
			.collect();
		Self { width, height, data }
	}

	/// Create an RGB `OwnedImage` from a grayscale image (each pixel repeated into RGB).
	pub fn from_gray_as_rgb(gray: &image::GrayImage) -> Self {
		let (w, h) = gray.dimensions();
		let mut data = Vec::with_capacity((w * h) as usize);
		for p in gray.pixels() {
			let v = p.0[0];
			data.push(Color::new(v, v, v));
		}
		Self {
			width: w,
			height: h,
			data,
		}
	}

	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
		if x < self.width && y < self.height {
			self.data[(x + y * self.width) as usize] = color;
		}
	}

	/// Resize this image to an exact size.
	///
	/// Uses `fast_image_resize` (SIMD-optimized) with Catmull-Rom filtering and
	/// keeps output in `Vec<Color>`.
	pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
		let width = width.max(1);
		let height = height.max(1);
		if self.width == width && self.height == height {
			return Ok(());
		}

		// SAFETY: `Color` is `#[repr(C)]` with 3 x `u8`, so it is layout-compatible
		// with `fast_image_resize::pixels::U8x3` (alignment 1).
		let src_pixels = unsafe {
			std::slice::from_raw_parts(
				self.data.as_ptr() as *const fast_image_resize::pixels::U8x3,
				self.data.len(),
			)
		};

		let src = fast_image_resize::images::ImageRef::from_pixels(self.width, self.height, src_pixels)
			.context("fast_image_resize: ImageRef::from_pixels failed")?;

		let mut dst = fast_image_resize::images::Image::new(width, height, fast_image_resize::PixelType::U8x3);

		let mut resizer = fast_image_resize::Resizer::new();
		let options = fast_image_resize::ResizeOptions::new().resize_alg(
			fast_image_resize::ResizeAlg::Interpolation(fast_image_resize::FilterType::CatmullRom),
		);

		resizer
			.resize(&src, &mut dst, &Some(options))
			.context("fast_image_resize: resize failed")?;

		let bytes: Vec<u8> = dst.into_vec();
		let mut data = Vec::with_capacity((width * height) as usize);
		for px in bytes.chunks_exact(3) {
			data.push(Color::new(px[0], px[1], px[2]));
		}

		self.width = width;
		self.height = height;
		self.data = data;
		Ok(())
	}

	/// Upscale by an integer factor (OCR prefers larger glyphs).
	pub fn upscaled(mut self, factor: u32) -> Result<Self> {
		let factor = factor.max(1);
		self.resize(self.width * factor, self.height * factor)?;
		Ok(self)
	}

	/// Create a borrowed view of this entire image.
	pub fn as_image<'a>(&'a self) -> Image<'a> {
		Image {
			x1: 0,
			y1: 0,
			x2: self.width,
			y2: self.height,
			true_width: self.width,
			data: &self.data,
		}
	}
}

// ----------

/// Borrowed image view into an `OwnedImage`.
#[derive(Clone, Copy)]
pub struct Image<'a> {
	x1: u32,
	y1: u32,
	x2: u32,
	y2: u32,
	true_width: u32,
	data: &'a [Color],
}

impl<'a> Image<'a> {
	#[inline(always)]
	pub fn width(&self) -> u32 {
		self.x2 - self.x1
	}

	#[inline(always)]
	pub fn height(&self) -> u32 {
		self.y2 - self.y1
	}

	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.width() == 0 || self.height() == 0
	}

	#[inline(always)]
	fn pixel(&self, x: u32, y: u32) -> &Color {
		&self.data[(x + y * self.true_width) as usize]
	}

	/// Iterate pixels row-major (relative to this view).
	pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
		(self.y1..self.y2).flat_map(move |y| (self.x1..self.x2).map(move |x| *self.pixel(x, y)))
	}

	pub fn get_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity((self.width() * self.height() * 3) as usize);
		for clr in self.pixels() {
			bytes.extend_from_slice(&[clr.r, clr.g, clr.b]);
		}
		bytes
	}

	/// Convert to a grayscale `GrayImage` (luma).
	pub fn to_gray_image(&self) -> image::GrayImage {
		let mut out = image::GrayImage::new(self.width(), self.height());
		for (p, clr) in out.pixels_mut().zip(self.pixels()) {
			p.0[0] = clr.luma();
		}
		out
	}

	pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
		let bytes = self.get_bytes();
		let img = image::RgbImage::from_raw(self.width(), self.height(), bytes)
			.context("RgbImage::from_raw failed")?;
		img.save_with_format(path, image::ImageFormat::Png)
			.context("save png")?;
		Ok(())
	}

	/// Create an arbitrary subimage (relative coordinates).
	///
	/// The requested rectangle is clamped to the view, so an oversized region
	/// yields a smaller (possibly empty) view rather than a panic.
	pub fn sub_image(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
		let x = x.min(self.width());
		let y = y.min(self.height());
		let width = width.min(self.width() - x);
		let height = height.min(self.height() - y);

		Self {
			x1: self.x1 + x,
			y1: self.y1 + y,
			x2: self.x1 + x + width,
			y2: self.y1 + y + height,
			true_width: self.true_width,
			data: self.data,
		}
	}
}

// ----------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[repr(C)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const WHITE: Self = Self::new(255, 255, 255);
	pub const BLACK: Self = Self::new(0, 0, 0);

	#[inline]
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Compute luma (grayscale intensity).
	pub fn luma(&self) -> u8 {
		let r = self.r as u32;
		let g = self.g as u32;
		let b = self.b as u32;
		((299 * r + 587 * g + 114 * b) / 1000) as u8
	}

	/// Convert to 8-bit HSV on the OpenCV scale (hue 0..=180, saturation and
	/// value 0..=255).
	///
	/// The scale matters: colour ranges in the config were tuned against it.
	pub fn to_hsv(&self) -> Hsv {
		let r = self.r as f32;
		let g = self.g as f32;
		let b = self.b as f32;
		let max = r.max(g).max(b);
		let min = r.min(g).min(b);
		let diff = max - min;

		let s = if max == 0.0 { 0.0 } else { 255.0 * diff / max };
		let mut h = if diff == 0.0 {
			0.0
		} else if max == r {
			60.0 * (g - b) / diff
		} else if max == g {
			120.0 + 60.0 * (b - r) / diff
		} else {
			240.0 + 60.0 * (r - g) / diff
		};
		if h < 0.0 {
			h += 360.0;
		}

		Hsv {
			h: (h / 2.0).round().min(180.0) as u8,
			s: s.round() as u8,
			v: max as u8,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, serde::Deserialize, serde::Serialize)]
pub struct Hsv {
	pub h: u8,
	pub s: u8,
	pub v: u8,
}

impl Hsv {
	pub const fn new(h: u8, s: u8, v: u8) -> Self {
		Self { h, s, v }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hsv_matches_opencv_scale() {
		assert_eq!(Color::new(255, 0, 0).to_hsv(), Hsv::new(0, 255, 255));
		assert_eq!(Color::new(0, 255, 0).to_hsv(), Hsv::new(60, 255, 255));
		assert_eq!(Color::new(0, 0, 255).to_hsv(), Hsv::new(120, 255, 255));
		assert_eq!(Color::new(128, 128, 128).to_hsv(), Hsv::new(0, 0, 128));
		assert_eq!(Color::BLACK.to_hsv(), Hsv::new(0, 0, 0));
	}

	#[test]
	fn magenta_reds_wrap_near_180() {
		let hsv = Color::new(255, 0, 40).to_hsv();
		assert!(hsv.h >= 170, "hue was {}", hsv.h);
	}

	#[test]
	fn sub_image_is_clamped() {
		let img = OwnedImage::filled(10, 8, Color::WHITE);
		let view = img.as_image().sub_image(6, 4, 100, 100);
		assert_eq!((view.width(), view.height()), (4, 4));

		let outside = img.as_image().sub_image(50, 50, 3, 3);
		assert!(outside.is_empty());
	}

	#[test]
	fn sub_image_reads_the_right_pixels() {
		let mut img = OwnedImage::filled(4, 4, Color::BLACK);
		img.put_pixel(2, 1, Color::WHITE);
		let view = img.as_image().sub_image(2, 1, 2, 2);
		let px: Vec<_> = view.pixels().collect();
		assert_eq!(px, vec![Color::WHITE, Color::BLACK, Color::BLACK, Color::BLACK]);
	}

	#[test]
	fn upscale_doubles_dimensions() {
		let img = OwnedImage::filled(7, 3, Color::WHITE).upscaled(2).unwrap();
		assert_eq!((img.width(), img.height()), (14, 6));
	}

	#[test]
	fn decode_rejects_garbage() {
		let err = OwnedImage::decode(b"definitely not a png").unwrap_err();
		assert!(matches!(err, crate::Error::InvalidInput(_)));
	}

	#[test]
	fn from_rgba_drops_alpha() {
		let bytes = [1, 2, 3, 255, 4, 5, 6, 0];
		let img = OwnedImage::from_rgba(2, &bytes);
		let px: Vec<_> = img.as_image().pixels().collect();
		assert_eq!(px, vec![Color::new(1, 2, 3), Color::new(4, 5, 6)]);
	}
}
