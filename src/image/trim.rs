//! Uniform border trimming.
//!
//! The top-left pixel is taken as the border color. Every pixel is compared
//! against it channel by channel; differences are pushed through a
//! [`Tolerance`] shift so faint noise (JPEG ringing, anti-aliasing halos)
//! does not count as content. The image is cropped to the bounding box of
//! what remains.

use image::{Rgba, RgbaImage, imageops};

/// Noise suppression applied to per-channel differences.
///
/// The shifted value of a difference `d` is `(d + d) / scale + offset`,
/// truncated toward zero and clamped to `0..=255`. A channel counts as
/// content when its shifted value is nonzero. With the defaults
/// (`scale = 2.0`, `offset = -100`) that means `d > 100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub scale: f32,
    pub offset: i32,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            scale: 2.0,
            offset: -100,
        }
    }
}

impl Tolerance {
    /// Shift one channel difference.
    #[inline]
    pub fn shift(&self, diff: u8) -> u8 {
        let doubled = f32::from(diff) * 2.0;
        let value = (doubled / self.scale + self.offset as f32) as i32;
        value.clamp(0, 255) as u8
    }

    /// Whether `pixel` differs from `background` after the shift.
    #[inline]
    pub fn differs(&self, pixel: &Rgba<u8>, background: &Rgba<u8>) -> bool {
        pixel
            .0
            .iter()
            .zip(background.0.iter())
            .any(|(&p, &b)| self.shift(p.abs_diff(b)) != 0)
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    #[inline]
    fn covers(&self, width: u32, height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == width && self.height == height
    }
}

/// Bounding box of every pixel that differs from the top-left pixel.
///
/// Returns `None` for an empty image or one with no differing pixel.
pub fn content_bounds(img: &RgbaImage, tolerance: &Tolerance) -> Option<BoundingBox> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let background = *img.get_pixel(0, 0);
    let (mut left, mut top) = (u32::MAX, u32::MAX);
    let (mut right, mut bottom) = (0_u32, 0_u32);
    let mut found = false;

    for (y, row) in img.rows().enumerate() {
        let y = y as u32;
        for (x, pixel) in row.enumerate() {
            if !tolerance.differs(pixel, &background) {
                continue;
            }
            let x = x as u32;
            found = true;
            left = left.min(x);
            right = right.max(x);
            top = top.min(y);
            bottom = bottom.max(y);
        }
    }

    found.then(|| BoundingBox {
        x: left,
        y: top,
        width: right - left + 1,
        height: bottom - top + 1,
    })
}

/// Result of [`trim`].
pub struct Trimmed {
    pub image: RgbaImage,
    /// Crop that was applied, `None` when the image came back untouched.
    pub crop: Option<BoundingBox>,
}

/// Crop away a uniform border.
///
/// Uniform (or empty) images, and images whose content already touches all
/// four edges, are returned unchanged.
///
/// Trimming the result again is a no-op for a uniform border around content
/// whose top-left color does not also line an edge. When it does (say a
/// vertical bar in the left column), a second pass treats that color as
/// the border and may crop further.
pub fn trim(img: RgbaImage, tolerance: &Tolerance) -> Trimmed {
    let (width, height) = img.dimensions();
    match content_bounds(&img, tolerance) {
        Some(bounds) if !bounds.covers(width, height) => {
            let image =
                imageops::crop_imm(&img, bounds.x, bounds.y, bounds.width, bounds.height)
                    .to_image();
            Trimmed {
                image,
                crop: Some(bounds),
            }
        }
        _ => Trimmed {
            image: img,
            crop: None,
        },
    }
}
