//! Per-pixel recolor passes.
//!
//! Two fixed heuristics used when preparing logo variants:
//!
//! - [`DarkRule`]: dark pixels (low red and green) become white, for a
//!   dark-mode logo where a navy wordmark must stay readable.
//! - [`WhiteRule`]: near-white pixels become fully transparent, to drop a
//!   flat white background.
//!
//! Both are pure functions over a single [`Rgba`] pixel, applied to a whole
//! [`RgbaImage`] by [`recolor_image`].

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

const WHITE: [u8; 3] = [255, 255, 255];
const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Images with at least this many pixels are recolored in parallel.
const PARALLEL_PIXEL_THRESHOLD: usize = 32 * 1024;

/// Turn dark pixels white.
///
/// A pixel is dark when `red < red_below` and `green < green_below`.
/// Blue is never inspected, so a teal accent (high green) survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DarkRule {
    pub red_below: u8,
    pub green_below: u8,
}

impl Default for DarkRule {
    fn default() -> Self {
        Self {
            red_below: 100,
            green_below: 100,
        }
    }
}

impl DarkRule {
    /// Apply to one pixel. Fully transparent pixels are returned as-is.
    #[inline]
    pub fn apply(&self, pixel: Rgba<u8>) -> Rgba<u8> {
        let [r, g, _, a] = pixel.0;
        if a == 0 {
            return pixel;
        }
        if r < self.red_below && g < self.green_below {
            Rgba([WHITE[0], WHITE[1], WHITE[2], a])
        } else {
            pixel
        }
    }
}

/// Turn near-white pixels into transparent white.
///
/// A pixel is near-white when all three color channels are strictly
/// above `threshold`. Alpha does not take part in the test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhiteRule {
    pub threshold: u8,
}

impl Default for WhiteRule {
    fn default() -> Self {
        Self { threshold: 240 }
    }
}

impl WhiteRule {
    #[inline]
    pub fn apply(&self, pixel: Rgba<u8>) -> Rgba<u8> {
        let [r, g, b, _] = pixel.0;
        if r > self.threshold && g > self.threshold && b > self.threshold {
            TRANSPARENT_WHITE
        } else {
            pixel
        }
    }
}

/// Apply a per-pixel rule to every pixel of `img` in place.
///
/// Returns the number of pixels whose value changed.
pub fn recolor_image<F>(img: &mut RgbaImage, rule: F) -> usize
where
    F: Fn(Rgba<u8>) -> Rgba<u8> + Sync,
{
    let len = img.width() as usize * img.height() as usize;
    let raw: &mut [u8] = img;

    if len >= PARALLEL_PIXEL_THRESHOLD {
        raw.par_chunks_exact_mut(4)
            .map(|chunk| recolor_chunk(chunk, &rule))
            .sum()
    } else {
        raw.chunks_exact_mut(4)
            .map(|chunk| recolor_chunk(chunk, &rule))
            .sum()
    }
}

#[inline]
fn recolor_chunk<F>(chunk: &mut [u8], rule: &F) -> usize
where
    F: Fn(Rgba<u8>) -> Rgba<u8>,
{
    let before = Rgba([chunk[0], chunk[1], chunk[2], chunk[3]]);
    let after = rule(before);
    if after == before {
        return 0;
    }
    chunk.copy_from_slice(&after.0);
    1
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    #[test]
    fn dark_blue_becomes_white() {
        let rule = DarkRule::default();
        assert_eq!(
            rule.apply(Rgba([50, 50, 200, 255])),
            Rgba([255, 255, 255, 255])
        );
    }

    #[test]
    fn brand_green_is_kept() {
        let rule = DarkRule::default();
        let green = Rgba([38, 166, 154, 255]);
        assert_eq!(rule.apply(green), green);
    }

    #[test]
    fn dark_keeps_alpha() {
        let rule = DarkRule::default();
        assert_eq!(rule.apply(Rgba([0, 0, 100, 77])), Rgba([255, 255, 255, 77]));
    }

    #[test]
    fn dark_skips_transparent_pixels() {
        let rule = DarkRule::default();
        for px in [Rgba([0, 0, 0, 0]), Rgba([12, 34, 56, 0])] {
            assert_eq!(rule.apply(px), px);
        }
    }

    #[test]
    fn dark_limits_are_strict() {
        let rule = DarkRule::default();
        let edge = Rgba([100, 10, 10, 255]);
        assert_eq!(rule.apply(edge), edge);
        let edge = Rgba([10, 100, 10, 255]);
        assert_eq!(rule.apply(edge), edge);
        assert_eq!(
            rule.apply(Rgba([99, 99, 255, 255])),
            Rgba([255, 255, 255, 255])
        );
    }

    #[test]
    fn dark_with_custom_limits() {
        let rule = DarkRule {
            red_below: 20,
            green_below: 20,
        };
        let px = Rgba([50, 50, 50, 255]);
        assert_eq!(rule.apply(px), px);
        assert_eq!(rule.apply(Rgba([5, 5, 5, 255])), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn near_white_becomes_transparent() {
        let rule = WhiteRule::default();
        assert_eq!(rule.apply(Rgba([241, 250, 255, 255])), TRANSPARENT_WHITE);
        assert_eq!(rule.apply(Rgba([255, 255, 255, 255])), TRANSPARENT_WHITE);
    }

    #[test]
    fn white_threshold_is_strict() {
        let rule = WhiteRule::default();
        let px = Rgba([240, 255, 255, 255]);
        assert_eq!(rule.apply(px), px);
        let px = Rgba([255, 255, 240, 255]);
        assert_eq!(rule.apply(px), px);
    }

    #[test]
    fn white_ignores_alpha() {
        let rule = WhiteRule::default();
        assert_eq!(rule.apply(Rgba([250, 250, 250, 3])), TRANSPARENT_WHITE);
    }

    #[test]
    fn recolor_image_counts_changes() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([38, 166, 154, 255]));
        img.put_pixel(0, 0, Rgba([10, 10, 80, 255]));
        img.put_pixel(2, 1, Rgba([10, 10, 80, 0]));

        let rule = DarkRule::default();
        let changed = recolor_image(&mut img, |px| rule.apply(px));

        assert_eq!(changed, 1);
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(1, 0), Rgba([38, 166, 154, 255]));
        assert_eq!(*img.get_pixel(2, 1), Rgba([10, 10, 80, 0]));
    }

    #[test]
    fn already_transparent_white_is_not_counted() {
        let mut img = RgbaImage::from_pixel(2, 2, TRANSPARENT_WHITE);
        let rule = WhiteRule::default();
        assert_eq!(recolor_image(&mut img, |px| rule.apply(px)), 0);
    }

    /// Recolor `img` through the parallel path and check every pixel
    /// against a per-pixel application of `rule`.
    fn assert_matches_sequential(mut img: RgbaImage, rule: impl Fn(Rgba<u8>) -> Rgba<u8> + Sync) {
        assert!(img.len() / 4 >= PARALLEL_PIXEL_THRESHOLD);
        let original = img.clone();

        let changed = recolor_image(&mut img, &rule);

        let mut expected_changed = 0;
        for (x, y, px) in original.enumerate_pixels() {
            let expected = rule(*px);
            if expected != *px {
                expected_changed += 1;
            }
            assert_eq!(*img.get_pixel(x, y), expected, "pixel ({x}, {y})");
        }
        assert!(expected_changed > 0);
        assert_eq!(changed, expected_changed);
    }

    #[test]
    fn parallel_pass_matches_sequential() {
        let img = RgbaImage::from_fn(256, 256, |x, y| {
            Rgba([x as u8, y as u8, (x ^ y) as u8, (x + y) as u8])
        });
        let rule = DarkRule::default();
        assert_matches_sequential(img, |px| rule.apply(px));
    }

    #[test]
    fn parallel_white_pass_matches_sequential() {
        // Gradient toward white in the bottom-right corner; only that corner
        // crosses the threshold.
        let img = RgbaImage::from_fn(256, 256, |x, y| {
            Rgba([x as u8, y as u8, ((x + y) / 2) as u8, 255 - (x / 2) as u8])
        });
        let rule = WhiteRule::default();
        assert_matches_sequential(img, |px| rule.apply(px));
    }
}
