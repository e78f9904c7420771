// THEORY:
// The `ChannelDiffEngine` is the central reusable algorithm of the comparison engine.
// Given two images of identical shape, already in the same color space, it produces:
//
// 1.  A difference image: `diff[y, x, c] = |a[y, x, c] - b[y, x, c]|`, still 8-bit,
//     0 where the images agree and up to 255 where they disagree most.
// 2.  The per-channel mean of that difference image.
//
// The mean is accumulated as `u64` channel sums (255 * h * w cannot overflow for any
// image that fits in memory) and only divided into a float at the very end, the same
// way `Chunk::average_pixel` pooled its channels.
//
// It runs once per color space. Each call is independent and side-effect free, which
// is what lets the concurrent pipeline run the three calls on separate workers.

use crate::core_modules::frame::Image;
use crate::core_modules::pixel::pixel::CHANNELS;
use crate::core_modules::smart_pixel::smart_pixel::SmartPixel;
use crate::error::{ComparisonError, Result};

/// The difference between one pair of images in one color space.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDifference {
    /// Per-pixel absolute difference, same height/width as the pair.
    pub diff_image: Image,
    /// Arithmetic mean of each channel of `diff_image`.
    pub per_channel_mean: [f64; 3],
}

impl ChannelDifference {
    /// Unweighted mean of the three channel means.
    pub fn mean_of_means(&self) -> f64 {
        self.per_channel_mean.iter().sum::<f64>() / CHANNELS as f64
    }
}

/// Computes the per-pixel absolute difference of `a` and `b` and its channel means.
pub fn channel_difference(a: &Image, b: &Image) -> Result<ChannelDifference> {
    if a.shape() != b.shape() || a.channels() != CHANNELS {
        return Err(ComparisonError::ShapeMismatch {
            stage: "channel difference",
            left: a.shape(),
            right: b.shape(),
        });
    }
    if a.color_space() != b.color_space() {
        return Err(ComparisonError::ShapeMismatch {
            stage: "channel difference (color spaces differ)",
            left: a.shape(),
            right: b.shape(),
        });
    }

    let pixel_count = a.height() * a.width();
    let mut diff = Vec::with_capacity(pixel_count * CHANNELS);
    let mut sums = [0u64; 3];

    for (left, right) in a.pixels().zip(b.pixels()) {
        let delta = SmartPixel::new(left).delta(&SmartPixel::new(right));
        for (sum, value) in sums.iter_mut().zip(delta) {
            *sum += value as u64;
        }
        diff.extend_from_slice(&delta);
    }

    let per_channel_mean = if pixel_count == 0 {
        [0.0; 3]
    } else {
        sums.map(|sum| sum as f64 / pixel_count as f64)
    };

    Ok(ChannelDifference {
        diff_image: Image::from_parts(a.height(), a.width(), a.color_space(), diff),
        per_channel_mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionSettings;
    use crate::core_modules::color_space::{ColorSpace, convert};

    #[test]
    fn identical_images_have_zero_difference() {
        let image = Image::filled(4, 5, [12, 200, 37]).unwrap();
        let difference = channel_difference(&image, &image).unwrap();
        assert!(difference.diff_image.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(difference.per_channel_mean, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn means_are_averaged_over_all_pixels() {
        // One pixel differs by 255 in red, three pixels don't differ at all.
        let a = Image::new(2, 2, vec![255, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        let b = Image::filled(2, 2, [0, 0, 0]).unwrap();
        let difference = channel_difference(&a, &b).unwrap();
        assert_eq!(difference.per_channel_mean, [63.75, 0.0, 0.0]);
        assert_eq!(difference.diff_image.pixel(0, 0), Some([255, 0, 0]));
        assert!((difference.mean_of_means() - 21.25).abs() < 1e-12);
    }

    #[test]
    fn sums_do_not_overflow_on_large_uniform_difference() {
        let a = Image::filled(300, 300, [255, 255, 255]).unwrap();
        let b = Image::filled(300, 300, [0, 0, 0]).unwrap();
        let difference = channel_difference(&a, &b).unwrap();
        assert_eq!(difference.per_channel_mean, [255.0, 255.0, 255.0]);
    }

    #[test]
    fn rejects_different_shapes() {
        let a = Image::filled(2, 3, [0, 0, 0]).unwrap();
        let b = Image::filled(3, 2, [0, 0, 0]).unwrap();
        match channel_difference(&a, &b) {
            Err(ComparisonError::ShapeMismatch { left, right, .. }) => {
                assert_eq!((left.height, left.width), (2, 3));
                assert_eq!((right.height, right.width), (3, 2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_pairs_in_different_spaces() {
        let a = Image::filled(2, 2, [10, 20, 30]).unwrap();
        let b = convert(&a, ColorSpace::Hsv, &ConversionSettings::default()).unwrap();
        assert!(matches!(
            channel_difference(&a, &b),
            Err(ComparisonError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn diff_image_keeps_the_pair_color_space() {
        let settings = ConversionSettings::default();
        let a = convert(&Image::filled(1, 2, [200, 10, 10]).unwrap(), ColorSpace::Yuv, &settings).unwrap();
        let b = convert(&Image::filled(1, 2, [10, 200, 10]).unwrap(), ColorSpace::Yuv, &settings).unwrap();
        let difference = channel_difference(&a, &b).unwrap();
        assert_eq!(difference.diff_image.color_space(), ColorSpace::Yuv);
    }
}
