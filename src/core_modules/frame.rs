// THEORY:
// The `Image` is the data container every stage of the comparison engine passes
// around: an owned, row-major, interleaved buffer of 8-bit samples plus its
// dimensions and the color space its channels are expressed in.
//
// Like `Pixel`, it is "dumb". Construction only checks that the buffer length agrees
// with the declared dimensions; whether an image is *usable* for a comparison (non-zero
// size, exactly three channels) is a separate question answered by `validate`, so the
// reconciler can reject bad inputs while still naming which input was bad.
//
// Images are immutable once built. Every transform (crop, per-pixel map) returns a new
// `Image` and leaves the source untouched.

use crate::core_modules::color_space::ColorSpace;
use crate::core_modules::pixel::pixel::{CHANNELS, Channel, Triple};
use crate::error::{ComparisonError, ImageSlot, Result, Shape};
use image::RgbImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    height: usize,
    width: usize,
    channels: usize,
    space: ColorSpace,
    data: Vec<Channel>,
}

impl Image {
    /// Creates an RGB image from an interleaved `height * width * 3` buffer.
    pub fn new(height: usize, width: usize, data: Vec<Channel>) -> Result<Self> {
        Self::from_raw_channels(height, width, CHANNELS, data)
    }

    /// Creates an RGB-tagged image with an arbitrary channel count. Only 3-channel
    /// images pass `validate`; other counts exist so callers can hand over whatever
    /// they decoded and get a proper rejection.
    pub fn from_raw_channels(
        height: usize,
        width: usize,
        channels: usize,
        data: Vec<Channel>,
    ) -> Result<Self> {
        let shape = Shape {
            height,
            width,
            channels,
        };
        let expected = sample_count(shape, data.len())?;
        if data.len() != expected {
            return Err(ComparisonError::MalformedBuffer {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            height,
            width,
            channels,
            space: ColorSpace::Rgb,
            data,
        })
    }

    /// A solid RGB image, mostly useful for building test fixtures.
    pub fn filled(height: usize, width: usize, color: Triple) -> Result<Self> {
        let shape = Shape {
            height,
            width,
            channels: CHANNELS,
        };
        let samples = sample_count(shape, 0)?;
        let data = color.iter().copied().cycle().take(samples).collect();
        Self::new(height, width, data)
    }

    /// Checks the comparison preconditions: height >= 1, width >= 1, three channels.
    pub fn validate(&self, slot: ImageSlot) -> Result<()> {
        if self.height == 0 {
            return Err(ComparisonError::invalid(slot, "image has zero height"));
        }
        if self.width == 0 {
            return Err(ComparisonError::invalid(slot, "image has zero width"));
        }
        if self.channels != CHANNELS {
            return Err(ComparisonError::invalid(
                slot,
                format!("expected {} channels, found {}", CHANNELS, self.channels),
            ));
        }
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn shape(&self) -> Shape {
        Shape {
            height: self.height,
            width: self.width,
            channels: self.channels,
        }
    }

    pub fn color_space(&self) -> ColorSpace {
        self.space
    }

    pub fn as_bytes(&self) -> &[Channel] {
        &self.data
    }

    /// The channel triple at row `y`, column `x`. Only meaningful for 3-channel images.
    pub fn pixel(&self, y: usize, x: usize) -> Option<Triple> {
        if self.channels != CHANNELS || y >= self.height || x >= self.width {
            return None;
        }
        let start = (y * self.width + x) * CHANNELS;
        Some([self.data[start], self.data[start + 1], self.data[start + 2]])
    }

    /// Iterates the channel triples in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Triple> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|chunk| [chunk[0], chunk[1], chunk[2]])
    }

    /// Top-left `height x width` region, copied into a new image. The caller guarantees
    /// the region fits.
    pub(crate) fn crop_top_left(&self, height: usize, width: usize) -> Self {
        if height == self.height && width == self.width {
            return self.clone();
        }
        let row_bytes = width * self.channels;
        let mut data = Vec::with_capacity(height * row_bytes);
        for row in self.data.chunks_exact(self.width * self.channels).take(height) {
            data.extend_from_slice(&row[..row_bytes]);
        }
        Self {
            height,
            width,
            channels: self.channels,
            space: self.space,
            data,
        }
    }

    /// Applies `transform` to every pixel, producing an image tagged with `space`.
    pub(crate) fn map_pixels<F>(&self, space: ColorSpace, transform: F) -> Self
    where
        F: Fn(Triple) -> Triple,
    {
        let data = self.pixels().flat_map(transform).collect();
        Self {
            height: self.height,
            width: self.width,
            channels: CHANNELS,
            space,
            data,
        }
    }

    /// Assembles an image from a buffer the engine itself produced with this exact shape.
    pub(crate) fn from_parts(height: usize, width: usize, space: ColorSpace, data: Vec<Channel>) -> Self {
        debug_assert_eq!(data.len(), height * width * CHANNELS);
        Self {
            height,
            width,
            channels: CHANNELS,
            space,
            data,
        }
    }

    /// Copies the samples into an `image::RgbImage` for display or encoding. The three
    /// channels are written as-is, whatever space they are in. `None` for buffers that
    /// aren't 3-channel or whose size does not fit `u32`.
    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        if self.channels != CHANNELS {
            return None;
        }
        let width = u32::try_from(self.width).ok()?;
        let height = u32::try_from(self.height).ok()?;
        RgbImage::from_raw(width, height, self.data.clone())
    }
}

/// `height * width * channels`, or `MalformedBuffer` if the product overflows.
fn sample_count(shape: Shape, actual: usize) -> Result<usize> {
    shape
        .height
        .checked_mul(shape.width)
        .and_then(|pixels| pixels.checked_mul(shape.channels))
        .ok_or(ComparisonError::MalformedBuffer {
            shape,
            expected: usize::MAX,
            actual,
        })
}

impl From<RgbImage> for Image {
    fn from(buffer: RgbImage) -> Self {
        let (width, height) = buffer.dimensions();
        Self::from_parts(height as usize, width as usize, ColorSpace::Rgb, buffer.into_raw())
    }
}
