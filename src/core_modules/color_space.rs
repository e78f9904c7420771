// THEORY:
// The color-space converter lifts the single-pixel transforms of `Pixel` to whole
// images. Input is always an RGB-tagged `Image`; output is a same-shaped image whose
// three channels are reinterpreted under the target model:
//
//   Rgb -> Rgb   identity (a copy)
//   Rgb -> Hsv   (hue, saturation, value)
//   Rgb -> Yuv   (luminance, chrominance U, chrominance V)
//
// The conversion is a pure per-pixel map with no cross-pixel state, so identical input
// always yields byte-identical output. Both images of a pair must be converted with the
// same `ConversionSettings`, otherwise their difference is meaningless.

use crate::config::ConversionSettings;
use crate::core_modules::frame::Image;
use crate::core_modules::pixel::pixel::Pixel;
use crate::error::{ComparisonError, Result};
use std::fmt;
use std::str::FromStr;

/// How the three channels of an `Image` are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Rgb,
    Hsv,
    Yuv,
}

impl ColorSpace {
    /// Fixed declaration order; ranking ties resolve in this order.
    pub const ALL: [ColorSpace; 3] = [ColorSpace::Rgb, ColorSpace::Hsv, ColorSpace::Yuv];

    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::Hsv => "HSV",
            ColorSpace::Yuv => "YUV",
        }
    }

    /// Names used when the channels take part in the cross-space ranking.
    pub fn channel_labels(self) -> [&'static str; 3] {
        match self {
            ColorSpace::Rgb => ["Red (R)", "Green (G)", "Blue (B)"],
            ColorSpace::Hsv => ["Hue", "Saturation", "Value (Brightness)"],
            ColorSpace::Yuv => ["Luminance (Y)", "Chrominance (U)", "Chrominance (V)"],
        }
    }

    /// Shorter names used when listing the channels under their own space.
    pub fn channel_short_names(self) -> [&'static str; 3] {
        match self {
            ColorSpace::Rgb => ["R", "G", "B"],
            ColorSpace::Hsv => ["Hue", "Saturation", "Brightness (Value)"],
            ColorSpace::Yuv => ["Y (Luminance)", "U (Chrominance)", "V (Chrominance)"],
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = ComparisonError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag.trim().to_lowercase().as_str() {
            "rgb" => Ok(ColorSpace::Rgb),
            "hsv" => Ok(ColorSpace::Hsv),
            "yuv" => Ok(ColorSpace::Yuv),
            _ => Err(ComparisonError::UnsupportedColorSpace {
                requested: tag.to_string(),
            }),
        }
    }
}

/// Converts an RGB image into `target`.
pub fn convert(image: &Image, target: ColorSpace, settings: &ConversionSettings) -> Result<Image> {
    if image.color_space() != ColorSpace::Rgb {
        return Err(ComparisonError::UnsupportedColorSpace {
            requested: format!("{} -> {}", image.color_space(), target),
        });
    }

    let converted = match target {
        ColorSpace::Rgb => image.clone(),
        ColorSpace::Hsv => {
            let hue_scale = settings.hue_scale;
            image.map_pixels(ColorSpace::Hsv, |rgb| Pixel::from(rgb).to_hsv(hue_scale))
        }
        ColorSpace::Yuv => {
            let bias = settings.chroma_bias;
            image.map_pixels(ColorSpace::Yuv, |rgb| Pixel::from(rgb).to_yuv(bias))
        }
    };
    Ok(converted)
}

/// Like `convert`, with the target given by name (`"rgb"`, `"hsv"`, `"yuv"`).
pub fn convert_named(image: &Image, target: &str, settings: &ConversionSettings) -> Result<Image> {
    convert(image, target.parse()?, settings)
}
