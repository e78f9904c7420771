// THEORY:
// Tunable behavior for the comparison engine. Only two numeric conventions affect
// the literal output: the scale hue is stored in, and the mid-level bias added to
// the YUV chrominance channels. Both must be applied identically to the two images
// of a pair, which is why they live in one immutable settings value that every
// conversion of a comparison receives. Neither changes which channel ranks highest
// for a given pair; they only change absolute magnitudes.
//
// Defaults follow the OpenCV 8-bit conventions (hue in 0..=179, chroma bias 128) so
// numbers line up with what users of that library expect.

use crate::error::{ComparisonError, Result};
use std::str::FromStr;

pub const ENV_HUE_SCALE: &str = "CHROMA_DIFF_HUE_SCALE";
pub const ENV_CHROMA_BIAS: &str = "CHROMA_DIFF_CHROMA_BIAS";
pub const ENV_PARALLEL: &str = "CHROMA_DIFF_PARALLEL";

/// How the hue angle (0..360 degrees) is packed into an 8-bit channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HueScale {
    /// Half-degrees, 0..=179.
    #[default]
    Half,
    /// Full byte range, 0..=255.
    Full,
}

impl HueScale {
    /// Number of distinct stored hue values; the stored hue wraps at this value.
    pub fn range(self) -> u16 {
        match self {
            HueScale::Half => 180,
            HueScale::Full => 256,
        }
    }

    pub fn degrees_to_stored(self, degrees: f32) -> u8 {
        let scaled = match self {
            HueScale::Half => degrees / 2.0,
            HueScale::Full => degrees * 255.0 / 360.0,
        };
        (scaled.round() as u16 % self.range()) as u8
    }

    pub fn stored_to_degrees(self, stored: u8) -> f32 {
        match self {
            HueScale::Half => stored as f32 * 2.0,
            HueScale::Full => stored as f32 * 360.0 / 255.0,
        }
    }
}

impl FromStr for HueScale {
    type Err = ComparisonError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "half" | "180" => Ok(HueScale::Half),
            "full" | "255" | "256" => Ok(HueScale::Full),
            other => Err(ComparisonError::Config(format!(
                "unknown hue scale '{}' (expected half or full)",
                other
            ))),
        }
    }
}

/// Conversion conventions shared by both images of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSettings {
    pub hue_scale: HueScale,
    /// Offset added to the U and V channels to keep them unsigned.
    pub chroma_bias: u8,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            hue_scale: HueScale::Half,
            chroma_bias: 128,
        }
    }
}

/// Configuration for the `ComparisonPipeline`.
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    pub conversion: ConversionSettings,
    /// Run the three color-space branches on worker threads. Results are identical
    /// either way.
    pub parallel_branches: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            conversion: ConversionSettings::default(),
            parallel_branches: num_cpus::get() > 1,
        }
    }
}

impl ComparisonConfig {
    /// Default configuration overlaid with any `CHROMA_DIFF_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup. Split out from
    /// `from_env` so tests don't have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(scale) = lookup(ENV_HUE_SCALE) {
            config.conversion.hue_scale = scale.parse()?;
        }
        if let Some(bias) = lookup(ENV_CHROMA_BIAS) {
            config.conversion.chroma_bias = bias.trim().parse().map_err(|_| {
                ComparisonError::Config(format!(
                    "{} must be an integer in 0..=255, got '{}'",
                    ENV_CHROMA_BIAS, bias
                ))
            })?;
        }
        if let Some(parallel) = lookup(ENV_PARALLEL) {
            config.parallel_branches = parse_flag(&parallel).ok_or_else(|| {
                ComparisonError::Config(format!(
                    "{} must be a boolean, got '{}'",
                    ENV_PARALLEL, parallel
                ))
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_follow_opencv_conventions() {
        let config = ComparisonConfig::default();
        assert_eq!(config.conversion.hue_scale, HueScale::Half);
        assert_eq!(config.conversion.chroma_bias, 128);
    }

    #[test]
    fn lookup_overrides_every_field() {
        let config = ComparisonConfig::from_lookup(lookup_from(&[
            (ENV_HUE_SCALE, "full"),
            (ENV_CHROMA_BIAS, "100"),
            (ENV_PARALLEL, "off"),
        ]))
        .expect("valid config");

        assert_eq!(config.conversion.hue_scale, HueScale::Full);
        assert_eq!(config.conversion.chroma_bias, 100);
        assert!(!config.parallel_branches);
    }

    #[test]
    fn rejects_out_of_range_bias() {
        let result = ComparisonConfig::from_lookup(lookup_from(&[(ENV_CHROMA_BIAS, "300")]));
        assert!(matches!(result, Err(ComparisonError::Config(_))));
    }

    #[test]
    fn rejects_unknown_hue_scale() {
        assert!("degrees".parse::<HueScale>().is_err());
        assert_eq!("180".parse::<HueScale>().unwrap(), HueScale::Half);
    }

    #[test]
    fn hue_wraps_at_scale_range() {
        assert_eq!(HueScale::Half.degrees_to_stored(359.5), 0);
        assert_eq!(HueScale::Half.degrees_to_stored(120.0), 60);
        assert_eq!(HueScale::Full.degrees_to_stored(359.9), 255);
        assert_eq!(HueScale::Full.degrees_to_stored(180.0), 128);
    }
}
