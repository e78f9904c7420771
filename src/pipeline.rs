// THEORY:
// The `pipeline` module is the top-level API of the comparison engine. It wires the
// core modules into a single call:
//
//   two raw images
//     -> SizeReconciler           (validate, crop to common top-left region)
//     -> { RGB, HSV, YUV }        (convert both cropped images)
//     -> ChannelDiffEngine x3     (diff image + per-channel means per space)
//     -> DominantFactorRanker     (first maximum over the nine channel means)
//     -> ComparisonResult
//
// The pipeline is stateless: it holds only its configuration, borrows both inputs,
// and either returns a complete result or the first error. Nothing is retried and
// nothing is kept between comparisons.

use crate::config::{ComparisonConfig, ConversionSettings};
use crate::core_modules::channel_diff::channel_difference;
use crate::core_modules::color_space::convert;
use crate::core_modules::dominant_factor::{LABEL_COUNT, collect_labels, dominant_factor};
use crate::core_modules::size_reconciler::reconcile;
use crate::error::Result;
use std::fmt;

// Re-export key data structures for the public API.
pub use crate::core_modules::channel_diff::ChannelDifference;
pub use crate::core_modules::color_space::ColorSpace;
pub use crate::core_modules::dominant_factor::ChannelLabel;
pub use crate::core_modules::frame::Image;

/// The outcome of diffing one color space.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceReport {
    pub space: ColorSpace,
    pub difference: ChannelDifference,
    /// Unweighted mean of the three channel means, for display.
    pub mean_of_means: f64,
}

impl SpaceReport {
    pub fn new(space: ColorSpace, difference: ChannelDifference) -> Self {
        Self {
            space,
            mean_of_means: difference.mean_of_means(),
            difference,
        }
    }

    pub fn diff_image(&self) -> &Image {
        &self.difference.diff_image
    }

    pub fn per_channel_mean(&self) -> [f64; 3] {
        self.difference.per_channel_mean
    }
}

/// Everything one comparison produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// The channel with the largest mean difference across all spaces.
    pub dominant: ChannelLabel,
    pub rgb: SpaceReport,
    pub hsv: SpaceReport,
    pub yuv: SpaceReport,
}

impl ComparisonResult {
    /// Ranks the nine channel means of the three per-space reports.
    pub(crate) fn from_reports(rgb: SpaceReport, hsv: SpaceReport, yuv: SpaceReport) -> Self {
        let labels = collect_labels([
            (ColorSpace::Rgb, &rgb.difference),
            (ColorSpace::Hsv, &hsv.difference),
            (ColorSpace::Yuv, &yuv.difference),
        ]);
        let dominant = dominant_factor(&labels);
        log::debug!("dominant factor: {} ({:.2})", dominant.name, dominant.value);

        Self {
            dominant,
            rgb,
            hsv,
            yuv,
        }
    }

    /// The nine labeled channel means in declaration order.
    pub fn labels(&self) -> [ChannelLabel; LABEL_COUNT] {
        collect_labels([
            (ColorSpace::Rgb, &self.rgb.difference),
            (ColorSpace::Hsv, &self.hsv.difference),
            (ColorSpace::Yuv, &self.yuv.difference),
        ])
    }

    pub fn space(&self, space: ColorSpace) -> &SpaceReport {
        match space {
            ColorSpace::Rgb => &self.rgb,
            ColorSpace::Hsv => &self.hsv,
            ColorSpace::Yuv => &self.yuv,
        }
    }

    /// (height, width) of the reconciled pair, shared by all diff images.
    pub fn dimensions(&self) -> (usize, usize) {
        let diff = self.rgb.diff_image();
        (diff.height(), diff.width())
    }
}

/// Formats a reported scalar with exactly two decimals.
pub fn format_scalar(value: f64) -> String {
    format!("{:.2}", value)
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Most Contributing Factor: {} ({})",
            self.dominant.name,
            format_scalar(self.dominant.value)
        )?;
        for space in ColorSpace::ALL {
            let report = self.space(space);
            writeln!(f, "Mean difference in {}: {}", space, format_scalar(report.mean_of_means))?;
            for (name, mean) in space.channel_short_names().iter().zip(report.per_channel_mean()) {
                writeln!(f, "- {}: {}", name, format_scalar(mean))?;
            }
        }
        Ok(())
    }
}

/// Converts both cropped images into `space` and diffs them.
pub(crate) fn diff_space(
    first: &Image,
    second: &Image,
    space: ColorSpace,
    settings: &ConversionSettings,
) -> Result<SpaceReport> {
    let converted_first = convert(first, space, settings)?;
    let converted_second = convert(second, space, settings)?;
    let difference = channel_difference(&converted_first, &converted_second)?;
    log::debug!(
        "{} channel means: [{:.2}, {:.2}, {:.2}]",
        space,
        difference.per_channel_mean[0],
        difference.per_channel_mean[1],
        difference.per_channel_mean[2]
    );
    Ok(SpaceReport::new(space, difference))
}

/// The main, top-level struct for the comparison engine.
#[derive(Debug, Clone, Default)]
pub struct ComparisonPipeline {
    config: ComparisonConfig,
}

impl ComparisonPipeline {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Compares two images in every color space, one space after another.
    pub fn compare(&self, first: &Image, second: &Image) -> Result<ComparisonResult> {
        // Stage 1: Size Reconciliation
        let (first, second) = reconcile(first, second)?;

        // Stage 2: Per-Space Conversion and Difference
        let settings = &self.config.conversion;
        let rgb = diff_space(&first, &second, ColorSpace::Rgb, settings)?;
        let hsv = diff_space(&first, &second, ColorSpace::Hsv, settings)?;
        let yuv = diff_space(&first, &second, ColorSpace::Yuv, settings)?;

        // Stage 3: Ranking
        Ok(ComparisonResult::from_reports(rgb, hsv, yuv))
    }
}

/// Compares two images with the default configuration.
pub fn compare(first: &Image, second: &Image) -> Result<ComparisonResult> {
    ComparisonPipeline::default().compare(first, second)
}
