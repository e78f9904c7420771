// THEORY:
// The RGB, HSV and YUV branches of a comparison share nothing but the two read-only
// cropped inputs, so they can run at the same time. This module does exactly that:
// reconcile once on the calling task, hand the cropped pair to three blocking workers
// behind `Arc`s, and join them. The assembled result is bit-identical to the
// sequential `ComparisonPipeline`; only the wall-clock time changes.
//
// Blocking workers (`spawn_blocking`) are used rather than plain tasks because each
// branch is a tight CPU loop with no await points.

use crate::config::{ComparisonConfig, ConversionSettings};
use crate::core_modules::color_space::ColorSpace;
use crate::core_modules::frame::Image;
use crate::core_modules::size_reconciler::reconcile;
use crate::error::{ComparisonError, Result};
use crate::pipeline::{ComparisonPipeline, ComparisonResult, SpaceReport, diff_space};
use futures::future::try_join3;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Runs one color-space branch on the blocking pool.
fn spawn_branch(
    first: Arc<Image>,
    second: Arc<Image>,
    space: ColorSpace,
    settings: ConversionSettings,
) -> JoinHandle<Result<SpaceReport>> {
    tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        let report = diff_space(&first, &second, space, &settings);
        log::trace!("{} branch finished in {:?}", space, started.elapsed());
        report
    })
}

async fn join_branch(handle: JoinHandle<Result<SpaceReport>>) -> Result<SpaceReport> {
    handle
        .await
        .map_err(|error| ComparisonError::Worker(error.to_string()))?
}

/// Compares two images, running the three color-space branches concurrently.
pub async fn compare_concurrent(
    first: &Image,
    second: &Image,
    config: &ComparisonConfig,
) -> Result<ComparisonResult> {
    let (first, second) = reconcile(first, second)?;
    let first = Arc::new(first);
    let second = Arc::new(second);
    let settings = config.conversion;

    let branches = ColorSpace::ALL
        .map(|space| spawn_branch(Arc::clone(&first), Arc::clone(&second), space, settings));
    let [rgb, hsv, yuv] = branches;

    let (rgb, hsv, yuv) = try_join3(join_branch(rgb), join_branch(hsv), join_branch(yuv)).await?;
    Ok(ComparisonResult::from_reports(rgb, hsv, yuv))
}

/// Chooses between the sequential and concurrent paths according to
/// `ComparisonConfig::parallel_branches`.
pub struct ParallelPipeline {
    config: ComparisonConfig,
}

impl ParallelPipeline {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub async fn compare(&self, first: &Image, second: &Image) -> Result<ComparisonResult> {
        if self.config.parallel_branches {
            compare_concurrent(first, second, &self.config).await
        } else {
            ComparisonPipeline::new(self.config.clone()).compare(first, second)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(height: usize, width: usize, seed: u8) -> Image {
        let data = (0..height * width * 3)
            .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
            .collect();
        Image::new(height, width, data).unwrap()
    }

    #[tokio::test]
    async fn concurrent_matches_sequential() {
        let a = gradient(17, 23, 3);
        let b = gradient(19, 21, 101);
        let config = ComparisonConfig::default();

        let sequential = ComparisonPipeline::new(config.clone()).compare(&a, &b).unwrap();
        let concurrent = compare_concurrent(&a, &b, &config).await.unwrap();

        assert_eq!(sequential, concurrent);
    }

    #[tokio::test]
    async fn both_modes_agree_through_the_switch() {
        let a = gradient(8, 8, 0);
        let b = gradient(8, 8, 50);

        let mut config = ComparisonConfig::default();
        config.parallel_branches = true;
        let parallel = ParallelPipeline::new(config.clone()).compare(&a, &b).await.unwrap();
        config.parallel_branches = false;
        let sequential = ParallelPipeline::new(config).compare(&a, &b).await.unwrap();

        assert_eq!(parallel, sequential);
    }

    #[tokio::test]
    async fn invalid_input_fails_before_spawning() {
        let a = gradient(4, 4, 0);
        let b = Image::from_raw_channels(4, 4, 1, vec![0; 16]).unwrap();
        let result = compare_concurrent(&a, &b, &ComparisonConfig::default()).await;
        assert!(matches!(result, Err(ComparisonError::InvalidImage { .. })));
    }
}
