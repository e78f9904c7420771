// THEORY:
// This file is the main entry point for the `chroma_diff` library crate.
// It exposes a single high-level operation, `compare(&Image, &Image)`, which
// quantifies how two images differ in the RGB, HSV and YUV color spaces and
// names the channel that changed the most.
//
// The public surface is the `pipeline` (sequential), the `parallel_pipeline`
// (the same computation with the three color-space branches on worker threads),
// `config` and `error`. The building blocks in `core_modules` stay public so the
// individual stages can be reused and tested on their own.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use config::{ComparisonConfig, ConversionSettings, HueScale};
pub use error::{ComparisonError, ImageSlot};
pub use pipeline::{ChannelLabel, ColorSpace, ComparisonPipeline, ComparisonResult, Image, SpaceReport, compare};
