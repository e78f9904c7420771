// THEORY:
// Every failure the comparison engine can report lives in one enum. The three core
// kinds (`InvalidImage`, `ShapeMismatch`, `UnsupportedColorSpace`) come straight out
// of the pipeline stages; the remaining variants belong to the adapters around the
// core (decoding, configuration, the concurrent branch runner). Each variant carries
// enough context (which image, which stage) for the caller to fix the input.

use std::fmt;

/// Identifies which of the two compared inputs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    First,
    Second,
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSlot::First => f.write_str("first image"),
            ImageSlot::Second => f.write_str("second image"),
        }
    }
}

/// The (height, width, channels) triple of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.height, self.width, self.channels)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    #[error("invalid {slot}: {reason}")]
    InvalidImage { slot: ImageSlot, reason: String },

    #[error("malformed buffer for {shape}: expected {expected} bytes, got {actual}")]
    MalformedBuffer {
        shape: Shape,
        expected: usize,
        actual: usize,
    },

    #[error("shape mismatch in {stage}: {left} vs {right}")]
    ShapeMismatch {
        stage: &'static str,
        left: Shape,
        right: Shape,
    },

    #[error("unsupported color space: {requested}")]
    UnsupportedColorSpace { requested: String },

    #[error("failed to decode {slot}: {source}")]
    Decode {
        slot: ImageSlot,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode diff image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("comparison worker failed: {0}")]
    Worker(String),
}

impl ComparisonError {
    pub(crate) fn invalid(slot: ImageSlot, reason: impl Into<String>) -> Self {
        ComparisonError::InvalidImage {
            slot,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComparisonError>;
