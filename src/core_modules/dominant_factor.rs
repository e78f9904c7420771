// THEORY:
// Once every color space has been diffed, nine channel means exist: R, G, B, Hue,
// Saturation, Value, Y, U, V, always in that order. The dominant factor is the single
// channel whose mean difference is largest across all three spaces.
//
// Ties resolve to the channel declared first. The ranker walks the labels in order and
// replaces its best-so-far only on a strictly greater value, so the first maximum wins
// regardless of how the labels were produced.

use crate::core_modules::channel_diff::ChannelDifference;
use crate::core_modules::color_space::ColorSpace;

pub const LABEL_COUNT: usize = 9;

/// A human-readable channel name paired with its mean difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelLabel {
    pub name: &'static str,
    pub value: f64,
}

/// Lays out the nine labels in declaration order from the per-space results.
pub fn collect_labels(differences: [(ColorSpace, &ChannelDifference); 3]) -> [ChannelLabel; LABEL_COUNT] {
    let mut labels = [ChannelLabel {
        name: "",
        value: 0.0,
    }; LABEL_COUNT];

    for (space_index, (space, difference)) in differences.iter().enumerate() {
        for (channel, name) in space.channel_labels().iter().enumerate() {
            labels[space_index * 3 + channel] = ChannelLabel {
                name: *name,
                value: difference.per_channel_mean[channel],
            };
        }
    }
    labels
}

/// The first label holding the maximum value.
pub fn dominant_factor(labels: &[ChannelLabel; LABEL_COUNT]) -> ChannelLabel {
    let mut best = labels[0];
    for label in &labels[1..] {
        if label.value > best.value {
            best = *label;
        }
    }
    best
}
