// THEORY:
// The `SmartPixel` module is the comparative counterpart of `Pixel`. A `Pixel` only
// knows about itself; a `SmartPixel` exists to quantify the difference between two
// samples taken at the same coordinate of two images that are already expressed in
// the same color space.
//
// Difference here is deliberately the simplest one: the per-channel absolute
// difference, channel by channel, with no weighting and no perceptual model. Hue is
// not treated as circular either, so hue 0 versus hue 179 reports 179, matching the
// plain `|a - b|` definition the rest of the engine aggregates.

pub mod smart_pixel {
    use crate::core_modules::pixel::pixel::{Channel, Triple};

    pub type ChannelDelta = Channel;

    /// Wraps one channel triple to compare it against another.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SmartPixel {
        pub channels: Triple,
    }

    impl SmartPixel {
        pub fn new(channels: Triple) -> Self {
            Self { channels }
        }

        /// `|self - other|` per channel. Symmetric, zero iff equal.
        pub fn delta(&self, other: &SmartPixel) -> [ChannelDelta; 3] {
            [
                self.channels[0].abs_diff(other.channels[0]),
                self.channels[1].abs_diff(other.channels[1]),
                self.channels[2].abs_diff(other.channels[2]),
            ]
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn delta_is_symmetric() {
            let a = SmartPixel::new([255, 0, 10]);
            let b = SmartPixel::new([250, 7, 10]);
            assert_eq!(a.delta(&b), [5, 7, 0]);
            assert_eq!(b.delta(&a), [5, 7, 0]);
        }

        #[test]
        fn hue_is_not_wrapped() {
            let a = SmartPixel::new([0, 0, 0]);
            let b = SmartPixel::new([179, 0, 0]);
            assert_eq!(a.delta(&b)[0], 179);
        }
    }
}
