// THEORY (1D Pixel Conversions):
// The `Pixel` module is the most fundamental unit of the comparison engine. It is a
// "dumb" data container for a single RGB pixel plus the single-pixel transforms the
// engine needs: RGB -> HSV, RGB -> YUV and the HSV -> RGB inverse. Nothing here knows
// about neighbors or about the other image of a pair; pairwise logic lives in
// `SmartPixel`, whole-image logic in `color_space` and `channel_diff`.
//
// Numeric conventions (8-bit in, 8-bit out):
// - HSV:  V = max(R,G,B); S = 255 * (V - min) / V; hue is the usual sector angle in
//         degrees, packed into a byte according to `HueScale` (half-degrees by default).
// - YUV:  Rec. 601 luma weights for Y; U and V are scaled blue/red color differences
//         (0.492 and 0.877), shifted by the configured chroma bias and saturated.
//
// Every float -> byte step rounds half away from zero and clamps to 0..=255. The math
// is plain `f32` so the same pixel always produces the same bytes.

pub mod pixel {
    use crate::config::HueScale;

    pub type Byte = u8;
    pub type Channel = Byte;
    pub type Triple = [Channel; 3];
    pub type Hue = f32;
    pub type Luminance = f32;

    pub const CHANNELS: usize = 3;

    const LUMA_RED: f32 = 0.299;
    const LUMA_GREEN: f32 = 0.587;
    const LUMA_BLUE: f32 = 0.114;
    const CHROMA_BLUE_SCALE: f32 = 0.492;
    const CHROMA_RED_SCALE: f32 = 0.877;

    /// A "dumb" data container representing a single RGB pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel { red, green, blue }
        }

        fn maximum_channel(&self) -> Channel {
            self.red.max(self.green.max(self.blue))
        }

        fn minimum_channel(&self) -> Channel {
            self.red.min(self.green.min(self.blue))
        }

        /// Luminance estimate (Rec. 601 luma), unrounded.
        pub fn luminance(&self) -> Luminance {
            LUMA_RED * self.red as f32 + LUMA_GREEN * self.green as f32 + LUMA_BLUE * self.blue as f32
        }

        /// Hue angle in degrees [0, 360). Gray pixels report 0.
        pub fn hue_degrees(&self) -> Hue {
            let maximum = self.maximum_channel();
            let chroma = (maximum - self.minimum_channel()) as f32;
            if chroma == 0.0 {
                return 0.0;
            }

            let (red, green, blue) = (self.red as f32, self.green as f32, self.blue as f32);
            let mut hue_degrees = if maximum == self.red {
                60.0 * (green - blue) / chroma
            } else if maximum == self.green {
                120.0 + 60.0 * (blue - red) / chroma
            } else {
                240.0 + 60.0 * (red - green) / chroma
            };
            if hue_degrees < 0.0 {
                hue_degrees += 360.0;
            }
            hue_degrees
        }

        /// HSV triple packed into bytes: (hue, saturation, value).
        pub fn to_hsv(&self, hue_scale: HueScale) -> Triple {
            let value = self.maximum_channel();
            let chroma = value - self.minimum_channel();
            let saturation = if value == 0 {
                0
            } else {
                saturate(255.0 * chroma as f32 / value as f32)
            };
            [hue_scale.degrees_to_stored(self.hue_degrees()), saturation, value]
        }

        /// YUV triple: luma plus biased blue/red color differences.
        pub fn to_yuv(&self, chroma_bias: Channel) -> Triple {
            let luma = self.luminance();
            let bias = chroma_bias as f32;
            let u = CHROMA_BLUE_SCALE * (self.blue as f32 - luma) + bias;
            let v = CHROMA_RED_SCALE * (self.red as f32 - luma) + bias;
            [saturate(luma), saturate(u), saturate(v)]
        }

        /// Inverse of `to_hsv`, up to rounding.
        pub fn from_hsv(hsv: Triple, hue_scale: HueScale) -> Self {
            let [hue, saturation, value] = hsv;
            let value_f = value as f32;
            if saturation == 0 {
                return Pixel::new(value, value, value);
            }

            let chroma = value_f * saturation as f32 / 255.0;
            let sector = hue_scale.stored_to_degrees(hue) / 60.0;
            let secondary = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
            let minimum = value_f - chroma;

            let (red, green, blue) = match sector as u32 {
                0 => (chroma, secondary, 0.0),
                1 => (secondary, chroma, 0.0),
                2 => (0.0, chroma, secondary),
                3 => (0.0, secondary, chroma),
                4 => (secondary, 0.0, chroma),
                _ => (chroma, 0.0, secondary),
            };

            Pixel::new(
                saturate(red + minimum),
                saturate(green + minimum),
                saturate(blue + minimum),
            )
        }
    }

    /// Round half away from zero, then clamp into the byte range.
    #[inline]
    pub fn saturate(value: f32) -> Channel {
        value.round().clamp(0.0, 255.0) as Channel
    }

    impl From<Triple> for Pixel {
        fn from(bytes: Triple) -> Self {
            Pixel::new(bytes[0], bytes[1], bytes[2])
        }
    }

    impl From<Pixel> for Triple {
        fn from(pixel: Pixel) -> Self {
            [pixel.red, pixel.green, pixel.blue]
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn pure_red_hsv() {
            assert_eq!(Pixel::new(255, 0, 0).to_hsv(HueScale::Half), [0, 255, 255]);
            assert_eq!(Pixel::new(250, 0, 0).to_hsv(HueScale::Half), [0, 255, 250]);
        }

        #[test]
        fn primary_hues_on_both_scales() {
            assert_eq!(Pixel::new(0, 255, 0).to_hsv(HueScale::Half)[0], 60);
            assert_eq!(Pixel::new(0, 0, 255).to_hsv(HueScale::Half)[0], 120);
            assert_eq!(Pixel::new(0, 255, 0).to_hsv(HueScale::Full)[0], 85);
            assert_eq!(Pixel::new(0, 0, 255).to_hsv(HueScale::Full)[0], 170);
        }

        #[test]
        fn black_and_gray_have_no_hue_or_saturation() {
            assert_eq!(Pixel::new(0, 0, 0).to_hsv(HueScale::Half), [0, 0, 0]);
            assert_eq!(Pixel::new(90, 90, 90).to_hsv(HueScale::Half), [0, 0, 90]);
        }

        #[test]
        fn yuv_of_gray_sits_on_the_bias() {
            assert_eq!(Pixel::new(100, 100, 100).to_yuv(128), [100, 128, 128]);
        }

        #[test]
        fn yuv_of_red_saturates_v() {
            // Y = 76.245, U = 0.492 * -76.245 + 128, V = 0.877 * 178.755 + 128 > 255
            assert_eq!(Pixel::new(255, 0, 0).to_yuv(128), [76, 90, 255]);
            assert_eq!(Pixel::new(250, 0, 0).to_yuv(128), [75, 91, 255]);
        }

        #[test]
        fn hsv_round_trip_is_close() {
            for &(r, g, b) in &[(12, 200, 99), (255, 128, 0), (30, 30, 200), (201, 13, 160)] {
                let original = Pixel::new(r, g, b);
                let back = Pixel::from_hsv(original.to_hsv(HueScale::Full), HueScale::Full);
                assert!((original.red as i16 - back.red as i16).abs() <= 4, "{:?} vs {:?}", original, back);
                assert!((original.green as i16 - back.green as i16).abs() <= 4, "{:?} vs {:?}", original, back);
                assert!((original.blue as i16 - back.blue as i16).abs() <= 4, "{:?} vs {:?}", original, back);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Glossary: Single-Pixel Color Terms
//
// - Luminance (Y): Perceived brightness from RGB as a Rec. 601 weighted sum.
//
// - Chrominance (U, V): Color-difference components. U follows blue minus luma, V
//   follows red minus luma. Both are offset by a bias so they fit in a byte.
//
// - Hue: Angle on the color wheel describing the color family. Stored either as
//   half-degrees (0..=179) or scaled to the full byte (0..=255).
//
// - Saturation (HSV): Chroma divided by Value. Zero for grays and for black.
//
// - Value (HSV): The maximum of the RGB channels.
