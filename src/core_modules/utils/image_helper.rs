// Thin adapter between encoded files and the engine's `Image`. Decoding is not part
// of the comparison itself; these helpers only exist so callers don't have to repeat
// the `image` crate plumbing.

pub mod image_helper {
    use crate::core_modules::frame::Image;
    use crate::error::{ComparisonError, ImageSlot, Result};
    use image::ImageEncoder;
    use image::error::{ParameterError, ParameterErrorKind};
    use std::path::Path;

    /// Decodes an encoded buffer (PNG, JPEG) into an RGB `Image`. Alpha is dropped and
    /// grayscale is expanded to three equal channels.
    pub fn decode(bytes: &[u8], slot: ImageSlot) -> Result<Image> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|source| ComparisonError::Decode { slot, source })?;
        Ok(Image::from(decoded.to_rgb8()))
    }

    /// Reads and decodes the file at `path`.
    pub fn open(path: impl AsRef<Path>, slot: ImageSlot) -> Result<Image> {
        let decoded = image::open(path.as_ref()).map_err(|source| ComparisonError::Decode { slot, source })?;
        log::debug!(
            "decoded {} from {} ({}x{})",
            slot,
            path.as_ref().display(),
            decoded.width(),
            decoded.height()
        );
        Ok(Image::from(decoded.to_rgb8()))
    }

    /// Encodes the three channels of `image` as an RGB PNG in memory.
    pub fn encode_png(image: &Image) -> Result<Vec<u8>> {
        let buffer = image.to_rgb_image().ok_or_else(|| {
            ComparisonError::Encode(image::ImageError::Parameter(ParameterError::from_kind(
                ParameterErrorKind::DimensionMismatch,
            )))
        })?;
        let mut encoded = Vec::new();
        image::codecs::png::PngEncoder::new(&mut encoded).write_image(
            buffer.as_raw(),
            buffer.width(),
            buffer.height(),
            image::ExtendedColorType::Rgb8,
        )?;
        Ok(encoded)
    }

    /// Writes `image` to `path` as an RGB PNG.
    pub fn save_png(image: &Image, path: impl AsRef<Path>) -> Result<()> {
        let encoded = encode_png(image)?;
        std::fs::write(path.as_ref(), encoded)
            .map_err(|error| ComparisonError::Encode(image::ImageError::IoError(error)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::image_helper::*;
    use crate::core_modules::frame::Image;
    use crate::error::{ComparisonError, ImageSlot};

    #[test]
    fn png_round_trip_preserves_samples() {
        let data: Vec<u8> = (0..4 * 3 * 3).map(|i| (i * 7) as u8).collect();
        let image = Image::new(4, 3, data).unwrap();

        let encoded = encode_png(&image).expect("Error Encoding Image.");
        let decoded = decode(&encoded, ImageSlot::First).expect("Error Decoding Image.");

        assert_eq!(decoded, image);
    }

    #[test]
    fn rgba_input_is_flattened_to_rgb() {
        let rgba = image::RgbaImage::from_raw(1, 1, vec![10, 20, 30, 40]).unwrap();
        let mut encoded = std::io::Cursor::new(Vec::new());
        rgba.write_to(&mut encoded, image::ImageFormat::Png).unwrap();

        let decoded = decode(encoded.get_ref(), ImageSlot::Second).unwrap();
        assert_eq!(decoded.pixel(0, 0), Some([10, 20, 30]));
    }

    #[test]
    fn garbage_bytes_report_the_slot() {
        match decode(b"definitely not an image", ImageSlot::Second) {
            Err(ComparisonError::Decode { slot, .. }) => assert_eq!(slot, ImageSlot::Second),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn save_white_file() {
        let image = Image::filled(50, 50, [255, 255, 255]).unwrap();
        let path = std::env::temp_dir().join(format!(
            "chroma_diff_white_file_{}.png",
            std::process::id()
        ));

        save_png(&image, &path).expect("Error Saving File.");
        let reopened = open(&path, ImageSlot::First).expect("Error Opening File.");
        std::fs::remove_file(&path).expect("Error Removing File.");
        assert_eq!(reopened, image);
    }
}
