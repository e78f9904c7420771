// THEORY:
// The `SizeReconciler` is the first stage of every comparison. Two user-supplied images
// rarely share dimensions exactly, and a pixel difference is only defined where both
// images have a pixel. The reconciler therefore crops both to the common region:
//
//   common_height = min(h1, h2), common_width = min(w1, w2)
//
// taking rows 0..common_height and columns 0..common_width of each. There is no
// scaling, no interpolation and no centering; it is pure truncation from the origin.
//
// It is also the gatekeeper: both inputs are validated here (non-zero size, exactly
// three channels) before any computation happens, and a rejection names the input.

use crate::core_modules::frame::Image;
use crate::error::{ImageSlot, Result};

/// Validates both inputs and crops them to their common top-left region.
pub fn reconcile(first: &Image, second: &Image) -> Result<(Image, Image)> {
    first.validate(ImageSlot::First)?;
    second.validate(ImageSlot::Second)?;

    let common_height = first.height().min(second.height());
    let common_width = first.width().min(second.width());

    log::debug!(
        "reconciled {}x{} and {}x{} to {}x{}",
        first.width(),
        first.height(),
        second.width(),
        second.height(),
        common_width,
        common_height
    );

    Ok((
        first.crop_top_left(common_height, common_width),
        second.crop_top_left(common_height, common_width),
    ))
}
