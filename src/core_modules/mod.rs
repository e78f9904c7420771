pub mod channel_diff;
pub mod color_space;
pub mod dominant_factor;
pub mod frame;
pub mod pixel;
pub mod size_reconciler;
pub mod smart_pixel;

pub mod utils {
    pub mod image_helper;
}
