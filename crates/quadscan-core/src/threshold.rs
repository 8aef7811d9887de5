//! Global binarization of an intensity plane.

use crate::image::ImageView;

/// Default binarization threshold: mid-range on a 0-255 scale.
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Binarize an intensity image with a fixed global threshold.
///
/// Pixels with intensity >= `threshold` become foreground (255), everything
/// else becomes background (0). `output` is row-major `width * height`.
///
/// Document pages photographed against a darker backdrop binarize to
/// foreground here; the segmentation stage labels those foreground regions.
///
/// # Panics
/// Panics if `output` is smaller than `width * height`.
pub fn binarize_global(img: &ImageView, threshold: u8, output: &mut [u8]) {
    assert!(
        output.len() >= img.width * img.height,
        "binarize output buffer too small"
    );
    for y in 0..img.height {
        let src_row = img.get_row(y);
        let dst_row = &mut output[y * img.width..(y + 1) * img.width];
        for (dst, &src) in dst_row.iter_mut().zip(src_row) {
            *dst = if src >= threshold { 255 } else { 0 };
        }
    }
}
