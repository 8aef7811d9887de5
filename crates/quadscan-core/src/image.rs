//! Stride-aware single-channel image view for the detection path.

use crate::error::ScanError;

/// A borrowed view into a single-channel (intensity) buffer with explicit
/// stride support, so callers can hand in padded or non-contiguous rows
/// without copying.
#[derive(Clone, Copy)]
pub struct ImageView<'a> {
    /// Intensity samples, row-major.
    pub data: &'a [u8],
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Distance in samples between the starts of consecutive rows.
    pub stride: usize,
}

impl<'a> ImageView<'a> {
    /// Create a new view after validating that the buffer size matches the
    /// dimensions and stride.
    ///
    /// # Errors
    /// Returns [`ScanError::MalformedInput`] for zero dimensions, a stride
    /// below the width, or a buffer too small for the described layout.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self, ScanError> {
        if width == 0 || height == 0 {
            return Err(ScanError::MalformedInput(format!(
                "zero-dimension image ({width}x{height})"
            )));
        }
        if stride < width {
            return Err(ScanError::MalformedInput(format!(
                "stride ({stride}) cannot be less than width ({width})"
            )));
        }
        let required = (height - 1) * stride + width;
        if data.len() < required {
            return Err(ScanError::MalformedInput(format!(
                "buffer size ({}) too small for {width}x{height} image with stride {stride} (required: {required})",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Safe accessor for a specific row.
    #[inline(always)]
    pub fn get_row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "row index {y} out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    /// Safe accessor for a specific pixel.
    #[inline(always)]
    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width, "column index {x} out of bounds");
        self.get_row(y)[x]
    }
}
