//! Configuration types for the scanning pipeline.

use crate::threshold::DEFAULT_THRESHOLD;

/// Detection contract: how many regions a call may return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectMode {
    /// Return the single largest page-like outline ("scan this document").
    WholePage,
    /// Return every 4-point candidate found ("crop these sub-photos").
    MultiRegion,
}

/// Pipeline-level configuration for the scanner.
///
/// Immutable after the `Scanner` is constructed; use the builder for
/// ergonomic construction.
///
/// # Example
/// ```
/// use quadscan_core::config::ScannerConfig;
///
/// let config = ScannerConfig::builder()
///     .threshold(100)
///     .simplify_tolerance(0.03)
///     .build();
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannerConfig {
    /// Global binarization threshold; pixels with intensity >= this value
    /// are foreground (default: 127, mid-range).
    pub threshold: u8,
    /// Polygon simplification tolerance as a fraction of the outline's
    /// perimeter (default: 0.02). Proportional tolerance keeps corner
    /// accuracy consistent across region sizes; useful values are 0.01-0.03.
    pub simplify_tolerance: f64,
    /// Minimum region area in square pixels; smaller candidates are treated
    /// as noise (default: 100.0).
    pub min_region_area: f64,
    /// Minimum traced boundary length in pixels for a component to be
    /// considered at all (default: 8).
    pub min_contour_len: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            simplify_tolerance: 0.02,
            min_region_area: 100.0,
            min_contour_len: 8,
        }
    }
}

impl ScannerConfig {
    /// Create a new builder for `ScannerConfig`.
    #[must_use]
    pub fn builder() -> ScannerConfigBuilder {
        ScannerConfigBuilder::default()
    }
}

/// Builder for [`ScannerConfig`].
#[derive(Default)]
pub struct ScannerConfigBuilder {
    threshold: Option<u8>,
    simplify_tolerance: Option<f64>,
    min_region_area: Option<f64>,
    min_contour_len: Option<usize>,
}

impl ScannerConfigBuilder {
    /// Set the global binarization threshold.
    #[must_use]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set the simplification tolerance (fraction of perimeter).
    #[must_use]
    pub fn simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = Some(tolerance);
        self
    }

    /// Set the minimum region area in square pixels.
    #[must_use]
    pub fn min_region_area(mut self, area: f64) -> Self {
        self.min_region_area = Some(area);
        self
    }

    /// Set the minimum traced boundary length.
    #[must_use]
    pub fn min_contour_len(mut self, len: usize) -> Self {
        self.min_contour_len = Some(len);
        self
    }

    /// Build the configuration, using defaults for unset fields.
    #[must_use]
    pub fn build(self) -> ScannerConfig {
        let d = ScannerConfig::default();
        ScannerConfig {
            threshold: self.threshold.unwrap_or(d.threshold),
            simplify_tolerance: self.simplify_tolerance.unwrap_or(d.simplify_tolerance),
            min_region_area: self.min_region_area.unwrap_or(d.min_region_area),
            min_contour_len: self.min_contour_len.unwrap_or(d.min_contour_len),
        }
    }
}
