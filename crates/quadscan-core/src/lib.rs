//! Document region detection and perspective rectification.
//!
//! Quadscan takes a photographed document raster, finds the quadrilateral
//! outline of the page (or of sub-regions within it), and warps each
//! detected region into a flat, top-down crop. A fixed 90-degree-clockwise
//! rotation operates independently on any raster.
//!
//! # Pipeline
//!
//! 1. **Binarization**: BT.601 luminance plus a fixed global threshold
//!    (mid-range by default) splits foreground from backdrop.
//! 2. **Segmentation**: run-based connected-component labeling with
//!    Union-Find groups foreground pixels into disjoint regions.
//! 3. **Extraction**: each component's boundary is traced (Moore-neighbor
//!    border following) and simplified (Douglas-Peucker with a tolerance
//!    proportional to the outline's perimeter); only exactly-4-vertex
//!    polygons survive.
//! 4. **Canonicalization**: corners are relabeled [TL, TR, BR, BL].
//! 5. **Rectification**: destination rectangle sizing plus a DLT-solved
//!    projective transform, applied with inverse-mapped bilinear sampling.
//!
//! The engine is stateless between calls; a [`Scanner`] holds only its
//! configuration and a reusable scratch arena.
//!
//! # Example
//!
//! ```
//! use quadscan_core::{DetectMode, Scanner};
//! use quadscan_core::raster::Raster;
//! use quadscan_core::test_utils::fill_quad;
//!
//! // A bright page over a dark backdrop
//! let mut raster = Raster::filled(64, 64, [20, 20, 20]).unwrap();
//! fill_quad(&mut raster, [[16.0, 16.0], [55.0, 16.0], [55.0, 55.0], [16.0, 55.0]], [230, 230, 230]);
//!
//! let mut scanner = Scanner::new();
//! let regions = scanner.detect(&raster, DetectMode::MultiRegion);
//! assert_eq!(regions.len(), 1);
//!
//! let crops = quadscan_core::rectify_all(&raster, &regions);
//! assert!(crops[0].is_ok());
//! ```

/// Configuration types for the scanning pipeline.
pub mod config;
/// Boundary tracing and polygon simplification.
pub mod contour;
/// Error taxonomy.
pub mod error;
/// Points, distances, perimeters, bounding boxes.
pub mod geometry;
/// Projective transforms.
pub mod homography;
/// Borrowed single-channel image views.
pub mod image;
/// Quadrilateral regions and corner canonicalization.
pub mod quad;
/// Owned RGB rasters and the fixed rotation.
pub mod raster;
/// Perspective rectification and resampling.
pub mod rectify;
/// Connected-component labeling.
pub mod segmentation;
/// Synthetic scenes for tests and benches.
pub mod test_utils;
/// Global binarization.
pub mod threshold;

pub use crate::config::{DetectMode, ScannerConfig};
pub use crate::error::ScanError;
pub use crate::geometry::Point;
pub use crate::image::ImageView;
pub use crate::quad::Quad;
pub use crate::raster::{Raster, rotate90_cw};
pub use crate::rectify::{RectifyPlan, plan, rectify, rectify_all};

use bumpalo::Bump;

/// Stage timings and counters for a single detection call.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineStats {
    /// Time spent on luminance conversion and binarization, in ms.
    pub threshold_ms: f64,
    /// Time spent on connected-component labeling, in ms.
    pub segmentation_ms: f64,
    /// Time spent on boundary tracing and simplification, in ms.
    pub extraction_ms: f64,
    /// Total pipeline time in ms.
    pub total_ms: f64,
    /// Number of connected foreground components considered.
    pub num_components: usize,
    /// Number of 4-point regions in the final result.
    pub num_regions: usize,
}

/// The main entry point for region detection.
///
/// Holds the pipeline configuration and a reusable scratch arena for the
/// intermediate planes (luma, binary, labels). The arena is reset at the
/// start of every call, so a `Scanner` can be reused indefinitely;
/// detection itself carries no state between calls.
pub struct Scanner {
    arena: Bump,
    config: ScannerConfig,
}

impl Scanner {
    /// Create a scanner with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ScannerConfig::default())
    }

    /// Create a scanner with custom pipeline configuration.
    #[must_use]
    pub fn with_config(config: ScannerConfig) -> Self {
        Self {
            arena: Bump::new(),
            config,
        }
    }

    /// The scanner's configuration.
    #[must_use]
    pub fn config(&self) -> ScannerConfig {
        self.config
    }

    /// Detect quadrilateral regions in a raster.
    ///
    /// Returns canonicalized quads in component scan order, indexed 0..N-1;
    /// the index is the externally visible identity of each region. A new
    /// call replaces the whole set. An empty result means no page-like
    /// region was found — never fabricated geometry.
    pub fn detect(&mut self, raster: &Raster, mode: DetectMode) -> Vec<Quad> {
        self.detect_with_stats(raster, mode).0
    }

    /// Detect the single most plausible whole-page outline.
    ///
    /// # Errors
    /// Returns [`ScanError::NoRegionFound`] when no 4-point candidate
    /// survives extraction.
    pub fn detect_page(&mut self, raster: &Raster) -> Result<Quad, ScanError> {
        self.detect(raster, DetectMode::WholePage)
            .into_iter()
            .next()
            .ok_or(ScanError::NoRegionFound)
    }

    /// Detection with stage timing statistics.
    #[allow(clippy::expect_used)]
    pub fn detect_with_stats(
        &mut self,
        raster: &Raster,
        mode: DetectMode,
    ) -> (Vec<Quad>, PipelineStats) {
        let mut stats = PipelineStats::default();
        let start_total = std::time::Instant::now();

        self.arena.reset();
        let width = raster.width();
        let height = raster.height();

        // 1. Luminance + global threshold
        let start_thresh = std::time::Instant::now();
        let binary = {
            let _span = tracing::info_span!("threshold_global").entered();
            let luma = self.arena.alloc_slice_fill_copy(width * height, 0u8);
            raster.luma_into(luma);
            let img = ImageView::new(luma, width, height, width)
                .expect("raster dimensions validated at construction");
            let binary = self.arena.alloc_slice_fill_copy(width * height, 0u8);
            crate::threshold::binarize_global(&img, self.config.threshold, binary);
            binary
        };
        stats.threshold_ms = start_thresh.elapsed().as_secs_f64() * 1000.0;

        // 2. Segmentation
        let start_seg = std::time::Instant::now();
        let label_result = {
            let _span = tracing::info_span!("segmentation").entered();
            crate::segmentation::label_components(&self.arena, binary, width, height)
        };
        stats.segmentation_ms = start_seg.elapsed().as_secs_f64() * 1000.0;
        stats.num_components = label_result.component_stats.len();

        // 3. Boundary tracing + simplification
        let start_extract = std::time::Instant::now();
        let regions = {
            let _span = tracing::info_span!("extraction").entered();
            crate::contour::extract_regions(&label_result, width, height, &self.config, mode)
        };
        stats.extraction_ms = start_extract.elapsed().as_secs_f64() * 1000.0;
        stats.num_regions = regions.len();

        stats.total_ms = start_total.elapsed().as_secs_f64() * 1000.0;
        (regions, stats)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
