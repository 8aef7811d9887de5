//! Error taxonomy for the scanning engine.

/// Errors surfaced by detection, rectification, and input validation.
///
/// All variants are recoverable at the call boundary. Batch rectification
/// reports failures per region index rather than failing the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// The extractor produced no 4-point candidate.
    ///
    /// `Scanner::detect` surfaces this state as an empty region set; only
    /// [`Scanner::detect_page`](crate::Scanner::detect_page), which promises
    /// exactly one page, turns it into this error.
    #[error("no page-like region found")]
    NoRegionFound,

    /// Collinear or zero-area corners reached the rectification solver,
    /// or the destination rectangle rounds below one pixel.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    /// A supplied quadrilateral does not have exactly 4 points, or a raster
    /// is empty / zero-dimension. Rejected before any geometry work.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
