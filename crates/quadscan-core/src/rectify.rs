//! Perspective rectification: skewed quadrilateral in, flat top-down crop out.

use crate::error::ScanError;
use crate::geometry::{self, Point};
use crate::homography::Homography;
use crate::quad::Quad;
use crate::raster::Raster;

/// Background fill for destination pixels whose source sample falls outside
/// the raster; document edges commonly touch raster boundaries.
const BACKGROUND: [u8; 3] = [0, 0, 0];

/// A solved rectification: destination rectangle dimensions plus the
/// projective transform mapping the canonicalized source quad onto it.
#[derive(Clone, Copy, Debug)]
pub struct RectifyPlan {
    /// Destination width in pixels (>= 1).
    pub width: usize,
    /// Destination height in pixels (>= 1).
    pub height: usize,
    /// Source-quad -> destination-rectangle transform.
    pub transform: Homography,
    /// The canonicalized source corners the transform was solved from.
    pub source: Quad,
}

/// Solve the destination rectangle and transform for a quadrilateral.
///
/// The destination width is the longer of the two horizontal edges and the
/// height the longer of the two vertical edges, so no content is lost;
/// both are rounded to the nearest integer. Destination corners are
/// `(0,0), (w-1,0), (w-1,h-1), (0,h-1)` in the same `[TL,TR,BR,BL]` order
/// as the canonicalized source.
///
/// # Errors
/// Returns [`ScanError::DegenerateGeometry`] when the corners are collinear
/// or the destination rectangle rounds below one pixel.
pub fn plan(quad: &Quad) -> Result<RectifyPlan, ScanError> {
    let canon = quad.canonicalized();
    let [tl, tr, br, bl] = canon.corners;

    let width = geometry::distance(tl, tr)
        .max(geometry::distance(bl, br))
        .round();
    let height = geometry::distance(tl, bl)
        .max(geometry::distance(tr, br))
        .round();

    if width < 1.0 || height < 1.0 {
        return Err(ScanError::DegenerateGeometry(
            "destination rectangle rounds below one pixel",
        ));
    }
    if canon.area() < 0.5 {
        return Err(ScanError::DegenerateGeometry(
            "collinear or zero-area corners",
        ));
    }

    let w = width as usize;
    let h = height as usize;
    let dst = [
        Point::new(0.0, 0.0),
        Point::new(width - 1.0, 0.0),
        Point::new(width - 1.0, height - 1.0),
        Point::new(0.0, height - 1.0),
    ];

    let transform = Homography::from_pairs(&canon.corners, &dst).ok_or(
        ScanError::DegenerateGeometry("no unique projective transform"),
    )?;

    Ok(RectifyPlan {
        width: w,
        height: h,
        transform,
        source: canon,
    })
}

/// Rectify one region of a source raster into a flat top-down crop.
///
/// Every destination pixel samples the source through the inverse transform
/// with bilinear interpolation; samples falling outside the source bounds
/// are filled with black.
///
/// # Errors
/// Returns [`ScanError::DegenerateGeometry`] for collinear or sub-pixel
/// regions.
pub fn rectify(src: &Raster, quad: &Quad) -> Result<Raster, ScanError> {
    let plan = plan(quad)?;
    let inverse = plan
        .transform
        .inverse()
        .ok_or(ScanError::DegenerateGeometry("transform is not invertible"))?;

    let mut data = Vec::with_capacity(plan.width * plan.height * 3);
    for y in 0..plan.height {
        for x in 0..plan.width {
            let src_pt = inverse.project(Point::new(x as f64, y as f64));
            let px = src
                .sample_bilinear(src_pt.x, src_pt.y)
                .unwrap_or(BACKGROUND);
            data.extend_from_slice(&px);
        }
    }

    Raster::from_raw(plan.width, plan.height, data)
}

/// Rectify a batch of regions, one result per input index.
///
/// Regions are processed independently; a degenerate region yields an
/// `Err` at its index while the rest of the batch continues.
#[must_use]
pub fn rectify_all(src: &Raster, quads: &[Quad]) -> Vec<Result<Raster, ScanError>> {
    quads.iter().map(|q| rectify(src, q)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(points: [[f64; 2]; 4]) -> Quad {
        Quad::from_points(&points).unwrap()
    }

    #[test]
    fn test_plan_dimensions_for_skewed_rectangle() {
        // Tall rectangle with slight skew; spec-level worked example.
        let q = quad([[10.0, 10.0], [110.0, 12.0], [108.0, 210.0], [8.0, 208.0]]);
        let p = plan(&q).unwrap();
        assert_eq!(p.width, 100);
        assert_eq!(p.height, 198);
    }

    #[test]
    fn test_plan_square_has_equal_sides() {
        let q = quad([[20.0, 20.0], [120.0, 20.0], [120.0, 120.0], [20.0, 120.0]]);
        let p = plan(&q).unwrap();
        assert_eq!(p.width, p.height);
        assert_eq!(p.width, 100);
    }

    #[test]
    fn test_plan_maps_corners_onto_destination() {
        let q = quad([[10.0, 10.0], [110.0, 12.0], [108.0, 210.0], [8.0, 208.0]]);
        let p = plan(&q).unwrap();
        let w = (p.width - 1) as f64;
        let h = (p.height - 1) as f64;
        let expected = [[0.0, 0.0], [w, 0.0], [w, h], [0.0, h]];

        for (src, dst) in p.source.corners.iter().zip(&expected) {
            let mapped = p.transform.project(*src);
            assert!(
                (mapped.x - dst[0]).abs() < 1.0 && (mapped.y - dst[1]).abs() < 1.0,
                "corner {src:?} mapped to {mapped:?}, expected {dst:?}"
            );
        }
    }

    #[test]
    fn test_collinear_corners_degenerate() {
        let q = quad([[0.0, 0.0], [50.0, 0.0], [100.0, 0.0], [150.0, 0.0]]);
        assert!(matches!(
            plan(&q),
            Err(ScanError::DegenerateGeometry(_))
        ));

        // Collinear along a diagonal: sizes survive rounding, the area
        // check must still reject it.
        let diag = quad([[0.0, 0.0], [50.0, 50.0], [100.0, 100.0], [150.0, 150.0]]);
        assert!(matches!(
            plan(&diag),
            Err(ScanError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_subpixel_region_degenerate() {
        let q = quad([[0.0, 0.0], [0.2, 0.0], [0.2, 0.2], [0.0, 0.2]]);
        assert!(matches!(
            plan(&q),
            Err(ScanError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_rectify_full_frame_crop() {
        // Crop a raster by its own full frame: the corner pixels land
        // exactly on the destination corners.
        let mut src = Raster::filled(8, 6, [50, 50, 50]).unwrap();
        src.put(0, 0, [200, 10, 10]);
        src.put(7, 5, [10, 200, 10]);
        let q = quad([[0.0, 0.0], [7.0, 0.0], [7.0, 5.0], [0.0, 5.0]]);

        let out = rectify(&src, &q).unwrap();
        assert_eq!(out.width(), 7);
        assert_eq!(out.height(), 5);
        assert_eq!(out.get(0, 0), [200, 10, 10]);
        assert_eq!(out.get(6, 4), [10, 200, 10]);
        // Interior samples blend only unmarked gray pixels.
        assert_eq!(out.get(3, 2), [50, 50, 50]);
    }

    #[test]
    fn test_out_of_bounds_fills_black() {
        // Region extends past the raster on the right and bottom.
        let src = Raster::filled(10, 10, [255, 255, 255]).unwrap();
        let q = quad([[5.0, 5.0], [20.0, 5.0], [20.0, 20.0], [5.0, 20.0]]);

        let out = rectify(&src, &q).unwrap();
        assert_eq!(out.width(), 15);
        assert_eq!(out.height(), 15);
        // Top-left of the crop is inside the source: white.
        assert_eq!(out.get(0, 0), [255, 255, 255]);
        // Bottom-right maps outside the source: black fill.
        assert_eq!(out.get(14, 14), [0, 0, 0]);
        assert_eq!(out.get(14, 0), [0, 0, 0]);
    }

    #[test]
    fn test_rectify_all_reports_per_index() {
        let src = Raster::filled(32, 32, [128, 128, 128]).unwrap();
        let good = quad([[2.0, 2.0], [20.0, 2.0], [20.0, 20.0], [2.0, 20.0]]);
        let bad = quad([[0.0, 0.0], [50.0, 0.0], [100.0, 0.0], [150.0, 0.0]]);

        let results = rectify_all(&src, &[good, bad, good]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(ScanError::DegenerateGeometry(_))
        ));
        assert!(results[2].is_ok());
    }
}
