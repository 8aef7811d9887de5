//! Utilities for building synthetic document scenes in tests and benches.

use crate::geometry::{Aabb, Point};
use crate::quad::Quad;
use crate::raster::Raster;

/// Fill a convex quadrilateral region of a raster with a solid color.
///
/// Pixels whose centers lie inside (or on the boundary of) the
/// canonicalized quad are painted; everything else is untouched. Only the
/// quad's bounding box is scanned.
pub fn fill_quad(raster: &mut Raster, corners: [[f64; 2]; 4], color: [u8; 3]) {
    let quad = Quad::new([
        Point::new(corners[0][0], corners[0][1]),
        Point::new(corners[1][0], corners[1][1]),
        Point::new(corners[2][0], corners[2][1]),
        Point::new(corners[3][0], corners[3][1]),
    ])
    .canonicalized();

    let bb = Aabb::of(&quad.corners).expect("quad always has corners");
    let y0 = bb.min_y.floor().max(0.0) as usize;
    let y1 = (bb.max_y.ceil() as usize + 1).min(raster.height());
    let x0 = bb.min_x.floor().max(0.0) as usize;
    let x1 = (bb.max_x.ceil() as usize + 1).min(raster.width());

    for y in y0..y1 {
        for x in x0..x1 {
            if inside_convex(&quad, x as f64, y as f64) {
                raster.put(x, y, color);
            }
        }
    }
}

/// Point-in-convex-polygon via edge cross products.
///
/// With corners in [TL, TR, BR, BL] order and y growing downward, interior
/// points sit on the non-negative side of every edge.
fn inside_convex(quad: &Quad, x: f64, y: f64) -> bool {
    for i in 0..4 {
        let a = quad.corners[i];
        let b = quad.corners[(i + 1) % 4];
        let cross = (b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x);
        if cross < 0.0 {
            return false;
        }
    }
    true
}

/// Build a bright page quad over a dark backdrop, returning the raster and
/// the ground-truth (canonicalized) corners.
#[must_use]
pub fn page_scene(width: usize, height: usize, corners: [[f64; 2]; 4]) -> (Raster, Quad) {
    let mut raster = Raster::filled(width, height, [25, 25, 25])
        .expect("scene dimensions must be non-zero");
    fill_quad(&mut raster, corners, [230, 230, 230]);
    let gt = Quad::from_points(&corners)
        .expect("scene corners must be a quad")
        .canonicalized();
    (raster, gt)
}

/// Mean Euclidean distance between detected and ground-truth corners.
///
/// Both quads are canonicalized first, so corresponding corners compare
/// directly without trying rotations or winding orders.
#[must_use]
pub fn compute_corner_error(detected: &Quad, ground_truth: &Quad) -> f64 {
    let d = detected.canonicalized();
    let g = ground_truth.canonicalized();
    let mut sum = 0.0;
    for i in 0..4 {
        sum += crate::geometry::distance(d.corners[i], g.corners[i]);
    }
    sum / 4.0
}
