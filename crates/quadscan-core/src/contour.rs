//! Boundary tracing and polygon simplification: raster outlines in,
//! quadrilateral candidates out.

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;
use multiversion::multiversion;
use rayon::prelude::*;

use crate::config::{DetectMode, ScannerConfig};
use crate::geometry::{self, Point};
use crate::quad::Quad;
use crate::segmentation::LabelResult;

/// Extract quadrilateral region candidates from labeled components.
///
/// Each component's boundary is traced and simplified independently; rayon
/// fans the components out with one thread-local arena apiece. Only
/// simplified polygons with exactly 4 vertices survive; triangles and
/// higher-order polygons are not page-like.
///
/// Results are canonicalized quads in component scan order (top-to-bottom).
/// In [`DetectMode::WholePage`] only the largest-area candidate is kept.
pub fn extract_regions(
    label_result: &LabelResult,
    width: usize,
    height: usize,
    config: &ScannerConfig,
    mode: DetectMode,
) -> Vec<Quad> {
    let labels = label_result.labels;

    let candidates: Vec<Quad> = label_result
        .component_stats
        .par_iter()
        .enumerate()
        .filter_map(|(label_idx, stat)| {
            let label = (label_idx + 1) as u32;

            // Fast rejection on bounding box before tracing anything.
            let bbox_w = (stat.max_x - stat.min_x + 1) as f64;
            let bbox_h = (stat.max_y - stat.min_y + 1) as f64;
            if bbox_w * bbox_h < config.min_region_area {
                return None;
            }

            let arena = Bump::new();
            let contour = trace_boundary(
                &arena,
                labels,
                width,
                height,
                stat.first_x as usize,
                stat.first_y as usize,
                label,
            );
            if contour.len() < config.min_contour_len {
                return None;
            }

            let poly = simplify_to_polygon(&arena, &contour, config.simplify_tolerance);
            if poly.len() != 4 {
                return None;
            }

            let quad = Quad::new([poly[0], poly[1], poly[2], poly[3]]).canonicalized();
            if quad.area() < config.min_region_area {
                return None;
            }
            Some(quad)
        })
        .collect();

    match mode {
        DetectMode::MultiRegion => candidates,
        DetectMode::WholePage => candidates
            .into_iter()
            .reduce(|best, q| if q.area() > best.area() { q } else { best })
            .into_iter()
            .collect(),
    }
}

/// Simplify a closed boundary-pixel contour down to its polygon vertices.
///
/// Runs chain approximation (drop collinear points) and then iterative
/// Douglas-Peucker with `epsilon = perimeter * tolerance`, clamped to at
/// least one pixel. The traced start pixel is pinned by Douglas-Peucker; if
/// it sits within epsilon of the chord between its neighbors (trace started
/// mid-edge) it is dropped afterwards.
fn simplify_to_polygon<'a>(
    arena: &'a Bump,
    contour: &[Point],
    tolerance: f64,
) -> BumpVec<'a, Point> {
    let epsilon = (geometry::perimeter(contour) * tolerance).max(1.0);

    // Close the loop so both endpoints of the DP recursion are the start
    // pixel, then simplify and drop the closing duplicate.
    let mut closed = BumpVec::new_in(arena);
    closed.extend_from_slice(contour);
    closed.push(contour[0]);

    let reduced = chain_approximation(arena, &closed);
    let mut simplified = douglas_peucker(arena, &reduced, epsilon);
    simplified.pop();

    // Mid-edge trace start: the pinned start vertex carries no corner
    // information when it lies on the chord between its neighbors.
    if simplified.len() > 2 {
        let last = simplified[simplified.len() - 1];
        let second = simplified[1];
        if perpendicular_distance(simplified[0], last, second) < epsilon {
            simplified.remove(0);
        }
    }

    simplified
}

/// Simplify a polyline using the Douglas-Peucker algorithm.
///
/// Iterative implementation with a manual stack to avoid the overhead of
/// recursive calls and temporary allocations. Both endpoints are always
/// retained.
pub fn douglas_peucker<'a>(arena: &'a Bump, points: &[Point], epsilon: f64) -> BumpVec<'a, Point> {
    if points.len() < 3 {
        let mut v = BumpVec::new_in(arena);
        v.extend_from_slice(points);
        return v;
    }

    let n = points.len();
    let mut keep = BumpVec::from_iter_in((0..n).map(|_| false), arena);
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = BumpVec::new_in(arena);
    stack.push((0, n - 1));

    while let Some((start, end)) = stack.pop() {
        if end - start < 2 {
            continue;
        }

        let mut dmax = 0.0;
        let mut index = start;

        for i in start + 1..end {
            let d = perpendicular_distance(points[i], points[start], points[end]);
            if d > dmax {
                index = i;
                dmax = d;
            }
        }

        if dmax > epsilon {
            keep[index] = true;
            stack.push((start, index));
            stack.push((index, end));
        }
    }

    let mut simplified = BumpVec::new_in(arena);
    for (i, &k) in keep.iter().enumerate() {
        if k {
            simplified.push(points[i]);
        }
    }
    simplified
}

fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mag = (dx * dx + dy * dy).sqrt();
    if mag < 1e-9 {
        return geometry::distance(p, a);
    }
    ((dy * p.x - dx * p.y + b.x * a.y - b.y * a.x).abs()) / mag
}

/// Remove redundant points on straight chain segments.
///
/// A point survives only if the directions into and out of it differ;
/// endpoints are always kept.
pub fn chain_approximation<'a>(arena: &'a Bump, points: &[Point]) -> BumpVec<'a, Point> {
    if points.len() < 3 {
        let mut v = BumpVec::new_in(arena);
        v.extend_from_slice(points);
        return v;
    }

    let mut result = BumpVec::new_in(arena);
    result.push(points[0]);

    for i in 1..points.len() - 1 {
        let p_prev = points[i - 1];
        let p_curr = points[i];
        let p_next = points[i + 1];

        let dx1 = p_curr.x - p_prev.x;
        let dy1 = p_curr.y - p_prev.y;
        let dx2 = p_next.x - p_curr.x;
        let dy2 = p_next.y - p_curr.y;

        // Exact comparison is safe: boundary pixels have integer coordinates
        if (dx1 * dy2 - dx2 * dy1).abs() > 1e-6 {
            result.push(p_curr);
        }
    }

    result.push(points[points.len() - 1]);
    result
}

#[multiversion(targets(
    "x86_64+avx2+bmi1+bmi2+popcnt+lzcnt",
    "x86_64+avx512f+avx512bw+avx512dq+avx512vl",
    "aarch64+neon"
))]
/// Trace the external boundary of a labeled component using Moore-neighbor
/// border following.
///
/// Starts from the component's topmost-leftmost pixel and walks clockwise,
/// producing a closed ordered sequence of boundary pixels. The walk is
/// bounded by the image size, so it always terminates.
fn trace_boundary<'a>(
    arena: &'a Bump,
    labels: &[u32],
    width: usize,
    height: usize,
    start_x: usize,
    start_y: usize,
    target_label: u32,
) -> BumpVec<'a, Point> {
    let mut points = BumpVec::new_in(arena);

    // Moore neighborhood directions (CW order starting from Top)
    // index: 0, 1, 2, 3, 4, 5, 6, 7
    // dir:   T, TR, R, BR, B, BL, L, TL
    let dx = [0isize, 1, 1, 1, 0, -1, -1, -1];
    let dy = [-1isize, -1, 0, 1, 1, 1, 0, -1];

    let mut curr_x = start_x;
    let mut curr_y = start_y;
    let mut walk_dir = 2; // Start moving right from the topmost-leftmost pixel

    let max_steps = 2 * width * height;
    for _ in 0..max_steps {
        points.push(Point {
            x: curr_x as f64,
            y: curr_y as f64,
        });

        let mut found = false;
        // Search neighbors CW starting from the "relative left" of the last move
        for i in 0..8 {
            let dir = (walk_dir + 6 + i) % 8;
            let nx = curr_x as isize + dx[dir];
            let ny = curr_y as isize + dy[dir];

            if nx >= 0
                && nx < width as isize
                && ny >= 0
                && ny < height as isize
                && labels[ny as usize * width + nx as usize] == target_label
            {
                curr_x = nx as usize;
                curr_y = ny as usize;
                walk_dir = dir;
                found = true;
                break;
            }
        }

        if !found || (curr_x == start_x && curr_y == start_y) {
            break;
        }
    }

    points
}
