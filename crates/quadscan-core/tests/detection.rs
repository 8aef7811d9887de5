#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::uninlined_format_args)]

use quadscan_core::raster::Raster;
use quadscan_core::test_utils::{compute_corner_error, fill_quad, page_scene};
use quadscan_core::{DetectMode, ScanError, Scanner, ScannerConfig};

#[test]
fn test_single_page_accuracy() {
    let test_cases = [
        // Axis-aligned page
        [[40.0, 40.0], [280.0, 40.0], [280.0, 360.0], [40.0, 360.0]],
        // Slight perspective skew
        [[50.0, 35.0], [290.0, 55.0], [300.0, 380.0], [35.0, 350.0]],
        // Small sub-photo
        [[120.0, 100.0], [220.0, 104.0], [218.0, 240.0], [118.0, 236.0]],
    ];

    for corners in test_cases {
        let (raster, gt) = page_scene(400, 440, corners);
        let mut scanner = Scanner::new();

        let page = scanner.detect_page(&raster).unwrap();
        let err = compute_corner_error(&page, &gt);
        println!("corners {:?}: error = {:.2} px", corners[0], err);
        assert!(err < 3.0, "corner error {:.2} px too high", err);
    }
}

#[test]
fn test_multi_region_detection_in_scan_order() {
    let mut raster = Raster::filled(300, 200, [15, 15, 15]).unwrap();
    // Two sub-photos; the upper one must come first in the region set.
    fill_quad(
        &mut raster,
        [[30.0, 20.0], [130.0, 20.0], [130.0, 90.0], [30.0, 90.0]],
        [240, 240, 240],
    );
    fill_quad(
        &mut raster,
        [[160.0, 110.0], [280.0, 110.0], [280.0, 180.0], [160.0, 180.0]],
        [240, 240, 240],
    );

    let mut scanner = Scanner::new();
    let regions = scanner.detect(&raster, DetectMode::MultiRegion);

    assert_eq!(regions.len(), 2);
    assert!(regions[0].corners[0].y < regions[1].corners[0].y);
    assert!((regions[0].corners[0].x - 30.0).abs() < 2.0);
    assert!((regions[1].corners[0].x - 160.0).abs() < 2.0);
}

#[test]
fn test_whole_page_mode_keeps_largest() {
    let mut raster = Raster::filled(300, 200, [15, 15, 15]).unwrap();
    fill_quad(
        &mut raster,
        [[10.0, 10.0], [60.0, 10.0], [60.0, 60.0], [10.0, 60.0]],
        [240, 240, 240],
    );
    fill_quad(
        &mut raster,
        [[100.0, 30.0], [280.0, 30.0], [280.0, 180.0], [100.0, 180.0]],
        [240, 240, 240],
    );

    let mut scanner = Scanner::new();
    let regions = scanner.detect(&raster, DetectMode::WholePage);

    assert_eq!(regions.len(), 1);
    assert!((regions[0].corners[0].x - 100.0).abs() < 2.0);
}

#[test]
fn test_blank_raster_finds_nothing() {
    let blank = Raster::filled(128, 128, [30, 30, 30]).unwrap();
    let mut scanner = Scanner::new();

    assert!(scanner.detect(&blank, DetectMode::MultiRegion).is_empty());
    assert!(scanner.detect(&blank, DetectMode::WholePage).is_empty());
    assert_eq!(scanner.detect_page(&blank), Err(ScanError::NoRegionFound));
}

#[test]
fn test_triangles_are_not_regions() {
    let mut raster = Raster::filled(200, 200, [15, 15, 15]).unwrap();
    // Degenerate "quad" input to fill_quad: two corners coincide, so the
    // painted shape is a triangle and must not survive the 4-point filter.
    fill_quad(
        &mut raster,
        [[100.0, 20.0], [100.0, 20.0], [180.0, 170.0], [20.0, 170.0]],
        [240, 240, 240],
    );

    let mut scanner = Scanner::new();
    let regions = scanner.detect(&raster, DetectMode::MultiRegion);
    assert!(regions.is_empty(), "triangle misdetected: {:?}", regions);
}

#[test]
fn test_custom_threshold_config() {
    // A dim page below the default threshold is invisible by default but
    // detectable with a lowered threshold.
    let mut raster = Raster::filled(160, 160, [10, 10, 10]).unwrap();
    fill_quad(
        &mut raster,
        [[30.0, 30.0], [130.0, 30.0], [130.0, 130.0], [30.0, 130.0]],
        [90, 90, 90],
    );

    let mut default_scanner = Scanner::new();
    assert!(default_scanner.detect(&raster, DetectMode::MultiRegion).is_empty());

    let config = ScannerConfig::builder().threshold(60).build();
    let mut tuned_scanner = Scanner::with_config(config);
    let regions = tuned_scanner.detect(&raster, DetectMode::MultiRegion);
    assert_eq!(regions.len(), 1);
}

#[test]
fn test_detection_replaces_region_set() {
    let (first_scene, _) = page_scene(128, 128, [[20.0, 20.0], [100.0, 20.0], [100.0, 100.0], [20.0, 100.0]]);
    let (second_scene, _) = page_scene(128, 128, [[40.0, 40.0], [90.0, 40.0], [90.0, 90.0], [40.0, 90.0]]);

    let mut scanner = Scanner::new();
    let first = scanner.detect(&first_scene, DetectMode::MultiRegion);
    let second = scanner.detect(&second_scene, DetectMode::MultiRegion);

    // Each call stands alone: the new set fully replaces the old indices.
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert!((first[0].corners[0].x - 20.0).abs() < 2.0);
    assert!((second[0].corners[0].x - 40.0).abs() < 2.0);
}
