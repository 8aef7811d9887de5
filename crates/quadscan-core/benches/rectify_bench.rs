use divan::bench;
use quadscan_core::raster::Raster;
use quadscan_core::{rectify, rotate90_cw, Quad};

fn main() {
    divan::main();
}

#[bench]
fn bench_rectify_a4_sized_region(bencher: divan::Bencher) {
    let src = Raster::filled(1920, 1080, [128, 128, 128]).unwrap();
    let quad = Quad::from_points(&[
        [300.0, 120.0],
        [1650.0, 180.0],
        [1600.0, 980.0],
        [260.0, 920.0],
    ])
    .unwrap();

    bencher.bench_local(move || rectify(&src, &quad).unwrap());
}

#[bench]
fn bench_rotate_1080p(bencher: divan::Bencher) {
    let src = Raster::filled(1920, 1080, [128, 128, 128]).unwrap();

    bencher.bench_local(move || rotate90_cw(&src));
}
