mod common;

use ndarray::Array2;

use reticle_core::bands::Band;
use reticle_core::frame::GrayFrame;
use reticle_core::segment::Segmenter;

use common::disk_gray;

#[test]
fn test_fixed_band_is_inclusive() {
    let mut data = Array2::<u8>::zeros((1, 5));
    for (i, v) in [10u8, 40, 50, 100, 101].iter().enumerate() {
        data[[0, i]] = *v;
    }
    let frame = GrayFrame::new(data);

    let mut seg = Segmenter::new(false, 20, 5);
    let mask = seg.segment(&frame, Band { low: 40, high: 100 });

    assert!(!mask[[0, 0]]);
    assert!(mask[[0, 1]]);
    assert!(mask[[0, 2]]);
    assert!(mask[[0, 3]]);
    assert!(!mask[[0, 4]]);
}

#[test]
fn test_fixed_band_selects_disk() {
    let frame = disk_gray(60, 60, 30.0, 30.0, 12.0, 180);
    let mut seg = Segmenter::new(false, 20, 5);
    let mask = seg.segment(&frame, Band { low: 150, high: 210 });

    assert!(mask[[30, 30]]);
    assert!(!mask[[2, 2]]);

    let count = mask.iter().filter(|&&m| m).count();
    let expected = std::f64::consts::PI * 12.0 * 12.0;
    assert!((count as f64) > expected * 0.9);
    assert!((count as f64) < expected * 1.1);
}

#[test]
fn test_adaptive_separates_disk_from_flat_background() {
    // Bright disk on a mid-gray field: the local mean rises near the disk,
    // pushing the surrounding background below threshold while the disk and
    // the far field stay foreground.
    let data = Array2::from_shape_fn((80, 80), |(row, col)| {
        let dx = col as f64 - 40.0;
        let dy = row as f64 - 40.0;
        if (dx * dx + dy * dy).sqrt() <= 12.0 {
            255u8
        } else {
            100u8
        }
    });
    let frame = GrayFrame::new(data);

    let mut seg = Segmenter::new(true, 20, 5);
    let mask = seg.segment(&frame, Band { low: 0, high: 255 });

    // Disk interior is foreground.
    assert!(mask[[40, 40]]);
    // The ring just outside the disk falls below the raised local mean.
    assert!(!mask[[40, 54]]);
}

#[test]
fn test_adaptive_blocksize_grows_each_attempt() {
    let frame = disk_gray(40, 40, 20.0, 20.0, 8.0, 200);
    let mut seg = Segmenter::new(true, 20, 5);

    assert_eq!(seg.blocksize(), 20);
    seg.segment(&frame, Band { low: 0, high: 255 });
    assert_eq!(seg.blocksize(), 25);
    seg.segment(&frame, Band { low: 0, high: 255 });
    assert_eq!(seg.blocksize(), 30);
}
