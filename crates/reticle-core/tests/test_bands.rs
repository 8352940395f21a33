mod common;

use reticle_core::bands::{Band, BandGenerator, BandStrategy, LinearSearch};
use reticle_core::error::ReticleError;

use common::uniform_gray;

#[test]
fn test_geometric_first_bands() {
    // Mean of nonzero pixels = 100; first sweep uses the 128-wide band
    // shifted down by 2: center 98, low 34, high 162.
    let frame = uniform_gray(16, 16, 100);
    let mut gen = BandGenerator::new(&frame, BandStrategy::Geometric).unwrap();

    assert_eq!(gen.next(), Some(Band { low: 34, high: 162 }));
    assert_eq!(gen.next(), Some(Band { low: 32, high: 160 }));
}

#[test]
fn test_geometric_bands_stay_in_range() {
    let frame = uniform_gray(16, 16, 200);
    let gen = BandGenerator::new(&frame, BandStrategy::Geometric).unwrap();

    let bands: Vec<Band> = gen.collect();
    assert!(!bands.is_empty());
    for band in &bands {
        assert!(band.low <= band.high);
    }
}

#[test]
fn test_geometric_sweep_is_finite() {
    let frame = uniform_gray(16, 16, 128);
    let count = BandGenerator::new(&frame, BandStrategy::Geometric)
        .unwrap()
        .count();
    // Every (width, shift, direction) sweep leaves [0, 255] eventually.
    assert!(count > 0);
    assert!(count < 10_000);
}

#[test]
fn test_band_sequence_is_deterministic() {
    let frame = uniform_gray(32, 32, 173);

    let first: Vec<Band> = BandGenerator::new(&frame, BandStrategy::Geometric)
        .unwrap()
        .collect();
    let second: Vec<Band> = BandGenerator::new(&frame, BandStrategy::Geometric)
        .unwrap()
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_adaptive_yields_single_full_range_band() {
    let frame = uniform_gray(8, 8, 50);
    let bands: Vec<Band> = BandGenerator::new(&frame, BandStrategy::Adaptive)
        .unwrap()
        .collect();

    assert_eq!(bands, vec![Band { low: 0, high: 255 }]);
}

#[test]
fn test_linear_search_widening() {
    let frame = uniform_gray(8, 8, 100);
    let search = LinearSearch {
        start: Some(100),
        step: 2,
        width: 10,
        n: 3,
    };
    let bands: Vec<Band> = BandGenerator::new(&frame, BandStrategy::Linear(search))
        .unwrap()
        .collect();

    let expected = vec![
        Band { low: 90, high: 110 },
        Band { low: 92, high: 112 },
        Band { low: 94, high: 114 },
        Band { low: 80, high: 120 },
        Band { low: 82, high: 122 },
        Band { low: 84, high: 124 },
        Band { low: 70, high: 130 },
        Band { low: 72, high: 132 },
        Band { low: 74, high: 134 },
    ];
    assert_eq!(bands, expected);
}

#[test]
fn test_linear_search_default_start_from_mean() {
    // start = mean - 3 * width = 100 - 30 = 70; first band (60, 80).
    let frame = uniform_gray(8, 8, 100);
    let search = LinearSearch {
        start: None,
        step: 2,
        width: 10,
        n: 2,
    };
    let mut gen = BandGenerator::new(&frame, BandStrategy::Linear(search)).unwrap();

    assert_eq!(gen.next(), Some(Band { low: 60, high: 80 }));
}

#[test]
fn test_linear_search_clamps_to_valid_range() {
    let frame = uniform_gray(8, 8, 100);
    let search = LinearSearch {
        start: Some(-500),
        step: 2,
        width: 1,
        n: 4,
    };
    let bands: Vec<Band> = BandGenerator::new(&frame, BandStrategy::Linear(search))
        .unwrap()
        .collect();

    assert_eq!(bands.len(), 16);
    for band in &bands {
        assert_eq!(*band, Band { low: 0, high: 1 });
    }
}

#[test]
fn test_all_zero_frame_is_invalid() {
    let frame = uniform_gray(8, 8, 0);
    let err = BandGenerator::new(&frame, BandStrategy::Geometric).unwrap_err();
    assert!(matches!(err, ReticleError::InvalidFrame(_)));
}
