mod common;

use ndarray::Array2;

use reticle_core::contour::{
    convex_hull, extract_from_labels, extract_targets, label_components, polygon_area,
    polygon_centroid,
};

#[test]
fn test_label_components_counts_regions() {
    let mut mask = Array2::from_elem((10, 10), false);
    // Two separate blobs.
    for row in 1..4 {
        for col in 1..4 {
            mask[[row, col]] = true;
        }
    }
    for row in 6..9 {
        for col in 6..9 {
            mask[[row, col]] = true;
        }
    }

    let (labels, count) = label_components(&mask);
    assert_eq!(count, 2);
    assert_eq!(labels[[2, 2]], 1);
    assert_eq!(labels[[7, 7]], 2);
    assert_eq!(labels[[0, 0]], 0);
}

#[test]
fn test_label_components_merges_diagonals() {
    // Diagonal staircase: 8-connectivity keeps it one region.
    let mut mask = Array2::from_elem((5, 5), false);
    for i in 0..5 {
        mask[[i, i]] = true;
    }

    let (_, count) = label_components(&mask);
    assert_eq!(count, 1);
}

#[test]
fn test_polygon_area_and_centroid() {
    // Unit square scaled by 4: area 16, centroid (2, 2).
    let square = vec![(0, 0), (4, 0), (4, 4), (0, 4)];
    assert_eq!(polygon_area(&square), 16.0);

    let (cx, cy) = polygon_centroid(&square);
    assert!((cx - 2.0).abs() < 1e-9);
    assert!((cy - 2.0).abs() < 1e-9);
}

#[test]
fn test_convex_hull_drops_interior_points() {
    let points = vec![(0, 0), (4, 0), (4, 4), (0, 4), (2, 2), (1, 2)];
    let hull = convex_hull(&points);

    assert_eq!(hull.len(), 4);
    assert_eq!(polygon_area(&hull), 16.0);
}

#[test]
fn test_disk_yields_single_convex_target() {
    let mask = common::disk_gray(80, 80, 40.0, 40.0, 16.0, 1)
        .data
        .mapv(|v| v > 0);
    let targets = extract_targets(&mask, (40.0, 40.0));

    assert_eq!(targets.len(), 1);
    let t = &targets[0];

    let expected = std::f64::consts::PI * 16.0 * 16.0;
    assert!(t.area > expected * 0.85);
    assert!(t.area < expected * 1.05);

    assert!(t.hull_area >= t.area);
    assert!(t.convexity() > 0.9);
    assert!(t.convexity() <= 1.0);

    assert!((t.centroid.0 - 40.0).abs() < 0.5);
    assert!((t.centroid.1 - 40.0).abs() < 0.5);
    assert!(t.mask.is_none());
}

#[test]
fn test_dev_centroid_is_relative_to_origin() {
    let mask = common::disk_gray(60, 60, 35.0, 27.0, 10.0, 1)
        .data
        .mapv(|v| v > 0);
    let targets = extract_targets(&mask, (30.0, 30.0));

    assert_eq!(targets.len(), 1);
    let (dx, dy) = targets[0].dev_centroid();
    assert!((dx - 5.0).abs() < 0.5);
    assert!((dy + 3.0).abs() < 0.5);
}

#[test]
fn test_tiny_regions_are_noise() {
    let mut mask = Array2::from_elem((10, 10), false);
    // Single pixel and a 2x2 block: boundaries shorter than 5 points.
    mask[[1, 1]] = true;
    mask[[5, 5]] = true;
    mask[[5, 6]] = true;
    mask[[6, 5]] = true;
    mask[[6, 6]] = true;

    let targets = extract_targets(&mask, (5.0, 5.0));
    assert!(targets.is_empty());
}

#[test]
fn test_degenerate_line_is_discarded() {
    let mut mask = Array2::from_elem((5, 10), false);
    for col in 1..8 {
        mask[[2, col]] = true;
    }

    // Long enough boundary, but zero enclosed area.
    let targets = extract_targets(&mask, (5.0, 2.5));
    assert!(targets.is_empty());
}

#[test]
fn test_extract_from_labels_attaches_masks() {
    let mut mask = Array2::from_elem((20, 20), false);
    for row in 2..10 {
        for col in 2..10 {
            mask[[row, col]] = true;
        }
    }
    for row in 12..18 {
        for col in 12..18 {
            mask[[row, col]] = true;
        }
    }

    let (labels, count) = label_components(&mask);
    let targets = extract_from_labels(&labels, count, (10.0, 10.0), true);

    assert_eq!(targets.len(), 2);
    for t in &targets {
        let region = t.mask.as_ref().expect("watershed-style extraction carries masks");
        assert!(region.iter().any(|&m| m));
    }
    // Labels are extracted in scan order; the first is the larger square.
    assert!(targets[0].area > targets[1].area);
}
