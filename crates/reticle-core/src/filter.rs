use std::cmp::Ordering;
use std::f64::consts::PI;

use crate::target::Target;
use crate::watershed;

/// Expected target geometry; `dim` is the radius (circle) or half side
/// length (square) in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetShape {
    Circle,
    Square,
}

/// Valid polygon area range for the expected target size.
#[derive(Clone, Copy, Debug)]
pub struct AreaBounds {
    pub min: f64,
    pub max: f64,
}

/// Compute area bounds for a target of the given shape and dimension:
/// circles accept radii in `[0.5, 1.25] * dim`, squares accept areas in
/// `[0.5, 1.25] * (2 * dim)^2`.
pub fn area_bounds(shape: TargetShape, dim: f64) -> AreaBounds {
    match shape {
        TargetShape::Circle => {
            let min_radius = 0.5 * dim;
            let max_radius = 1.25 * dim;
            AreaBounds {
                min: PI * min_radius * min_radius,
                max: PI * max_radius * max_radius,
            }
        }
        TargetShape::Square => {
            let area = (2.0 * dim) * (2.0 * dim);
            AreaBounds {
                min: 0.5 * area,
                max: 1.25 * area,
            }
        }
    }
}

/// Acceptance thresholds for one filtering pass.
#[derive(Clone, Debug)]
pub struct FilterParams {
    pub bounds: AreaBounds,
    /// Minimum convexity a target must exceed.
    pub convexity_threshold: f64,
    /// Maximum centroid distance from the frame center, in pixels.
    pub centrality_tolerance: f64,
    /// Frame size (height, width); the watershed raster matches it.
    pub frame_dim: (usize, usize),
}

/// Result of testing one candidate.
#[derive(Debug)]
pub enum FilterOutcome {
    Accepted(Target),
    Rejected,
}

/// Apply the acceptance tests to every candidate, routing low-convexity
/// candidates through the watershed splitter.
///
/// Accepted targets are sorted by area, largest first.
pub fn filter_targets(targets: Vec<Target>, params: &FilterParams) -> Vec<Target> {
    let mut accepted: Vec<Target> = targets
        .into_iter()
        .filter_map(|t| match filter_test(t, params) {
            FilterOutcome::Accepted(t) => Some(t),
            FilterOutcome::Rejected => None,
        })
        .collect();

    accepted.sort_by(|a, b| b.area.partial_cmp(&a.area).unwrap_or(Ordering::Equal));
    accepted
}

/// Decision table: convex targets passing area and centrality are accepted
/// as-is; non-convex targets passing area and centrality are handed to the
/// watershed splitter; everything else is rejected.
pub fn filter_test(target: Target, params: &FilterParams) -> FilterOutcome {
    let (ctest, atest, centtest) = test_target(&target, params, params.convexity_threshold);

    if ctest && atest && centtest {
        FilterOutcome::Accepted(target)
    } else if !ctest && atest && centtest {
        match watershed::split_target(&target, params) {
            Some(split) => FilterOutcome::Accepted(split),
            None => FilterOutcome::Rejected,
        }
    } else {
        FilterOutcome::Rejected
    }
}

/// The three acceptance tests: (convexity, area, centrality).
pub(crate) fn test_target(
    target: &Target,
    params: &FilterParams,
    cthreshold: f64,
) -> (bool, bool, bool) {
    let ctest = target.convexity() > cthreshold;

    let (dx, dy) = target.dev_centroid();
    let centtest = (dx * dx + dy * dy).sqrt() < params.centrality_tolerance;

    let atest = target.area > params.bounds.min && target.area < params.bounds.max;

    (ctest, atest, centtest)
}
