use crate::consts::{
    ARC_FIT_CONVEXITY_TOLERANCE, ARC_FIT_MAX_ITERATIONS, ARC_FIT_TOLERANCE,
    DEVIATION_HISTOGRAM_BINS,
};
use crate::filter::TargetShape;
use crate::target::Target;

/// Estimator selection knobs; see `LocatorConfig`.
#[derive(Clone, Copy, Debug)]
pub struct EstimatorOptions {
    pub use_histogram: bool,
    pub use_arc_approximation: bool,
}

/// Estimate the deviation `(dx, dy)` of the detected target from the frame
/// center, in pixels, with the frame-to-physical axis mapping applied.
///
/// Circular targets use the arc fit when enabled and the leading candidate
/// is convex enough; everything else averages centroid deviations.
pub fn estimate(
    targets: &[Target],
    shape: TargetShape,
    dim: f64,
    opts: &EstimatorOptions,
) -> (f64, f64) {
    if shape == TargetShape::Circle && opts.use_arc_approximation {
        arc_approximation(&targets[0], dim, opts)
    } else {
        averaged_deviation(targets, opts.use_histogram)
    }
}

/// Deviation of the accepted targets' centroids from the frame center.
///
/// With more than two targets and histogram mode enabled, each axis takes
/// the center of the most populous deviation bin instead of the mean. The x
/// component is sign-inverted by the frame-to-physical axis convention.
pub fn averaged_deviation(targets: &[Target], use_histogram: bool) -> (f64, f64) {
    let devs: Vec<(f64, f64)> = targets.iter().map(|t| t.dev_centroid()).collect();

    let (dx, dy) = if devs.len() > 2 && use_histogram {
        let xs: Vec<f64> = devs.iter().map(|d| d.0).collect();
        let ys: Vec<f64> = devs.iter().map(|d| d.1).collect();
        (histogram_mode(&xs), histogram_mode(&ys))
    } else {
        let n = devs.len() as f64;
        let (sx, sy) = devs
            .iter()
            .fold((0.0, 0.0), |(sx, sy), d| (sx + d.0, sy + d.1));
        (sx / n, sy / n)
    };

    (-dx, dy)
}

/// Center of the most populous fixed-bin histogram bucket; ties favor the
/// highest bin index.
fn histogram_mode(values: &[f64]) -> f64 {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi <= lo {
        return lo;
    }

    let bins = DEVIATION_HISTOGRAM_BINS;
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let b = (((v - lo) / width) as usize).min(bins - 1);
        counts[b] += 1;
    }

    let mut best = 0usize;
    for (i, &c) in counts.iter().enumerate() {
        if c >= counts[best] {
            best = i;
        }
    }

    lo + (best as f64 + 0.5) * width
}

/// Arc-center estimation for a circular target of known radius.
///
/// Falls back to the averaged deviation when the target is not convex
/// enough for the boundary to approximate a circular arc.
pub fn arc_approximation(target: &Target, radius: f64, opts: &EstimatorOptions) -> (f64, f64) {
    if target.convexity() <= ARC_FIT_CONVEXITY_TOLERANCE {
        return averaged_deviation(std::slice::from_ref(target), opts.use_histogram);
    }

    let (tx, ty) = target.origin;
    let pts: Vec<(f64, f64)> = target
        .boundary
        .iter()
        .map(|&(x, y)| (x as f64 - tx, y as f64 - ty))
        .collect();

    let (cx, cy) = fit_circle_center(&pts, radius);
    (-cx, cy)
}

/// Fit the center of a circle of fixed radius to a set of boundary points,
/// minimizing the sum of squared radial residuals.
///
/// Uses the fixed-point iteration `c = centroid + r * mean(unit(c - p))`
/// starting from the point centroid.
fn fit_circle_center(points: &[(f64, f64)], radius: f64) -> (f64, f64) {
    let n = points.len() as f64;
    let (mx, my) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.0, sy + p.1));
    let (mx, my) = (mx / n, my / n);

    let mut cx = mx;
    let mut cy = my;
    for _ in 0..ARC_FIT_MAX_ITERATIONS {
        let mut ux = 0.0f64;
        let mut uy = 0.0f64;
        for &(px, py) in points {
            let dx = cx - px;
            let dy = cy - py;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > 0.0 {
                ux += dx / dist;
                uy += dy / dist;
            }
        }

        let next_x = mx + radius * ux / n;
        let next_y = my + radius * uy / n;
        let shift = ((next_x - cx).powi(2) + (next_y - cy).powi(2)).sqrt();
        cx = next_x;
        cy = next_y;
        if shift < ARC_FIT_TOLERANCE {
            break;
        }
    }

    (cx, cy)
}
