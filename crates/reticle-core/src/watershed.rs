use std::collections::BinaryHeap;

use ndarray::Array2;

use crate::consts::{WATERSHED_MIN_HISTOGRAM_BINS, WATERSHED_RELAXED_FACTOR};
use crate::contour::{extract_from_labels, label_components};
use crate::filter::{test_target, FilterParams};
use crate::target::Target;

/// Split a merged low-convexity region into individually valid targets.
///
/// The polygon is rendered into a blank raster, a distance transform seeds
/// watershed markers at its local maxima, and the flooded label raster is
/// re-extracted into candidate targets tested with a relaxed convexity
/// threshold. When no label passes, regions are pruned one histogram bin at
/// a time and the remainder re-tested.
///
/// Returns the first passing target, or `None`. Degenerate geometry never
/// raises; it falls through to the next strategy.
pub fn split_target(target: &Target, params: &FilterParams) -> Option<Target> {
    let mask = rasterize_polygon(&target.boundary, params.frame_dim);
    let dist = distance_transform(&mask);
    let peaks = local_maxima(&dist, &mask);

    let (markers, n_markers) = label_components(&peaks);
    if n_markers == 0 {
        return None;
    }

    let labeled = watershed(&dist, &markers, &mask);
    let relaxed = params.convexity_threshold * WATERSHED_RELAXED_FACTOR;

    let candidates = extract_from_labels(&labeled, n_markers, target.origin, true);
    if let Some(found) = first_passing(candidates, params, relaxed) {
        return Some(found);
    }

    prune_by_histogram(&labeled, n_markers, target.origin, params, relaxed)
}

fn first_passing(candidates: Vec<Target>, params: &FilterParams, relaxed: f64) -> Option<Target> {
    candidates.into_iter().find(|t| {
        let (ctest, atest, centtest) = test_target(t, params, relaxed);
        ctest && atest && centtest
    })
}

/// Region-pruning fallback: histogram the label raster, discard the
/// background-dominant bin, then cumulatively zero out one nonzero bin's
/// value range at a time and re-test what remains.
fn prune_by_histogram(
    labeled: &Array2<u32>,
    n_labels: u32,
    origin: (f64, f64),
    params: &FilterParams,
    relaxed: f64,
) -> Option<Target> {
    let max_label = labeled.iter().copied().max().unwrap_or(0);
    if max_label == 0 {
        return None;
    }

    let bins = WATERSHED_MIN_HISTOGRAM_BINS.max(n_labels as usize);
    let span = max_label as f64;
    let mut counts = vec![0usize; bins];
    for &v in labeled.iter() {
        let b = (((v as f64 / span) * bins as f64) as usize).min(bins - 1);
        counts[b] += 1;
    }
    let edges: Vec<f64> = (0..=bins).map(|i| i as f64 * span / bins as f64).collect();

    // Bin 0 is dominated by background; skip it.
    let mut remaining = labeled.mapv(|v| v > 0);
    for idx in 1..bins {
        if counts[idx] == 0 {
            continue;
        }
        let (bl, bu) = (edges[idx], edges[idx + 1]);

        for ((row, col), keep) in remaining.indexed_iter_mut() {
            let v = labeled[[row, col]] as f64;
            if *keep && v >= bl && v <= bu {
                *keep = false;
            }
        }

        let (labels, count) = label_components(&remaining);
        let candidates = extract_from_labels(&labels, count, origin, true);
        if let Some(found) = first_passing(candidates, params, relaxed) {
            return Some(found);
        }
    }

    None
}

/// Render a closed polygon into a raster of the given (height, width) with
/// even-odd scanline filling; boundary pixels are always set.
pub fn rasterize_polygon(boundary: &[(i32, i32)], dim: (usize, usize)) -> Array2<bool> {
    let (h, w) = dim;
    let mut mask = Array2::from_elem((h, w), false);
    let n = boundary.len();
    if n == 0 {
        return mask;
    }

    let mut xs: Vec<f64> = Vec::new();
    for row in 0..h {
        let y = row as f64;
        xs.clear();
        for i in 0..n {
            let (px0, py0) = boundary[i];
            let (px1, py1) = boundary[(i + 1) % n];
            let (x0, y0) = (px0 as f64, py0 as f64);
            let (x1, y1) = (px1 as f64, py1 as f64);
            if (y0 <= y && y < y1) || (y1 <= y && y < y0) {
                xs.push(x0 + (y - y0) * (x1 - x0) / (y1 - y0));
            }
        }
        xs.sort_by(f64::total_cmp);

        for pair in xs.chunks_exact(2) {
            let lo = pair[0].ceil().max(0.0) as usize;
            let hi = pair[1].floor().min(w as f64 - 1.0) as i64;
            for col in lo as i64..=hi {
                mask[[row, col as usize]] = true;
            }
        }
    }

    for &(x, y) in boundary {
        if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h {
            mask[[y as usize, x as usize]] = true;
        }
    }

    mask
}

const DT_INF: f64 = 1e20;

/// Exact Euclidean distance to the nearest background pixel
/// (Felzenszwalb-Huttenlocher two-pass transform).
pub fn distance_transform(mask: &Array2<bool>) -> Array2<f64> {
    let (h, w) = mask.dim();
    let mut dist = Array2::<f64>::zeros((h, w));
    for ((row, col), v) in dist.indexed_iter_mut() {
        *v = if mask[[row, col]] { DT_INF } else { 0.0 };
    }

    let len = h.max(w);
    let mut f = vec![0.0f64; len];
    let mut d = vec![0.0f64; len];
    let mut v = vec![0usize; len];
    let mut z = vec![0.0f64; len + 1];

    for col in 0..w {
        for row in 0..h {
            f[row] = dist[[row, col]];
        }
        dt_1d(&f[..h], &mut d[..h], &mut v[..h], &mut z[..h + 1]);
        for row in 0..h {
            dist[[row, col]] = d[row];
        }
    }

    for row in 0..h {
        for col in 0..w {
            f[col] = dist[[row, col]];
        }
        dt_1d(&f[..w], &mut d[..w], &mut v[..w], &mut z[..w + 1]);
        for col in 0..w {
            dist[[row, col]] = d[col];
        }
    }

    dist.mapv_inplace(f64::sqrt);
    dist
}

/// 1D squared-distance transform via the lower envelope of parabolas.
fn dt_1d(f: &[f64], d: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    let mut k = 0usize;
    v[0] = 0;
    z[0] = -DT_INF;
    z[1] = DT_INF;

    for q in 1..n {
        loop {
            let p = v[k];
            let s = ((f[q] + (q * q) as f64) - (f[p] + (p * p) as f64)) / (2.0 * (q - p) as f64);
            if s <= z[k] {
                k -= 1;
            } else {
                k += 1;
                v[k] = q;
                z[k] = s;
                z[k + 1] = DT_INF;
                break;
            }
        }
    }

    k = 0;
    for q in 0..n {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let dq = q as f64 - v[k] as f64;
        d[q] = dq * dq + f[v[k]];
    }
}

/// Mark pixels that are 8-neighborhood maxima of the distance raster within
/// the mask.
pub fn local_maxima(dist: &Array2<f64>, mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = dist.dim();
    let mut peaks = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] || dist[[row, col]] <= 0.0 {
                continue;
            }
            let center = dist[[row, col]];
            let mut is_peak = true;
            'scan: for dr in -1i32..=1 {
                for dc in -1i32..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let nr = row as i32 + dr;
                    let nc = col as i32 + dc;
                    if nr < 0 || nc < 0 || nr >= h as i32 || nc >= w as i32 {
                        continue;
                    }
                    if dist[[nr as usize, nc as usize]] > center {
                        is_peak = false;
                        break 'scan;
                    }
                }
            }
            peaks[[row, col]] = is_peak;
        }
    }

    peaks
}

#[derive(Clone, Copy, Debug)]
struct QueueItem {
    priority: f64,
    order: u64,
    row: usize,
    col: usize,
    label: u32,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Max-heap on distance, FIFO on insertion order for ties.
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Priority-flood watershed: grow marker labels outward in order of
/// decreasing distance, constrained to the mask.
pub fn watershed(dist: &Array2<f64>, markers: &Array2<u32>, mask: &Array2<bool>) -> Array2<u32> {
    let (h, w) = dist.dim();
    let mut out = markers.clone();
    let mut heap: BinaryHeap<QueueItem> = BinaryHeap::new();
    let mut order = 0u64;

    for ((row, col), &label) in markers.indexed_iter() {
        if label > 0 {
            heap.push(QueueItem {
                priority: dist[[row, col]],
                order,
                row,
                col,
                label,
            });
            order += 1;
        }
    }

    while let Some(item) = heap.pop() {
        for (dr, dc) in [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)] {
            let nr = item.row as i32 + dr;
            let nc = item.col as i32 + dc;
            if nr < 0 || nc < 0 || nr >= h as i32 || nc >= w as i32 {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if mask[[nr, nc]] && out[[nr, nc]] == 0 {
                out[[nr, nc]] = item.label;
                heap.push(QueueItem {
                    priority: dist[[nr, nc]],
                    order,
                    row: nr,
                    col: nc,
                    label: item.label,
                });
                order += 1;
            }
        }
    }

    out
}
