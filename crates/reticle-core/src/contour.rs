use ndarray::Array2;

use crate::consts::MIN_BOUNDARY_POINTS;
use crate::target::Target;

/// Moore neighborhood in clockwise order (image coordinates, y down),
/// starting west.
const MOORE: [(i32, i32); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// Label connected regions of a binary mask using two-pass union-find with
/// 8-connectivity.
///
/// Returns the label raster (0 = background) and the number of labels;
/// labels are compacted to `1..=count` in scan order of first appearance.
pub fn label_components(mask: &Array2<bool>) -> (Array2<u32>, u32) {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return (labels, 0);
    }

    // parent[0] unused; provisional labels start at 1.
    let mut parent: Vec<u32> = vec![0];

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            // Previously visited neighbors: NW, N, NE, W.
            let mut adjacent = [0u32; 4];
            let mut n_adjacent = 0;
            let mut smallest = u32::MAX;
            for (dr, dc) in [(-1i32, -1i32), (-1, 0), (-1, 1), (0, -1)] {
                let nr = row as i32 + dr;
                let nc = col as i32 + dc;
                if nr >= 0 && nc >= 0 && nc < w as i32 {
                    let lbl = labels[[nr as usize, nc as usize]];
                    if lbl > 0 {
                        adjacent[n_adjacent] = lbl;
                        n_adjacent += 1;
                        smallest = smallest.min(lbl);
                    }
                }
            }

            if n_adjacent == 0 {
                let fresh = parent.len() as u32;
                parent.push(fresh);
                labels[[row, col]] = fresh;
            } else {
                labels[[row, col]] = smallest;
                for &other in &adjacent[..n_adjacent] {
                    union(&mut parent, smallest, other);
                }
            }
        }
    }

    // Flatten and compact roots to dense labels in scan order.
    for i in 1..parent.len() {
        parent[i] = find(&parent, i as u32);
    }
    let mut dense = vec![0u32; parent.len()];
    let mut count = 0u32;
    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = parent[lbl as usize] as usize;
            if dense[root] == 0 {
                count += 1;
                dense[root] = count;
            }
            labels[[row, col]] = dense[root];
        }
    }

    (labels, count)
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}

/// Trace the outer boundary of a region with Moore-neighbor tracing.
///
/// `start` must be the region's first pixel in scan order (topmost row,
/// leftmost column), so the pixel to its west is outside the region.
/// Terminates when the start pixel is re-entered from the initial
/// backtrack position.
pub fn trace_boundary(
    is_region: impl Fn(i32, i32) -> bool,
    start: (i32, i32),
    max_steps: usize,
) -> Vec<(i32, i32)> {
    let mut boundary = vec![start];
    let mut current = start;
    let init_backtrack = (start.0 - 1, start.1);
    let mut backtrack = init_backtrack;
    // One-pixel-wide appendages can re-enter the start pixel from a
    // different side than the initial state; a repeated (pixel, backtrack)
    // pair closes the walk in those cases.
    let mut seen = std::collections::HashSet::new();

    for _ in 0..max_steps {
        if !seen.insert((current, backtrack)) {
            return boundary;
        }

        let bidx = MOORE
            .iter()
            .position(|&(dx, dy)| (current.0 + dx, current.1 + dy) == backtrack)
            .unwrap_or(0);

        let mut advanced = false;
        for k in 1..=MOORE.len() {
            let idx = (bidx + k) % MOORE.len();
            let candidate = (current.0 + MOORE[idx].0, current.1 + MOORE[idx].1);
            if is_region(candidate.0, candidate.1) {
                let prev = (bidx + k - 1) % MOORE.len();
                backtrack = (current.0 + MOORE[prev].0, current.1 + MOORE[prev].1);
                if candidate == start && backtrack == init_backtrack {
                    return boundary;
                }
                boundary.push(candidate);
                current = candidate;
                advanced = true;
                break;
            }
        }

        if !advanced {
            // Isolated pixel.
            return boundary;
        }
    }

    boundary
}

/// Unsigned polygon area via the shoelace formula.
pub fn polygon_area(points: &[(i32, i32)]) -> f64 {
    signed_area(points).abs()
}

fn signed_area(points: &[(i32, i32)]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0i64;
    for (i, &(x0, y0)) in points.iter().enumerate() {
        let (x1, y1) = points[(i + 1) % points.len()];
        acc += x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64;
    }
    acc as f64 / 2.0
}

/// Polygon centroid from the first area moments; falls back to the vertex
/// mean for degenerate polygons.
pub fn polygon_centroid(points: &[(i32, i32)]) -> (f64, f64) {
    let area = signed_area(points);
    if area.abs() < 1e-9 {
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x as f64, sy + y as f64));
        return (sx / n, sy / n);
    }

    let mut cx = 0.0f64;
    let mut cy = 0.0f64;
    for (i, &(x0, y0)) in points.iter().enumerate() {
        let (x1, y1) = points[(i + 1) % points.len()];
        let cross = (x0 as f64) * (y1 as f64) - (x1 as f64) * (y0 as f64);
        cx += (x0 + x1) as f64 * cross;
        cy += (y0 + y1) as f64 * cross;
    }
    (cx / (6.0 * area), cy / (6.0 * area))
}

/// Convex hull of a point set (Andrew's monotone chain), counter-clockwise.
pub fn convex_hull(points: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let mut pts: Vec<(i32, i32)> = points.to_vec();
    pts.sort_unstable();
    pts.dedup();
    let n = pts.len();
    if n < 3 {
        return pts;
    }

    let cross = |o: (i32, i32), a: (i32, i32), b: (i32, i32)| -> i64 {
        (a.0 - o.0) as i64 * (b.1 - o.1) as i64 - (a.1 - o.1) as i64 * (b.0 - o.0) as i64
    };

    let mut lower: Vec<(i32, i32)> = Vec::with_capacity(n);
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<(i32, i32)> = Vec::with_capacity(n);
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Extract targets from a binary mask: one candidate per connected region
/// with at least `MIN_BOUNDARY_POINTS` boundary pixels and positive area.
pub fn extract_targets(mask: &Array2<bool>, origin: (f64, f64)) -> Vec<Target> {
    let (labels, count) = label_components(mask);
    extract_from_labels(&labels, count, origin, false)
}

/// Extract targets from a label raster, one candidate per label.
///
/// When `with_mask` is set each target carries its region mask (watershed
/// path).
pub fn extract_from_labels(
    labels: &Array2<u32>,
    count: u32,
    origin: (f64, f64),
    with_mask: bool,
) -> Vec<Target> {
    let (h, w) = labels.dim();
    if count == 0 {
        return Vec::new();
    }

    // First scan-order pixel of every label.
    let mut starts: Vec<Option<(i32, i32)>> = vec![None; count as usize + 1];
    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]] as usize;
            if lbl > 0 && starts[lbl].is_none() {
                starts[lbl] = Some((col as i32, row as i32));
            }
        }
    }

    let mut targets = Vec::new();
    for lbl in 1..=count {
        let Some(start) = starts[lbl as usize] else {
            continue;
        };

        let in_region = |x: i32, y: i32| -> bool {
            x >= 0
                && y >= 0
                && (x as usize) < w
                && (y as usize) < h
                && labels[[y as usize, x as usize]] == lbl
        };

        let boundary = trace_boundary(in_region, start, 8 * h * w);
        if boundary.len() < MIN_BOUNDARY_POINTS {
            continue;
        }

        let area = polygon_area(&boundary);
        let hull_area = polygon_area(&convex_hull(&boundary));
        if area <= 0.0 || hull_area < area {
            continue;
        }

        let mask = with_mask.then(|| labels.mapv(|v| v == lbl));

        targets.push(Target {
            centroid: polygon_centroid(&boundary),
            boundary,
            area,
            hull_area,
            origin,
            mask,
        });
    }

    targets
}
