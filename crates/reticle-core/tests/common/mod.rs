#![allow(dead_code)]

use ndarray::Array2;

use reticle_core::frame::{GrayFrame, MonoFrame, RawFrame};

/// Pixel raster with a solid disk of the given value on a zero background.
///
/// A pixel belongs to the disk when its integer coordinate is within
/// `radius` of `(cx, cy)`.
pub fn disk_data(h: usize, w: usize, cx: f64, cy: f64, radius: f64, value: f32) -> Array2<f32> {
    Array2::from_shape_fn((h, w), |(row, col)| {
        let dx = col as f64 - cx;
        let dy = row as f64 - cy;
        if (dx * dx + dy * dy).sqrt() <= radius {
            value
        } else {
            0.0
        }
    })
}

/// 8-bit mono frame with a solid disk on a zero background.
pub fn disk_frame(h: usize, w: usize, cx: f64, cy: f64, radius: f64, value: f32) -> RawFrame {
    RawFrame::Mono(MonoFrame {
        data: disk_data(h, w, cx, cy, radius, value),
        bit_depth: 8,
    })
}

/// 8-bit mono frame with an axis-aligned solid square of half side `half`.
pub fn square_frame(h: usize, w: usize, cx: f64, cy: f64, half: f64, value: f32) -> RawFrame {
    let data = Array2::from_shape_fn((h, w), |(row, col)| {
        if (col as f64 - cx).abs() <= half && (row as f64 - cy).abs() <= half {
            value
        } else {
            0.0
        }
    });
    RawFrame::Mono(MonoFrame {
        data,
        bit_depth: 8,
    })
}

/// Boolean raster of two disks joined by a thin horizontal bridge, centered
/// vertically at `y`.
///
/// Produces a single low-convexity connected region whose distance
/// transform peaks inside each disk.
pub fn dumbbell_mask(
    h: usize,
    w: usize,
    y: f64,
    left: (f64, f64),
    right: (f64, f64),
) -> Array2<bool> {
    let (lx, lr) = left;
    let (rx, rr) = right;
    Array2::from_shape_fn((h, w), |(row, col)| {
        let (x, yy) = (col as f64, row as f64);
        let in_left = ((x - lx).powi(2) + (yy - y).powi(2)).sqrt() <= lr;
        let in_right = ((x - rx).powi(2) + (yy - y).powi(2)).sqrt() <= rr;
        let in_bridge = x >= lx && x <= rx && (yy - y) >= -1.0 && (yy - y) <= 0.0;
        in_left || in_right || in_bridge
    })
}

/// 8-bit mono frame version of [`dumbbell_mask`].
pub fn dumbbell_frame(
    h: usize,
    w: usize,
    y: f64,
    left: (f64, f64),
    right: (f64, f64),
    value: f32,
) -> RawFrame {
    let mask = dumbbell_mask(h, w, y, left, right);
    RawFrame::Mono(MonoFrame {
        data: mask.mapv(|m| if m { value } else { 0.0 }),
        bit_depth: 8,
    })
}

/// Uniform 8-bit working frame.
pub fn uniform_gray(h: usize, w: usize, value: u8) -> GrayFrame {
    GrayFrame::new(Array2::from_elem((h, w), value))
}

/// Working frame with a solid disk of `value` on a zero background.
pub fn disk_gray(h: usize, w: usize, cx: f64, cy: f64, radius: f64, value: u8) -> GrayFrame {
    GrayFrame::new(disk_data(h, w, cx, cy, radius, value as f32).mapv(|v| v as u8))
}
