use ndarray::Array2;

use crate::bands::Band;
use crate::consts::ADAPTIVE_THRESHOLD_OFFSET;
use crate::frame::GrayFrame;

/// Binarizes the working frame for one band attempt.
///
/// Fixed mode keeps pixels inside `[low, high]`; adaptive mode ignores the
/// band and thresholds against a blockwise local mean, growing the block
/// size after every attempt so retries vary in granularity.
pub struct Segmenter {
    use_adaptive: bool,
    blocksize: usize,
    blocksize_step: usize,
}

impl Segmenter {
    pub fn new(use_adaptive: bool, blocksize: usize, blocksize_step: usize) -> Self {
        Self {
            use_adaptive,
            blocksize: blocksize.max(1),
            blocksize_step,
        }
    }

    pub fn blocksize(&self) -> usize {
        self.blocksize
    }

    pub fn segment(&mut self, frame: &GrayFrame, band: Band) -> Array2<bool> {
        let mask = if self.use_adaptive {
            adaptive_threshold(&frame.data, self.blocksize)
        } else {
            frame.data.mapv(|v| v >= band.low && v <= band.high)
        };
        self.blocksize += self.blocksize_step;
        mask
    }
}

/// Blockwise local-mean threshold: a pixel is foreground when it exceeds the
/// mean of its `blocksize`-sized neighborhood minus a fixed offset.
fn adaptive_threshold(data: &Array2<u8>, blocksize: usize) -> Array2<bool> {
    let (h, w) = data.dim();
    let integral = integral_image(data);
    let half = (blocksize / 2).max(1);

    let mut mask = Array2::from_elem((h, w), false);
    for row in 0..h {
        let r0 = row.saturating_sub(half);
        let r1 = (row + half).min(h - 1);
        for col in 0..w {
            let c0 = col.saturating_sub(half);
            let c1 = (col + half).min(w - 1);

            let count = ((r1 - r0 + 1) * (c1 - c0 + 1)) as f32;
            let sum = (integral[[r1 + 1, c1 + 1]] + integral[[r0, c0]]
                - integral[[r0, c1 + 1]]
                - integral[[r1 + 1, c0]]) as f32;
            let mean = sum / count;

            mask[[row, col]] = data[[row, col]] as f32 > mean - ADAPTIVE_THRESHOLD_OFFSET;
        }
    }
    mask
}

/// Summed-area table with a zero border row/column.
fn integral_image(data: &Array2<u8>) -> Array2<u64> {
    let (h, w) = data.dim();
    let mut integral = Array2::<u64>::zeros((h + 1, w + 1));
    for row in 0..h {
        let mut row_sum = 0u64;
        for col in 0..w {
            row_sum += data[[row, col]] as u64;
            integral[[row + 1, col + 1]] = integral[[row, col + 1]] + row_sum;
        }
    }
    integral
}
