use crate::consts::{
    GEOMETRIC_BAND_SHIFTS, GEOMETRIC_BAND_WIDTHS, GEOMETRIC_MAX_SHIFT_STEPS,
    SEARCH_START_OFFSET_SCALAR,
};
use crate::error::{Result, ReticleError};
use crate::frame::GrayFrame;

/// An intensity band used to binarize the working frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    pub low: u8,
    pub high: u8,
}

/// Parameters of the legacy linear band search.
#[derive(Clone, Copy, Debug)]
pub struct LinearSearch {
    /// First band center; defaults to `mean(nonzero) - 3 * width`.
    pub start: Option<i32>,
    pub step: i32,
    pub width: i32,
    pub n: usize,
}

/// How threshold bands are produced.
#[derive(Clone, Copy, Debug)]
pub enum BandStrategy {
    /// One full-range band; real thresholding is delegated to the adaptive
    /// segmenter.
    Adaptive,
    /// Widest-to-narrowest sweep around the mean of nonzero pixels,
    /// alternating shift direction.
    Geometric,
    /// Symmetric widening around a linearly stepped start value.
    Linear(LinearSearch),
}

/// Lazy, deterministic band sequence.
///
/// The generator owns its cursor; consuming it twice from two separate
/// instances yields identical sequences.
#[derive(Debug)]
pub struct BandGenerator {
    mean: i32,
    cursor: Cursor,
}

#[derive(Debug)]
enum Cursor {
    Adaptive {
        done: bool,
    },
    Geometric {
        width_idx: usize,
        shift_idx: usize,
        dir_idx: usize,
        i: i32,
    },
    Linear {
        start: i32,
        step: i32,
        width: i32,
        n: usize,
        i: usize,
        j: usize,
    },
}

const SHIFT_DIRECTIONS: [i32; 2] = [1, -1];

impl BandGenerator {
    /// Build a generator for the given preprocessed frame.
    ///
    /// Fails with `InvalidFrame` when the frame has no nonzero pixels, since
    /// the band sweep is anchored on their mean.
    pub fn new(frame: &GrayFrame, strategy: BandStrategy) -> Result<Self> {
        let mean = frame.nonzero_mean().ok_or_else(|| {
            ReticleError::InvalidFrame("no nonzero pixels to anchor the threshold search".into())
        })? as i32;

        let cursor = match strategy {
            BandStrategy::Adaptive => Cursor::Adaptive { done: false },
            BandStrategy::Geometric => Cursor::Geometric {
                width_idx: 0,
                shift_idx: 0,
                dir_idx: 0,
                i: 1,
            },
            BandStrategy::Linear(search) => Cursor::Linear {
                start: search
                    .start
                    .unwrap_or(mean - SEARCH_START_OFFSET_SCALAR * search.width),
                step: search.step,
                width: search.width,
                n: search.n,
                i: 0,
                j: 0,
            },
        };

        Ok(Self { mean, cursor })
    }
}

impl Iterator for BandGenerator {
    type Item = Band;

    fn next(&mut self) -> Option<Band> {
        match &mut self.cursor {
            Cursor::Adaptive { done } => {
                if *done {
                    None
                } else {
                    *done = true;
                    Some(Band { low: 0, high: 255 })
                }
            }
            Cursor::Geometric {
                width_idx,
                shift_idx,
                dir_idx,
                i,
            } => loop {
                if *width_idx >= GEOMETRIC_BAND_WIDTHS.len() {
                    return None;
                }

                let width = GEOMETRIC_BAND_WIDTHS[*width_idx];
                let shift = GEOMETRIC_BAND_SHIFTS[*shift_idx];
                let dir = SHIFT_DIRECTIONS[*dir_idx];

                let center = self.mean - shift * *i * dir;
                let low = center - width / 2;
                let high = low + width;

                if *i > GEOMETRIC_MAX_SHIFT_STEPS || low < 0 || high > 255 {
                    // This sweep ran out of range; move to the next one.
                    *i = 1;
                    *dir_idx += 1;
                    if *dir_idx == SHIFT_DIRECTIONS.len() {
                        *dir_idx = 0;
                        *shift_idx += 1;
                        if *shift_idx == GEOMETRIC_BAND_SHIFTS.len() {
                            *shift_idx = 0;
                            *width_idx += 1;
                        }
                    }
                    continue;
                }

                *i += 1;
                return Some(Band {
                    low: low as u8,
                    high: high as u8,
                });
            },
            Cursor::Linear {
                start,
                step,
                width,
                n,
                i,
                j,
            } => {
                if *j >= *n {
                    return None;
                }

                let ww = *width * (*j as i32 + 1);
                let center = *start + *i as i32 * *step;
                let low = (center - ww).clamp(0, 255);
                let high = (center + ww).clamp(1, 255);

                *i += 1;
                if *i == *n {
                    *i = 0;
                    *j += 1;
                }

                Some(Band {
                    low: low as u8,
                    high: high as u8,
                })
            }
        }
    }
}
