use std::sync::atomic::{AtomicBool, Ordering};

use ndarray::{s, Array2};
use tracing::{debug, info};

use crate::bands::{Band, BandGenerator, BandStrategy, LinearSearch};
use crate::config::LocatorConfig;
use crate::contour::extract_targets;
use crate::error::{Result, ReticleError};
use crate::estimator::{estimate, EstimatorOptions};
use crate::filter::{area_bounds, filter_targets, FilterParams, TargetShape};
use crate::frame::{ColorFrame, GrayFrame, MonoFrame, RawFrame};
use crate::preprocess::{apply_circular_mask, preprocess, PreprocessOptions};
use crate::segment::Segmenter;

/// Deviation of the target center from the frame center, in millimeters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deviation {
    pub dx: f64,
    pub dy: f64,
}

/// Terminal state of one `find()` call.
///
/// `NotFound` and `Cancelled` are ordinary outcomes, not errors; the
/// variant lets callers that care tell "gave up" from "found nothing".
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FindOutcome {
    Found(Deviation),
    NotFound,
    Cancelled,
}

impl FindOutcome {
    /// The deviation in mm, or `None` for `NotFound`/`Cancelled`.
    pub fn deviation(&self) -> Option<(f64, f64)> {
        match self {
            FindOutcome::Found(d) => Some((d.dx, d.dy)),
            _ => None,
        }
    }
}

/// Target locator: drives the threshold-band search over a preprocessed
/// frame and reports the sub-pixel deviation of the detected target from
/// the frame center.
///
/// A single `find()` runs synchronously; `cancel()` may be called from any
/// other thread and is observed within one band iteration.
pub struct Locator {
    pxpermm: f64,
    config: LocatorConfig,
    alive: AtomicBool,
}

impl Locator {
    pub fn new(pxpermm: f64) -> Self {
        Self::with_config(pxpermm, LocatorConfig::default())
    }

    pub fn with_config(pxpermm: f64, config: LocatorConfig) -> Self {
        Self {
            pxpermm,
            config,
            alive: AtomicBool::new(true),
        }
    }

    pub fn pxpermm(&self) -> f64 {
        self.pxpermm
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Request cancellation of an in-flight `find()`. Idempotent, never
    /// blocks, and performs no other state change.
    pub fn cancel(&self) {
        debug!("cancel requested");
        self.alive.store(false, Ordering::Release);
    }

    /// Locate the target in the frame and return its deviation from the
    /// frame center in mm.
    ///
    /// `dim` is the expected radius (circle) or half side length (square)
    /// in pixels. Scans threshold bands until the first one yields an
    /// accepted target; an exhausted scan reports `NotFound`.
    pub fn find(&self, frame: &RawFrame, dim: f64, shape: TargetShape) -> Result<FindOutcome> {
        self.alive.store(true, Ordering::Release);

        let gray = self.preprocessed(frame);
        let outcome = self.scan(&gray, dim, shape)?;

        match &outcome {
            FindOutcome::Found(dev) => info!(dx = dev.dx, dy = dev.dy, "deviation (mm)"),
            FindOutcome::NotFound => info!("no target found"),
            FindOutcome::Cancelled => info!("search cancelled"),
        }
        Ok(outcome)
    }

    /// Apply a found deviation to a caller-supplied stage coordinate,
    /// returning the corrected absolute position in mm.
    pub fn correct_center(
        &self,
        frame: &RawFrame,
        cx: f64,
        cy: f64,
        dim: f64,
        shape: TargetShape,
    ) -> Result<Option<(f64, f64)>> {
        match self.find(frame, dim, shape)? {
            FindOutcome::Found(dev) => Ok(Some((cx + dev.dx, cy + dev.dy))),
            _ => Ok(None),
        }
    }

    /// Crop a centered window of physical size `width` x `height` mm,
    /// shifted by `(ox, -oy)` pixels, out of the frame.
    pub fn crop(
        &self,
        frame: &RawFrame,
        width: f64,
        height: f64,
        ox: i32,
        oy: i32,
    ) -> Result<RawFrame> {
        let cw = (width * self.pxpermm) as usize;
        let ch = (height * self.pxpermm) as usize;
        let (w, h) = (frame.width(), frame.height());

        if cw == 0 || ch == 0 {
            return Err(ReticleError::InvalidCrop(format!(
                "crop window {width}x{height} mm collapses to zero pixels"
            )));
        }
        if cw > w || ch > h {
            return Err(ReticleError::InvalidCrop(format!(
                "crop window {cw}x{ch} px exceeds frame {w}x{h}"
            )));
        }

        let x = (((w - cw) as f64 / 2.0) as i64 + ox as i64).clamp(0, (w - cw) as i64) as usize;
        let y = (((h - ch) as f64 / 2.0) as i64 - oy as i64).clamp(0, (h - ch) as i64) as usize;
        debug!(x, y, cw, ch, "crop");

        let window = |data: &Array2<f32>| data.slice(s![y..y + ch, x..x + cw]).to_owned();

        Ok(match frame {
            RawFrame::Mono(m) => RawFrame::Mono(MonoFrame {
                data: window(&m.data),
                bit_depth: m.bit_depth,
            }),
            RawFrame::Color(c) => RawFrame::Color(ColorFrame {
                red: window(&c.red),
                green: window(&c.green),
                blue: window(&c.blue),
                bit_depth: c.bit_depth,
            }),
        })
    }

    fn preprocessed(&self, frame: &RawFrame) -> GrayFrame {
        let opts = PreprocessOptions {
            blur: self.config.blur,
            stretch_intensity: self.config.stretch_intensity,
            invert: self.config.invert,
        };
        let mut gray = preprocess(frame, &opts);

        if let Some(radius) = self.config.mask_radius {
            apply_circular_mask(&mut gray, radius * self.pxpermm);
        }

        gray
    }

    fn band_strategy(&self) -> BandStrategy {
        if self.config.use_adaptive_threshold {
            BandStrategy::Adaptive
        } else if self.config.use_legacy_search {
            BandStrategy::Linear(LinearSearch {
                start: self.config.search_start,
                step: self.config.search_step,
                width: self.config.search_width,
                n: self.config.search_n,
            })
        } else {
            BandStrategy::Geometric
        }
    }

    /// The band scan loop: segment, extract, filter; first band with an
    /// accepted target wins.
    fn scan(&self, gray: &GrayFrame, dim: f64, shape: TargetShape) -> Result<FindOutcome> {
        let bands = BandGenerator::new(gray, self.band_strategy())?;
        let mut segmenter = Segmenter::new(
            self.config.use_adaptive_threshold,
            self.config.blocksize,
            self.config.blocksize_step,
        );

        let params = FilterParams {
            bounds: area_bounds(shape, dim),
            convexity_threshold: self.config.convexity_threshold,
            centrality_tolerance: self.config.centrality_tolerance * self.pxpermm,
            frame_dim: gray.data.dim(),
        };
        let estimator_opts = EstimatorOptions {
            use_histogram: self.config.use_histogram,
            use_arc_approximation: self.config.use_arc_approximation,
        };

        let center = gray.center();
        let mut previous: Option<Band> = None;

        for band in bands {
            if !self.alive.load(Ordering::Acquire) {
                return Ok(FindOutcome::Cancelled);
            }

            debug!(low = band.low, high = band.high, "scanning band");

            // An unchanged band carries no new information; give up early.
            if previous == Some(band) {
                return Ok(FindOutcome::NotFound);
            }
            previous = Some(band);

            let mask = segmenter.segment(gray, band);
            let targets = extract_targets(&mask, center);
            let accepted = filter_targets(targets, &params);

            if !accepted.is_empty() {
                info!(count = accepted.len(), "found potential targets");
                let (dx, dy) = estimate(&accepted, shape, dim, &estimator_opts);
                return Ok(FindOutcome::Found(Deviation {
                    dx: dx / self.pxpermm,
                    dy: dy / self.pxpermm,
                }));
            }
        }

        Ok(FindOutcome::NotFound)
    }
}
