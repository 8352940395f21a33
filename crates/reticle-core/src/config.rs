use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BLOCKSIZE, DEFAULT_BLOCKSIZE_STEP, DEFAULT_CENTRALITY_TOLERANCE,
    DEFAULT_CONVEXITY_THRESHOLD, DEFAULT_SEARCH_N, DEFAULT_SEARCH_STEP, DEFAULT_SEARCH_WIDTH,
};

/// Tunable surface of the locator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Use the histogram deviation estimator when more than two targets are
    /// accepted.
    #[serde(default)]
    pub use_histogram: bool,
    /// Use the arc fit for circular targets.
    #[serde(default = "default_true")]
    pub use_arc_approximation: bool,
    /// Stretch the preprocessed intensity histogram to fill 0-255.
    #[serde(default)]
    pub stretch_intensity: bool,
    /// Gaussian blur sigma applied during preprocessing; 0 disables it.
    #[serde(default)]
    pub blur: u32,
    /// Invert the preprocessed frame (dark targets on a bright field).
    #[serde(default)]
    pub invert: bool,
    /// Zero out pixels outside a centered circle of this radius, in mm.
    #[serde(default)]
    pub mask_radius: Option<f64>,
    /// Delegate thresholding to the blockwise adaptive segmenter.
    #[serde(default)]
    pub use_adaptive_threshold: bool,
    /// Use the legacy linear band search instead of the geometric sweep.
    #[serde(default)]
    pub use_legacy_search: bool,
    /// Legacy search: first band center; derived from the nonzero mean when
    /// unset.
    #[serde(default)]
    pub search_start: Option<i32>,
    /// Legacy search: step between band centers.
    #[serde(default = "default_search_step")]
    pub search_step: i32,
    /// Legacy search: iteration count per axis.
    #[serde(default = "default_search_n")]
    pub search_n: usize,
    /// Legacy search: half-width growth unit.
    #[serde(default = "default_search_width")]
    pub search_width: i32,
    /// Adaptive threshold block size, in pixels.
    #[serde(default = "default_blocksize")]
    pub blocksize: usize,
    /// Block-size increment applied after every band attempt.
    #[serde(default = "default_blocksize_step")]
    pub blocksize_step: usize,
    /// Minimum convexity an accepted target must exceed.
    #[serde(default = "default_convexity_threshold")]
    pub convexity_threshold: f64,
    /// Centrality tolerance in units of pxpermm.
    #[serde(default = "default_centrality_tolerance")]
    pub centrality_tolerance: f64,
}

fn default_true() -> bool {
    true
}
fn default_search_step() -> i32 {
    DEFAULT_SEARCH_STEP
}
fn default_search_n() -> usize {
    DEFAULT_SEARCH_N
}
fn default_search_width() -> i32 {
    DEFAULT_SEARCH_WIDTH
}
fn default_blocksize() -> usize {
    DEFAULT_BLOCKSIZE
}
fn default_blocksize_step() -> usize {
    DEFAULT_BLOCKSIZE_STEP
}
fn default_convexity_threshold() -> f64 {
    DEFAULT_CONVEXITY_THRESHOLD
}
fn default_centrality_tolerance() -> f64 {
    DEFAULT_CENTRALITY_TOLERANCE
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            use_histogram: false,
            use_arc_approximation: true,
            stretch_intensity: false,
            blur: 0,
            invert: false,
            mask_radius: None,
            use_adaptive_threshold: false,
            use_legacy_search: false,
            search_start: None,
            search_step: DEFAULT_SEARCH_STEP,
            search_n: DEFAULT_SEARCH_N,
            search_width: DEFAULT_SEARCH_WIDTH,
            blocksize: DEFAULT_BLOCKSIZE,
            blocksize_step: DEFAULT_BLOCKSIZE_STEP,
            convexity_threshold: DEFAULT_CONVEXITY_THRESHOLD,
            centrality_tolerance: DEFAULT_CENTRALITY_TOLERANCE,
        }
    }
}
