/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Band widths tried by the geometric threshold search, widest first.
pub const GEOMETRIC_BAND_WIDTHS: [i32; 6] = [128, 64, 32, 16, 8, 4];

/// Per-step shift magnitudes tried by the geometric threshold search.
pub const GEOMETRIC_BAND_SHIFTS: [i32; 3] = [2, 4, 8];

/// Upper bound on shift steps per (width, shift, direction) combination.
pub const GEOMETRIC_MAX_SHIFT_STEPS: i32 = 127;

/// Default step between band centers in the legacy linear search.
pub const DEFAULT_SEARCH_STEP: i32 = 2;

/// Default iteration count (per axis) of the legacy linear search.
pub const DEFAULT_SEARCH_N: usize = 20;

/// Default half-width growth unit of the legacy linear search.
pub const DEFAULT_SEARCH_WIDTH: i32 = 10;

/// Scalar applied to `search_width` when deriving the legacy search start
/// from the mean of nonzero pixels.
pub const SEARCH_START_OFFSET_SCALAR: i32 = 3;

/// Default block size (pixels) of the adaptive local-mean threshold.
pub const DEFAULT_BLOCKSIZE: usize = 20;

/// Default block-size increment applied after every adaptive attempt.
pub const DEFAULT_BLOCKSIZE_STEP: usize = 5;

/// Offset subtracted from the local mean in the adaptive threshold.
pub const ADAPTIVE_THRESHOLD_OFFSET: f32 = 5.0;

/// Minimum boundary length for a polygon to count as a target; anything
/// shorter is treated as noise.
pub const MIN_BOUNDARY_POINTS: usize = 5;

/// Default convexity (area / hull area) a target must exceed.
pub const DEFAULT_CONVEXITY_THRESHOLD: f64 = 0.85;

/// Default centrality tolerance, in units of pxpermm.
pub const DEFAULT_CENTRALITY_TOLERANCE: f64 = 0.75;

/// Factor applied to the convexity threshold when re-testing targets
/// produced by the watershed splitter.
pub const WATERSHED_RELAXED_FACTOR: f64 = 0.75;

/// Minimum histogram bin count used by the watershed region-pruning fallback.
pub const WATERSHED_MIN_HISTOGRAM_BINS: usize = 10;

/// Minimum convexity of the leading candidate for the arc-fit strategy.
pub const ARC_FIT_CONVEXITY_TOLERANCE: f64 = 0.8;

/// Maximum fixed-point iterations of the fixed-radius circle fit.
pub const ARC_FIT_MAX_ITERATIONS: usize = 50;

/// Convergence tolerance (pixels) of the fixed-radius circle fit.
pub const ARC_FIT_TOLERANCE: f64 = 1e-6;

/// Bin count of the histogram deviation estimator.
pub const DEVIATION_HISTOGRAM_BINS: usize = 10;
