use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use reticle_core::{FindOutcome, Locator, LocatorConfig, TargetShape};

use crate::imageio::load_frame;

#[derive(Clone, Copy, ValueEnum)]
pub enum ShapeArg {
    /// Circular hole/fiducial
    Circle,
    /// Square fiducial
    Square,
}

#[derive(Args)]
pub struct FindArgs {
    /// Input image (PNG/TIFF, 8 or 16 bit)
    pub file: PathBuf,

    /// Pixels per millimeter calibration constant
    #[arg(long)]
    pub pxpermm: f64,

    /// Target radius (circle) or half side length (square), in mm
    #[arg(long)]
    pub dim: f64,

    /// Expected target shape
    #[arg(long, value_enum, default_value = "circle")]
    pub shape: ShapeArg,

    /// Crop a centered window of 2.55x the target dimension before searching
    #[arg(long)]
    pub crop: bool,

    /// Crop offset from frame center, x pixels
    #[arg(long, default_value = "0")]
    pub offset_x: i32,

    /// Crop offset from frame center, y pixels
    #[arg(long, default_value = "0")]
    pub offset_y: i32,

    /// Stage coordinate to correct, mm (requires --cy)
    #[arg(long, requires = "cy")]
    pub cx: Option<f64>,

    /// Stage coordinate to correct, mm (requires --cx)
    #[arg(long, requires = "cx")]
    pub cy: Option<f64>,

    /// Gaussian blur sigma applied before segmentation
    #[arg(long, default_value = "0")]
    pub blur: u32,

    /// Stretch the intensity histogram to fill 0-255
    #[arg(long)]
    pub stretch: bool,

    /// Invert the frame (dark target on a bright field)
    #[arg(long)]
    pub invert: bool,

    /// Zero out pixels outside a centered circle of this radius, in mm
    #[arg(long)]
    pub mask: Option<f64>,

    /// Use the blockwise adaptive threshold instead of the band sweep
    #[arg(long)]
    pub adaptive: bool,

    /// Use the legacy linear band search
    #[arg(long)]
    pub legacy_search: bool,

    /// Legacy search: first band center (derived from the frame when unset)
    #[arg(long)]
    pub search_start: Option<i32>,

    /// Legacy search: step between band centers
    #[arg(long, default_value = "2")]
    pub search_step: i32,

    /// Legacy search: iteration count per axis
    #[arg(long, default_value = "20")]
    pub search_n: usize,

    /// Legacy search: half-width growth unit
    #[arg(long, default_value = "10")]
    pub search_width: i32,

    /// Adaptive threshold block size, in pixels
    #[arg(long, default_value = "20")]
    pub blocksize: usize,

    /// Block-size increment applied after every band attempt
    #[arg(long, default_value = "5")]
    pub blocksize_step: usize,

    /// Use the histogram deviation estimator
    #[arg(long)]
    pub histogram: bool,

    /// Disable the arc-fit estimator for circular targets
    #[arg(long)]
    pub no_arc: bool,

    /// Minimum convexity an accepted target must exceed
    #[arg(long, default_value = "0.85")]
    pub convexity: f64,

    /// Centrality tolerance in units of pxpermm
    #[arg(long, default_value = "0.75")]
    pub tolerance: f64,
}

pub fn run(args: &FindArgs) -> Result<()> {
    let frame = load_frame(&args.file)?;

    let config = LocatorConfig {
        use_histogram: args.histogram,
        use_arc_approximation: !args.no_arc,
        stretch_intensity: args.stretch,
        blur: args.blur,
        invert: args.invert,
        mask_radius: args.mask,
        use_adaptive_threshold: args.adaptive,
        use_legacy_search: args.legacy_search,
        search_start: args.search_start,
        search_step: args.search_step,
        search_n: args.search_n,
        search_width: args.search_width,
        blocksize: args.blocksize,
        blocksize_step: args.blocksize_step,
        convexity_threshold: args.convexity,
        centrality_tolerance: args.tolerance,
    };
    let locator = Locator::with_config(args.pxpermm, config);

    // The search expects the target near the frame center; crop a window a
    // bit over twice the target size around it.
    let frame = if args.crop {
        let window = (args.dim * 2.55).ceil();
        locator.crop(&frame, window, window, args.offset_x, args.offset_y)?
    } else {
        frame
    };

    let shape = match args.shape {
        ShapeArg::Circle => TargetShape::Circle,
        ShapeArg::Square => TargetShape::Square,
    };
    let dim_px = args.dim * args.pxpermm;

    match locator.find(&frame, dim_px, shape)? {
        FindOutcome::Found(dev) => {
            println!(
                "Deviation: dx={:+.4} mm, dy={:+.4} mm ({:+.2}, {:+.2} px)",
                dev.dx,
                dev.dy,
                dev.dx * args.pxpermm,
                dev.dy * args.pxpermm
            );
            if let (Some(cx), Some(cy)) = (args.cx, args.cy) {
                println!("Corrected center: ({:.4}, {:.4}) mm", cx + dev.dx, cy + dev.dy);
            }
        }
        FindOutcome::NotFound => println!("No target found"),
        FindOutcome::Cancelled => println!("Search cancelled"),
    }

    Ok(())
}
