use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use reticle_core::Locator;

use crate::imageio::{load_frame, save_frame};

#[derive(Args)]
pub struct CropArgs {
    /// Input image (PNG/TIFF, 8 or 16 bit)
    pub file: PathBuf,

    /// Output image (auto-generated if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pixels per millimeter calibration constant
    #[arg(long)]
    pub pxpermm: f64,

    /// Crop window width, mm
    #[arg(long)]
    pub width: f64,

    /// Crop window height, mm
    #[arg(long)]
    pub height: f64,

    /// Crop offset from frame center, x pixels
    #[arg(long, default_value = "0")]
    pub offset_x: i32,

    /// Crop offset from frame center, y pixels
    #[arg(long, default_value = "0")]
    pub offset_y: i32,
}

pub fn run(args: &CropArgs) -> Result<()> {
    let frame = load_frame(&args.file)?;

    let locator = Locator::new(args.pxpermm);
    let cropped = locator.crop(&frame, args.width, args.height, args.offset_x, args.offset_y)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| crop_output_path(&args.file, cropped.width(), cropped.height()));

    save_frame(&cropped, &output)?;
    println!(
        "Cropped {}x{} px, saved to {}",
        cropped.width(),
        cropped.height(),
        output.display()
    );

    Ok(())
}

fn crop_output_path(source: &Path, w: usize, h: usize) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    let parent = source.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_crop{w}x{h}.{ext}"))
}
