use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::filters::{gaussian_blur_array, rescale_intensity};
use crate::frame::{GrayFrame, RawFrame};

/// Preprocessing steps applied before segmentation.
#[derive(Clone, Debug, Default)]
pub struct PreprocessOptions {
    /// Gaussian blur sigma in pixels; 0 disables smoothing.
    pub blur: u32,
    /// Stretch the intensity histogram to fill 0-255.
    pub stretch_intensity: bool,
    /// Invert the frame so dark features become bright foreground.
    pub invert: bool,
}

/// Convert a raw frame into the 8-bit working frame.
///
/// 1. grayscale conversion, normalized to 0-255 by the sensor bit depth
/// 2. Gaussian smoothing when `blur > 0`
/// 3. min-max intensity rescale when `stretch_intensity`
/// 4. inversion when `invert`
///
/// Pure function of its inputs.
pub fn preprocess(frame: &RawFrame, opts: &PreprocessOptions) -> GrayFrame {
    let mut gray = to_gray_u8(frame);

    if opts.blur > 0 {
        let float = gray.mapv(|v| v as f32 / 255.0);
        let blurred = gaussian_blur_array(&float, opts.blur as f32);
        gray = blurred.mapv(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8);
    }

    if opts.stretch_intensity {
        gray = rescale_intensity(&gray);
    }

    if opts.invert {
        gray.mapv_inplace(|v| 255 - v);
    }

    GrayFrame::new(gray)
}

/// Zero out every pixel outside a centered circle of `radius` pixels.
pub fn apply_circular_mask(frame: &mut GrayFrame, radius: f64) {
    let (cx, cy) = frame.center();
    let r2 = radius * radius;
    let (h, w) = frame.data.dim();

    for row in 0..h {
        for col in 0..w {
            let dx = col as f64 + 0.5 - cx;
            let dy = row as f64 + 0.5 - cy;
            if dx * dx + dy * dy > r2 {
                frame.data[[row, col]] = 0;
            }
        }
    }
}

/// Grayscale conversion, normalized to the 0-255 range by bit depth.
fn to_gray_u8(frame: &RawFrame) -> Array2<u8> {
    let max_value = ((1u32 << frame.bit_depth()) - 1) as f32;

    match frame {
        RawFrame::Mono(m) => m
            .data
            .mapv(|v| ((v / max_value) * 255.0).round().clamp(0.0, 255.0) as u8),
        RawFrame::Color(c) => {
            let (h, w) = c.red.dim();
            let mut gray = Array2::<u8>::zeros((h, w));
            for row in 0..h {
                for col in 0..w {
                    let luma = LUMINANCE_R * c.red[[row, col]]
                        + LUMINANCE_G * c.green[[row, col]]
                        + LUMINANCE_B * c.blue[[row, col]];
                    gray[[row, col]] = ((luma / max_value) * 255.0).round().clamp(0.0, 255.0) as u8;
                }
            }
            gray
        }
    }
}
