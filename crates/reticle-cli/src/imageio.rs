use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use ndarray::Array2;
use reticle_core::frame::{ColorFrame, MonoFrame, RawFrame};

/// Load an image file as a raw frame, preserving 16-bit depth where the
/// source has it.
pub fn load_frame(path: &Path) -> Result<RawFrame> {
    let img = image::open(path).with_context(|| format!("opening {}", path.display()))?;

    let frame = match img {
        DynamicImage::ImageLuma8(buf) => {
            let (w, h) = buf.dimensions();
            let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
                buf.get_pixel(col as u32, row as u32).0[0] as f32
            });
            RawFrame::Mono(MonoFrame { data, bit_depth: 8 })
        }
        DynamicImage::ImageLuma16(buf) => {
            let (w, h) = buf.dimensions();
            let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
                buf.get_pixel(col as u32, row as u32).0[0] as f32
            });
            RawFrame::Mono(MonoFrame {
                data,
                bit_depth: 16,
            })
        }
        other => {
            let buf = other.to_rgb8();
            let (w, h) = buf.dimensions();
            let channel = |idx: usize| {
                Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
                    buf.get_pixel(col as u32, row as u32).0[idx] as f32
                })
            };
            RawFrame::Color(ColorFrame {
                red: channel(0),
                green: channel(1),
                blue: channel(2),
                bit_depth: 8,
            })
        }
    };

    Ok(frame)
}

/// Save a raw frame as an 8-bit image.
pub fn save_frame(frame: &RawFrame, path: &Path) -> Result<()> {
    let max_value = ((1u32 << frame.bit_depth()) - 1) as f32;
    let (w, h) = (frame.width() as u32, frame.height() as u32);

    let quantize = |v: f32| -> u8 { ((v / max_value) * 255.0).round().clamp(0.0, 255.0) as u8 };

    match frame {
        RawFrame::Mono(m) => {
            let buf = image::GrayImage::from_fn(w, h, |col, row| {
                image::Luma([quantize(m.data[[row as usize, col as usize]])])
            });
            buf.save(path)
                .with_context(|| format!("saving {}", path.display()))?;
        }
        RawFrame::Color(c) => {
            let buf = image::RgbImage::from_fn(w, h, |col, row| {
                let (row, col) = (row as usize, col as usize);
                image::Rgb([
                    quantize(c.red[[row, col]]),
                    quantize(c.green[[row, col]]),
                    quantize(c.blue[[row, col]]),
                ])
            });
            buf.save(path)
                .with_context(|| format!("saving {}", path.display()))?;
        }
    }

    Ok(())
}
