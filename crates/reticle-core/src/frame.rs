use ndarray::Array2;

/// A raw camera frame before preprocessing.
///
/// Pixel values are f32 in `[0, 2^bit_depth - 1]`, exactly as delivered by
/// the acquisition layer.
#[derive(Clone, Debug)]
pub enum RawFrame {
    Mono(MonoFrame),
    Color(ColorFrame),
}

/// Single-channel raw frame.
#[derive(Clone, Debug)]
pub struct MonoFrame {
    /// Pixel data, row-major, shape = (height, width).
    pub data: Array2<f32>,
    /// Sensor bit depth (8 or 16).
    pub bit_depth: u8,
}

/// Raw frame composed of separate channel planes.
#[derive(Clone, Debug)]
pub struct ColorFrame {
    pub red: Array2<f32>,
    pub green: Array2<f32>,
    pub blue: Array2<f32>,
    pub bit_depth: u8,
}

impl RawFrame {
    pub fn width(&self) -> usize {
        match self {
            RawFrame::Mono(m) => m.data.ncols(),
            RawFrame::Color(c) => c.red.ncols(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            RawFrame::Mono(m) => m.data.nrows(),
            RawFrame::Color(c) => c.red.nrows(),
        }
    }

    pub fn bit_depth(&self) -> u8 {
        match self {
            RawFrame::Mono(m) => m.bit_depth,
            RawFrame::Color(c) => c.bit_depth,
        }
    }
}

/// Working single-channel 8-bit frame produced by the preprocessor.
#[derive(Clone, Debug)]
pub struct GrayFrame {
    /// Pixel data, row-major, shape = (height, width).
    pub data: Array2<u8>,
}

impl GrayFrame {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Geometric center of the frame, `(cx, cy)` in pixel coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.width() as f64 / 2.0, self.height() as f64 / 2.0)
    }

    /// Mean of the nonzero pixels, or `None` for an all-zero frame.
    pub fn nonzero_mean(&self) -> Option<f64> {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for &v in self.data.iter() {
            if v > 0 {
                sum += v as f64;
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}
