pub mod gaussian_blur;
pub mod histogram;

pub use gaussian_blur::gaussian_blur_array;
pub use histogram::rescale_intensity;
