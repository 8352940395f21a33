use ndarray::Array2;

/// Linear intensity rescale: stretch the observed [min, max] range of an
/// 8-bit frame to fill [0, 255].
///
/// A constant frame is returned unchanged.
pub fn rescale_intensity(data: &Array2<u8>) -> Array2<u8> {
    let mut lo = u8::MAX;
    let mut hi = u8::MIN;
    for &v in data.iter() {
        lo = lo.min(v);
        hi = hi.max(v);
    }

    if hi <= lo {
        return data.clone();
    }

    let range = (hi - lo) as f32;
    data.mapv(|v| (((v - lo) as f32 / range) * 255.0).round().clamp(0.0, 255.0) as u8)
}
