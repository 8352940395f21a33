use ndarray::Array2;

/// A detected candidate region with its geometric descriptors.
///
/// Targets are constructed fresh for every segmentation pass and never
/// mutated afterwards; they do not outlive a single `find()` call.
#[derive(Clone, Debug)]
pub struct Target {
    /// Closed boundary polygon, `(x, y)` pixel coordinates in traversal order.
    pub boundary: Vec<(i32, i32)>,
    /// Polygon area in square pixels.
    pub area: f64,
    /// Area of the polygon's convex hull; always >= `area`.
    pub hull_area: f64,
    /// Polygon centroid, `(x, y)` pixel coordinates.
    pub centroid: (f64, f64),
    /// Frame center at extraction time.
    pub origin: (f64, f64),
    /// Region mask, present only for watershed-produced targets.
    pub mask: Option<Array2<bool>>,
}

impl Target {
    /// Ratio of area to convex hull area, in (0, 1]; 1.0 is perfectly convex.
    pub fn convexity(&self) -> f64 {
        self.area / self.hull_area
    }

    /// Centroid deviation from the frame center, `(dx, dy)` in pixels.
    pub fn dev_centroid(&self) -> (f64, f64) {
        (self.centroid.0 - self.origin.0, self.centroid.1 - self.origin.1)
    }
}
