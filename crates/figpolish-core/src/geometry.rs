// File: crates/figpolish-core/src/geometry.rs
// Summary: Lightweight geometry helpers for display-space math.
// Display space is in pixels with the origin at the bottom-left corner (y grows upwards),
// figure space is the same rectangle expressed as fractions in [0, 1].

/// Axis-aligned box in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bbox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bbox {
    pub fn from_extents(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }
    pub fn from_bounds(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self { x0, y0, x1: x0 + width, y1: y0 + height }
    }
    pub fn width(&self) -> f64 { self.x1 - self.x0 }
    pub fn height(&self) -> f64 { self.y1 - self.y0 }
    pub fn center(&self) -> (f64, f64) { ((self.x0 + self.x1) * 0.5, (self.y0 + self.y1) * 0.5) }
    pub fn corners(&self) -> [(f64, f64); 4] {
        [(self.x0, self.y0), (self.x1, self.y0), (self.x0, self.y1), (self.x1, self.y1)]
    }
    pub fn union(&self, other: &Bbox) -> Bbox {
        Bbox::from_extents(self.x0.min(other.x0), self.y0.min(other.y0), self.x1.max(other.x1), self.y1.max(other.y1))
    }
    pub fn overlaps(&self, other: &Bbox) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

/// Rectangle in figure fractions: `[left, bottom, width, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxesRect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl AxesRect {
    pub const fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self { left, bottom, width, height }
    }

    /// Map onto a figure of `fig_w` x `fig_h` pixels.
    pub fn to_display(&self, fig_w: f64, fig_h: f64) -> Bbox {
        Bbox::from_bounds(self.left * fig_w, self.bottom * fig_h, self.width * fig_w, self.height * fig_h)
    }
}

impl From<[f64; 4]> for AxesRect {
    fn from(r: [f64; 4]) -> Self { Self::new(r[0], r[1], r[2], r[3]) }
}

