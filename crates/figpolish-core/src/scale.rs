// File: crates/figpolish-core/src/scale.rs
// Summary: Data <-> axes-fraction transforms for linear and log10 axes.

use crate::axis::ScaleKind;

/// Data coordinate along one axis.
pub type Value = f64;

/// General transform between data values and axes fractions (0 at `vmin`, 1 at `vmax`).
pub trait ScaleTransform {
    fn to_fraction(&self, v: Value) -> f64;
    fn from_fraction(&self, f: f64) -> Value;
}

/// Value scale for one axis. Inverted ranges (`vmin > vmax`) are allowed and
/// simply flip the direction.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub vmin: Value,
    pub vmax: Value,
    pub log: bool,
    // cached log endpoints when log is true
    log_min: f64,
    log_max: f64,
}

impl ValueScale {
    pub fn new_linear(vmin: Value, vmax: Value) -> Self {
        let mut s = Self { vmin, vmax, log: false, log_min: 0.0, log_max: 0.0 };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    pub fn new_log10(mut vmin: Value, mut vmax: Value) -> Self {
        // Ensure strictly positive range for log scale
        let eps = 1e-12;
        vmin = if vmin <= eps { eps } else { vmin };
        vmax = if vmax <= eps { vmin * 10.0 } else { vmax };
        if (vmax - vmin).abs() < 1e-300 { vmax = vmin * 10.0; }
        Self { vmin, vmax, log: true, log_min: vmin.log10(), log_max: vmax.log10() }
    }

    pub fn for_kind(kind: ScaleKind, vmin: Value, vmax: Value) -> Self {
        match kind {
            ScaleKind::Linear => Self::new_linear(vmin, vmax),
            ScaleKind::Log10 => Self::new_log10(vmin, vmax),
        }
    }

    /// True when `v` lies inside the range (endpoints included, either direction).
    pub fn contains(&self, v: Value) -> bool {
        let f = self.to_fraction(v);
        (-1e-9..=1.0 + 1e-9).contains(&f)
    }
}

impl ScaleTransform for ValueScale {
    #[inline]
    fn to_fraction(&self, v: Value) -> f64 {
        if self.log {
            let vv = v.max(1e-300).log10();
            (vv - self.log_min) / (self.log_max - self.log_min)
        } else {
            (v - self.vmin) / (self.vmax - self.vmin)
        }
    }

    #[inline]
    fn from_fraction(&self, f: f64) -> Value {
        if self.log {
            10f64.powf(self.log_min + f * (self.log_max - self.log_min))
        } else {
            self.vmin + f * (self.vmax - self.vmin)
        }
    }
}
