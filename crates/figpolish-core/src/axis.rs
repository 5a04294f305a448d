// File: crates/figpolish-core/src/axis.rs
// Summary: Axis model with label, view limits, scale, tick locators/formatters and label placement.

use crate::error::Result;
use crate::scale::ValueScale;
use crate::setup::TextMode;
use crate::text::{HAlign, VAlign};
use crate::ticks::{AxisTickSet, Formatter, Locator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Log10,
}

/// Where the axis label is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LabelPlacement {
    /// Outside the tick labels, centered along the axis (y label rotated).
    #[default]
    Auto,
    /// Unrotated, at (`x`, `y`) in axes fractions.
    Embedded { x: f64, y: f64, ha: HAlign, va: VAlign },
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
    pub major: Locator,
    pub minor: Locator,
    pub formatter: Formatter,
    pub label_placement: LabelPlacement,
    /// Cleared by `set_xlim`/`set_ylim`; autoscaling leaves the limits alone afterwards.
    pub autoscale: bool,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            kind: ScaleKind::Linear,
            major: Locator::Auto,
            minor: Locator::None,
            formatter: Formatter::Plain,
            label_placement: LabelPlacement::Auto,
            autoscale: true,
        }
    }

    pub fn unit() -> Self { Self::new("", 0.0, 1.0) }

    pub fn set_limits(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
        self.autoscale = false;
    }

    pub fn scale(&self) -> ValueScale { ValueScale::for_kind(self.kind, self.min, self.max) }

    /// Major tick positions produced by the locator (may extend beyond the limits
    /// for fixed locators).
    pub fn major_positions(&self) -> Vec<f64> { self.major.positions(self.min, self.max, self.kind) }

    /// Minor ticks inside the view that do not coincide with a major tick.
    pub fn minor_positions(&self) -> Vec<f64> {
        let major = self.major_positions();
        let scale = self.scale();
        self.minor
            .positions(self.min, self.max, self.kind)
            .into_iter()
            .filter(|v| scale.contains(*v))
            .filter(|v| !major.iter().any(|m| (m - v).abs() <= 1e-9 * m.abs().max(1.0)))
            .collect()
    }

    /// Current major ticks together with their labels.
    pub fn tick_set(&self, mode: TextMode) -> Result<AxisTickSet> {
        let positions = self.major_positions();
        let labels = self.formatter.labels(&positions, self.kind, mode);
        AxisTickSet::new(positions.into_iter().zip(labels).collect())
    }

    /// One flag per major tick: is it inside the view limits?
    pub fn ticks_in_limits(&self) -> Vec<bool> {
        let scale = self.scale();
        self.major_positions().iter().map(|&t| scale.contains(t)).collect()
    }
}

impl Default for Axis {
    fn default() -> Self { Self::unit() }
}
