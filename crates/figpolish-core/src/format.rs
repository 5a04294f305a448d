// File: crates/figpolish-core/src/format.rs
// Summary: Tick label formatting: rational multiples of a unit (π by default),
// linear fixed ticks and siunitx strings.

use std::f64::consts::PI;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::axes::AxesId;
use crate::axis::Axis;
use crate::error::{invalid, FigError, Result};
use crate::figure::Figure;
use crate::grid::{linspace, round_to};
use crate::setup::{Style, TextMode};
use crate::ticks::{short_number, Formatter, Locator};

/// Which axis of an axes object a call applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisSelector {
    X,
    Y,
    Both,
}

impl AxisSelector {
    pub fn has_x(self) -> bool { matches!(self, AxisSelector::X | AxisSelector::Both) }
    pub fn has_y(self) -> bool { matches!(self, AxisSelector::Y | AxisSelector::Both) }
}

impl FromStr for AxisSelector {
    type Err = FigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" | "xaxis" => Ok(AxisSelector::X),
            "y" | "yaxis" => Ok(AxisSelector::Y),
            "both" | "xy" => Ok(AxisSelector::Both),
            other => Err(invalid(format!("wrong axis selector '{other}', should be 'x', 'y' or 'both'"))),
        }
    }
}

/// Reference constant the ticks are expressed in.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    pub value: f64,
    /// Plain-text symbol, e.g. `π`.
    pub symbol: String,
    /// TeX symbol, e.g. `\pi`.
    pub tex: String,
}

impl Unit {
    pub fn new(value: f64, symbol: impl Into<String>, tex: impl Into<String>) -> Self {
        Self { value, symbol: symbol.into(), tex: tex.into() }
    }

    pub fn pi() -> Self { Self::new(PI, "π", r"\pi") }
}

impl Default for Unit {
    fn default() -> Self { Self::pi() }
}

/// Labels ticks as reduced fractions `k/n` of a unit, `n` dividing `denominator`.
#[derive(Clone, Debug, PartialEq)]
pub struct MultipleFormatter {
    pub denominator: u32,
    /// Minor ticks every `unit / minor_denominator`.
    pub minor_denominator: Option<u32>,
    pub unit: Unit,
}

impl Default for MultipleFormatter {
    fn default() -> Self { Self::new(2) }
}

impl MultipleFormatter {
    /// Multiples of π/`denominator`.
    pub fn new(denominator: u32) -> Self {
        Self { denominator, minor_denominator: None, unit: Unit::pi() }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_minor(mut self, minor_denominator: u32) -> Self {
        self.minor_denominator = Some(minor_denominator);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.unit.value.is_finite() || self.unit.value == 0.0 {
            return Err(invalid(format!("unit must be a non-zero finite number, got {}", self.unit.value)));
        }
        if self.denominator == 0 {
            return Err(invalid("denominator must be at least 1"));
        }
        if self.minor_denominator == Some(0) {
            return Err(invalid("minor denominator must be at least 1"));
        }
        Ok(())
    }

    /// Nearest multiple of `unit / denominator`, reduced: `(numerator, denominator)`
    /// with a positive denominator; zero is `(0, 1)`.
    pub fn multiple(&self, x: f64) -> (i64, i64) {
        let den = i64::from(self.denominator.max(1));
        // saturating cast; gcd on magnitudes so i64::MIN cannot overflow
        let num = (den as f64 * x / self.unit.value).round_ties_even() as i64;
        let com = gcd(num.unsigned_abs(), den.unsigned_abs()) as i64;
        (num / com, den / com)
    }

    pub fn label(&self, x: f64, mode: TextMode) -> String {
        let (num, den) = self.multiple(x);
        match mode {
            TextMode::Plain => plain_label(num, den, &self.unit.symbol),
            TextMode::Tex => tex_label(num, den, &self.unit.tex),
        }
    }

    /// Point the axis' locators and formatter at multiples of the unit.
    pub fn apply(&self, axis: &mut Axis) {
        axis.major = Locator::Multiple(self.unit.value / f64::from(self.denominator));
        if let Some(minor) = self.minor_denominator {
            axis.minor = Locator::Multiple(self.unit.value / f64::from(minor));
        }
        axis.formatter = Formatter::Multiple(self.clone());
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

fn plain_label(num: i64, den: i64, sym: &str) -> String {
    if den == 1 {
        return match num {
            0 => "0".to_string(),
            1 => sym.to_string(),
            -1 => format!("-{sym}"),
            k => format!("{k}{sym}"),
        };
    }
    match num {
        1 => format!("{sym}/{den}"),
        -1 => format!("-{sym}/{den}"),
        k if k > 0 => format!("{k}{sym}/{den}"),
        k => format!("-{}{sym}/{den}", k.unsigned_abs()),
    }
}

fn tex_label(num: i64, den: i64, tex: &str) -> String {
    if den == 1 {
        return match num {
            0 => "$0$".to_string(),
            1 => format!("${tex}$"),
            -1 => format!("$-{tex}$"),
            k => format!("${k}{tex}$"),
        };
    }
    match num {
        1 => format!(r"$\frac{{{tex}}}{{{den}}}$"),
        -1 => format!(r"$-\frac{{{tex}}}{{{den}}}$"),
        k if k > 0 => format!(r"$\frac{{{k}{tex}}}{{{den}}}$"),
        k => format!(r"$-\frac{{{}{tex}}}{{{den}}}$", k.unsigned_abs()),
    }
}

/// Relabel the selected axis of every handle in `axes` as multiples of the unit.
///
/// All handles are checked before anything is changed.
pub fn format_ticklabels(
    fig: &mut Figure,
    axes: &[AxesId],
    selector: AxisSelector,
    formatter: &MultipleFormatter,
) -> Result<()> {
    formatter.validate()?;
    fig.check_handles(axes)?;
    for &id in axes {
        let ax = fig.axes_mut(id)?;
        if selector.has_x() { formatter.apply(&mut ax.x_axis); }
        if selector.has_y() { formatter.apply(&mut ax.y_axis); }
    }
    debug!(count = axes.len(), ?selector, den = formatter.denominator, "formatted tick labels");
    Ok(())
}

/// Put `numticks` evenly spaced ticks from `vmin` to `vmax`, rounded to `decimals`
/// places and labelled with their values.
pub fn set_ticks_linear(
    fig: &mut Figure,
    id: AxesId,
    vmin: f64,
    vmax: f64,
    numticks: usize,
    decimals: u32,
    selector: AxisSelector,
) -> Result<()> {
    if !vmin.is_finite() || !vmax.is_finite() || vmin == vmax {
        return Err(invalid(format!("tick range must be finite and non-empty, got [{vmin}, {vmax}]")));
    }
    if numticks == 0 {
        return Err(invalid("numticks must be at least 1"));
    }
    let ticks: Vec<f64> = if numticks == 1 {
        vec![round_to(vmin, decimals)]
    } else {
        linspace(vmin, vmax, numticks).into_iter().map(|t| round_to(t, decimals)).collect()
    };
    let mut sorted = ticks.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return Err(invalid(format!("{numticks} ticks collapse when rounded to {decimals} decimals")));
    }
    let labels: Vec<String> = sorted.iter().map(|&t| short_number(t)).collect();
    let ax = fig.axes_mut(id)?;
    for axis in [
        selector.has_x().then_some(&mut ax.x_axis),
        selector.has_y().then_some(&mut ax.y_axis),
    ]
    .into_iter()
    .flatten()
    {
        axis.major = Locator::Fixed(sorted.clone());
        axis.formatter = Formatter::Fixed(labels.clone());
    }
    Ok(())
}

/// `1.234e-03` style scientific notation.
fn scientific(value: f64, digits: usize) -> String {
    let s = format!("{:.*e}", digits, value);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => s,
    }
}

/// The string siunitx' `\SI{value}{unit}` would typeset, rounded to `digits`.
/// Without TeX a math-mode fallback is returned and a warning is logged.
pub fn si_string(value: f64, unit: &str, digits: usize, style: &Style) -> String {
    let v = scientific(value, digits);
    if !style.use_tex {
        warn!(r"si_string: \SI only possible in TeX mode, using a plain fallback");
        return format!(r"${v}\,${unit}");
    }
    format!(r"\SI{{{v}}}{{{unit}}}")
}
