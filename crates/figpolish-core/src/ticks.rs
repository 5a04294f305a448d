// File: crates/figpolish-core/src/ticks.rs
// Summary: Tick locators, tick label formatters and the resulting tick set.

use crate::axis::ScaleKind;
use crate::error::{invalid, Result};
use crate::format::MultipleFormatter;
use crate::grid::{multiples_in, nice_number, round_to};
use crate::setup::TextMode;

/// Target number of intervals for automatic ticks.
const AUTO_INTERVALS: f64 = 5.0;

/// Ordered (position, label) pairs of one axis.
/// Contract: positions are finite and strictly increasing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisTickSet {
    ticks: Vec<(f64, String)>,
}

impl AxisTickSet {
    pub fn new(ticks: Vec<(f64, String)>) -> Result<Self> {
        if let Some((p, _)) = ticks.iter().find(|(p, _)| !p.is_finite()) {
            return Err(invalid(format!("tick position {p} is not finite")));
        }
        if let Some(w) = ticks.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(invalid(format!(
                "tick positions must be strictly increasing ({} then {})",
                w[0].0, w[1].0
            )));
        }
        Ok(Self { ticks })
    }

    pub fn empty() -> Self { Self::default() }
    pub fn len(&self) -> usize { self.ticks.len() }
    pub fn is_empty(&self) -> bool { self.ticks.is_empty() }
    pub fn positions(&self) -> Vec<f64> { self.ticks.iter().map(|(p, _)| *p).collect() }
    pub fn labels(&self) -> Vec<&str> { self.ticks.iter().map(|(_, l)| l.as_str()).collect() }
    pub fn iter(&self) -> impl Iterator<Item = (f64, &str)> + '_ {
        self.ticks.iter().map(|(p, l)| (*p, l.as_str()))
    }
}

/// Where ticks go.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Locator {
    /// 1-2-5 steps for linear axes, decades for log axes.
    #[default]
    Auto,
    /// Every integer multiple of the step.
    Multiple(f64),
    /// Exactly these positions (those outside the view are kept too).
    Fixed(Vec<f64>),
    None,
}

impl Locator {
    /// Sorted, de-duplicated tick positions for a view of `[min, max]`.
    pub fn positions(&self, min: f64, max: f64, kind: ScaleKind) -> Vec<f64> {
        let mut out = match self {
            Locator::None => Vec::new(),
            Locator::Fixed(p) => p.iter().copied().filter(|v| v.is_finite()).collect(),
            Locator::Multiple(step) => multiples_in(min, max, *step),
            Locator::Auto => match kind {
                ScaleKind::Linear => multiples_in(min, max, auto_step(min, max)),
                ScaleKind::Log10 => decades(min, max),
            },
        };
        out.sort_by(|a, b| a.total_cmp(b));
        match self {
            // fixed labels are matched by index, only exact repeats collapse
            Locator::Fixed(_) => out.dedup(),
            _ => out.dedup_by(|a, b| (*a - *b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)),
        }
        out
    }
}

pub(crate) fn auto_step(min: f64, max: f64) -> f64 {
    let span = (max - min).abs();
    if span <= 0.0 || !span.is_finite() { return 1.0; }
    nice_number(span / AUTO_INTERVALS)
}

fn decades(min: f64, max: f64) -> Vec<f64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if hi <= 0.0 { return Vec::new(); }
    let lo = lo.max(1e-300);
    let first = (lo.log10() - 1e-9).ceil() as i32;
    let last = (hi.log10() + 1e-9).floor() as i32;
    (first..=last).map(|e| 10f64.powi(e)).collect()
}

/// How tick values become labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Formatter {
    /// Decimal representation with as many places as the tick spacing needs.
    #[default]
    Plain,
    /// Rational multiples of a unit, see [`MultipleFormatter`].
    Multiple(MultipleFormatter),
    /// Label `i` belongs to tick `i`; missing labels are empty.
    Fixed(Vec<String>),
}

impl Formatter {
    /// Labels for `positions` (already sorted) on an axis of the given kind.
    pub fn labels(&self, positions: &[f64], kind: ScaleKind, mode: TextMode) -> Vec<String> {
        match self {
            Formatter::Multiple(f) => positions.iter().map(|&x| f.label(x, mode)).collect(),
            Formatter::Fixed(labels) => (0..positions.len())
                .map(|i| labels.get(i).cloned().unwrap_or_default())
                .collect(),
            Formatter::Plain => match kind {
                ScaleKind::Log10 => positions.iter().map(|&x| power_label(x, mode)).collect(),
                ScaleKind::Linear => {
                    let decimals = decimals_for(positions);
                    positions.iter().map(|&x| plain_number(x, decimals)).collect()
                }
            },
        }
    }
}

/// Fewest decimal places that represent every position.
fn decimals_for(positions: &[f64]) -> usize {
    (0..=10u32)
        .find(|&d| positions.iter().all(|&x| (round_to(x, d) - x).abs() <= 1e-9 * x.abs().max(1.0)))
        .unwrap_or(10) as usize
}

/// Fixed-point number without a negative zero.
pub fn plain_number(x: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, x);
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        format!("{:.*}", decimals, 0.0)
    } else {
        s
    }
}

/// Shortest decimal representation of a value (`0.5`, `2`, `-0.25`).
pub fn short_number(x: f64) -> String {
    if x == 0.0 { return "0".to_string(); }
    let s = format!("{x}");
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

fn power_label(x: f64, mode: TextMode) -> String {
    let e = x.log10().round() as i32;
    match mode {
        TextMode::Tex => format!("$10^{{{e}}}$"),
        TextMode::Plain => {
            let sup: String = e.to_string().chars().map(|c| match c {
                '-' => '⁻',
                d => ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'][d.to_digit(10).unwrap_or(0) as usize],
            }).collect();
            format!("10{sup}")
        }
    }
}
