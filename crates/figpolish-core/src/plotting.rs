// File: crates/figpolish-core/src/plotting.rs
// Summary: Color cycle and variants of the standard line plot (colored segments, steps).

use skia_safe as skia;

use crate::axes::{Axes, LineCollection, LineStyle};
use crate::colormap::Colormap;
use crate::error::{invalid, Result};
use crate::setup::Style;

/// Periodic list of colors.
///
/// `get_color(inc)` returns the current color and advances by `inc`
/// (pass 0 to peek); `prev_color()` repeats the most recently used one.
#[derive(Clone, Debug, PartialEq)]
pub struct Colors {
    colors: Vec<skia::Color>,
    ctr: usize,
}

impl Colors {
    pub fn new(colors: Vec<skia::Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(invalid("color cycle must not be empty"));
        }
        Ok(Self { colors, ctr: 0 })
    }

    /// The style's color cycle.
    pub fn from_style(style: &Style) -> Result<Self> { Self::new(style.palette()?) }

    /// The common ten-color categorical cycle.
    pub fn tab10() -> Self {
        let colors = [
            (31, 119, 180), (255, 127, 14), (44, 160, 44), (214, 39, 40), (148, 103, 189),
            (140, 86, 75), (227, 119, 194), (127, 127, 127), (188, 189, 34), (23, 190, 207),
        ]
        .iter()
        .map(|&(r, g, b)| skia::Color::from_rgb(r, g, b))
        .collect();
        Self { colors, ctr: 0 }
    }

    pub fn len(&self) -> usize { self.colors.len() }
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    pub fn get_color(&mut self, inc: usize) -> skia::Color {
        let c = self.colors[self.ctr % self.colors.len()];
        self.ctr += inc;
        c
    }

    pub fn prev_color(&self) -> skia::Color {
        let n = self.colors.len();
        self.colors[(self.ctr + n - 1) % n]
    }
}

impl Default for Colors {
    /// High-contrast cycle: blue, orange, green, darkred, cyan, orangered, purple, lime.
    fn default() -> Self {
        let colors = [
            (0, 0, 255), (255, 128, 0), (0, 128, 0), (139, 0, 0),
            (0, 255, 255), (255, 69, 0), (128, 0, 128), (0, 255, 0),
        ]
        .iter()
        .map(|&(r, g, b)| skia::Color::from_rgb(r, g, b))
        .collect();
        Self { colors, ctr: 0 }
    }
}

/// Connect consecutive points with segments colored by `cs` through `cmap`.
///
/// Segment `i` joins point `i` and `i + 1` and takes the color of `cs[i]`,
/// normalized over the range of `cs`.
pub fn plot_lines(ax: &mut Axes, xs: &[f64], ys: &[f64], cs: &[f64], cmap: Colormap) -> Result<()> {
    if xs.len() != ys.len() || xs.len() != cs.len() {
        return Err(invalid(format!(
            "x, y and c must have the same length ({}, {}, {})",
            xs.len(),
            ys.len(),
            cs.len()
        )));
    }
    if xs.len() < 2 {
        return Err(invalid("need at least two points to draw segments"));
    }
    let (lo, hi) = cs
        .iter()
        .filter(|c| c.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| (lo.min(c), hi.max(c)));
    let span = if hi > lo { hi - lo } else { 1.0 };
    let segments = xs
        .windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| [(x[0], y[0]), (x[1], y[1])])
        .collect::<Vec<_>>();
    let colors = cs[..segments.len()]
        .iter()
        .map(|&c| cmap.color((c - lo) / span, 1.0))
        .collect();
    let width_pt = ax.line_width_pt;
    ax.add_collection(LineCollection { segments, colors, width_pt });
    ax.autoscale_view();
    Ok(())
}

/// Step curve through `(xs, ys)`: the plotted points are
/// `x0, x1, x1, x2, x2, ...` against `y0, y0, y1, y1, y2, ...`.
///
/// With `fill_nans`, a NaN in `ys` repeats the previous finite value
/// (leading NaNs take the first finite value).
pub fn plot_step(ax: &mut Axes, xs: &[f64], ys: &[f64], fill_nans: bool, style: &LineStyle) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(invalid(format!("x and y must have the same length ({} vs {})", xs.len(), ys.len())));
    }
    if xs.is_empty() {
        return Err(invalid("cannot plot an empty series"));
    }
    let (nx, ny) = step_points(xs, ys, fill_nans)?;
    ax.plot_with(&nx, &ny, style)
}

/// Vertices of the step curve drawn by [`plot_step`].
pub fn step_points(xs: &[f64], ys: &[f64], fill_nans: bool) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut ys = ys.to_vec();
    if fill_nans {
        let mut last = ys
            .iter()
            .copied()
            .find(|y| !y.is_nan())
            .ok_or_else(|| invalid("all values are NaN, nothing to fill with"))?;
        for y in ys.iter_mut() {
            if y.is_nan() { *y = last; } else { last = *y; }
        }
    }
    let nx = xs.iter().flat_map(|&x| [x, x]).skip(1).collect();
    let mut ny: Vec<f64> = ys.iter().flat_map(|&y| [y, y]).collect();
    ny.pop();
    Ok((nx, ny))
}
