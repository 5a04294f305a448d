// File: crates/figpolish-core/src/colorbar.rs
// Summary: Heat-map mappables and standalone colorbars.

use std::str::FromStr;

use tracing::warn;

use crate::axes::{AxesId, AxesKind, YSide};
use crate::colormap::Colormap;
use crate::error::{invalid, FigError, Result};
use crate::figsize::FigureDimensions;
use crate::figure::{Figure, SubplotParams};
use crate::geometry::AxesRect;
use crate::setup::Style;

/// Rectangular grid of values mapped to colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Heatmap {
    rows: Vec<Vec<f64>>,
    pub colormap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
    pub alpha: f64,
}

impl Heatmap {
    /// Color limits default to the finite data range.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(invalid("heat map needs at least one row and one column"));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(invalid(format!("row {bad} has {} values, expected {cols}", rows[bad].len())));
        }
        let (vmin, vmax) = rows
            .iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if !vmin.is_finite() {
            return Err(invalid("heat map has no finite values"));
        }
        Ok(Self { rows, colormap: Colormap::Viridis, vmin, vmax, alpha: 1.0 })
    }

    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    pub fn with_limits(mut self, vmin: f64, vmax: f64) -> Result<Self> {
        if !(vmin.is_finite() && vmax.is_finite() && vmin <= vmax) {
            return Err(invalid(format!("color limits must be finite and ordered, got [{vmin}, {vmax}]")));
        }
        self.vmin = vmin;
        self.vmax = vmax;
        Ok(self)
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) { (self.rows.len(), self.rows[0].len()) }
    pub fn rows(&self) -> &[Vec<f64>] { &self.rows }

    /// Position of `v` on the color scale, 0 at `vmin` and 1 at `vmax`.
    pub fn normalize(&self, v: f64) -> f64 {
        if self.vmax > self.vmin { (v - self.vmin) / (self.vmax - self.vmin) } else { 0.5 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl FromStr for Orientation {
    type Err = FigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            other => Err(invalid(format!(
                "orientation should have been one of ['horizontal', 'vertical'], but was {other}!"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ColorbarOptions {
    pub colormap: Colormap,
    pub orientation: Orientation,
    /// Colorbar extent in figure fractions.
    pub width: f64,
    pub height: f64,
    /// Inches; derived from the style's figure size when unset.
    pub figsize: Option<FigureDimensions>,
    pub x0: Option<f64>,
    pub y0: Option<f64>,
    pub alpha: f64,
    pub label: Option<String>,
}

impl Default for ColorbarOptions {
    fn default() -> Self {
        Self {
            colormap: Colormap::Viridis,
            orientation: Orientation::Horizontal,
            width: 0.8,
            height: 0.3,
            figsize: None,
            x0: None,
            y0: None,
            alpha: 1.0,
            label: None,
        }
    }
}

impl Figure {
    /// Add a colorbar for `mappable` occupying `rect`.
    pub fn add_colorbar(
        &mut self,
        mappable: &Heatmap,
        rect: impl Into<AxesRect>,
        orientation: Orientation,
        label: Option<&str>,
    ) -> Result<AxesId> {
        let id = self.add_axes(rect);
        let ax = self.axes_mut(id)?;
        ax.kind = AxesKind::Colorbar { colormap: mappable.colormap, orientation, alpha: mappable.alpha };
        let (vmin, vmax) = if mappable.vmax > mappable.vmin {
            (mappable.vmin, mappable.vmax)
        } else {
            (mappable.vmin - 0.5, mappable.vmin + 0.5)
        };
        let label = label.unwrap_or_default();
        match orientation {
            Orientation::Horizontal => {
                ax.set_xlim(vmin, vmax);
                ax.set_ylim(0.0, 1.0);
                ax.show_y = false;
                ax.set_xlabel(label);
            }
            Orientation::Vertical => {
                ax.set_xlim(0.0, 1.0);
                ax.set_ylim(vmin, vmax);
                ax.show_x = false;
                ax.y_side = YSide::Right;
                ax.set_ylabel(label);
            }
        }
        Ok(id)
    }
}

/// Figure that shows nothing but a colorbar for `heat`.
///
/// Returns the figure and the colorbar's axes. A width/height pair that does
/// not match the orientation is swapped.
pub fn plot_colorbar(style: &Style, heat: Vec<Vec<f64>>, opts: &ColorbarOptions) -> Result<(Figure, AxesId)> {
    let base = style.figure_dimensions()?;
    let (mut width, mut height) = (opts.width, opts.height);
    let (figsize, x0, y0) = match opts.orientation {
        Orientation::Horizontal => {
            if height > width {
                warn!(width, height, "horizontal colorbar narrower than tall, swapping width and height");
                std::mem::swap(&mut width, &mut height);
            }
            (
                opts.figsize.unwrap_or(FigureDimensions::new(base.width, 0.2 * base.height)),
                opts.x0.unwrap_or(0.1),
                opts.y0.unwrap_or(0.5),
            )
        }
        Orientation::Vertical => {
            if width > height {
                warn!(width, height, "vertical colorbar wider than tall, swapping width and height");
                std::mem::swap(&mut width, &mut height);
            }
            (
                opts.figsize.unwrap_or(FigureDimensions::new(0.15 * base.width, base.height)),
                opts.x0.unwrap_or(0.2),
                opts.y0.unwrap_or(0.1),
            )
        }
    };
    let heat = Heatmap::new(heat)?.with_colormap(opts.colormap).with_alpha(opts.alpha);

    let mut fig = Figure::with_size(style, figsize)?;
    let p = SubplotParams::default();
    let host = fig.add_axes([p.left, p.bottom, p.right - p.left, p.top - p.bottom]);
    {
        let ax = fig.axes_mut(host)?;
        ax.imshow(heat.clone());
        ax.visible = false;
    }
    let cbar = fig.add_colorbar(&heat, [x0, y0, width, height], opts.orientation, opts.label.as_deref())?;
    Ok((fig, cbar))
}
