// File: crates/figpolish-core/src/axes.rs
// Summary: Axes (one subplot region): two axes, artists, data limits and autoscaling.

use skia_safe as skia;

use crate::axis::{Axis, ScaleKind};
use crate::colorbar::{Heatmap, Orientation};
use crate::colormap::Colormap;
use crate::error::{invalid, Result};
use crate::geometry::AxesRect;
use crate::plotting::Colors;
use crate::scale::ScaleTransform;
use crate::text::{HAlign, VAlign};

/// Relative padding added around the data by `autoscale_view`.
pub const MARGIN: f64 = 0.05;

/// Handle to an [`Axes`] owned by a [`crate::Figure`]. Only valid for the figure that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxesId {
    pub(crate) figure: u64,
    pub(crate) index: usize,
}

impl AxesId {
    /// Position in creation order.
    pub fn index(&self) -> usize { self.index }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YSide {
    Left,
    Right,
}

/// Coordinate frame of a text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coords {
    Data,
    /// (0, 0) bottom-left and (1, 1) top-right of the axes frame.
    Axes,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Falls back to the figure's font size.
    pub size_pt: Option<f32>,
    /// Falls back to the theme's text color.
    pub color: Option<skia::Color>,
    pub ha: HAlign,
    pub va: VAlign,
    /// Counter-clockwise, degrees.
    pub rotation: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { size_pt: None, color: None, ha: HAlign::Left, va: VAlign::Bottom, rotation: 0.0 }
    }
}

impl TextStyle {
    pub fn centered() -> Self { Self { ha: HAlign::Center, va: VAlign::Center, ..Self::default() } }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub coords: Coords,
    pub style: TextStyle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineStyle {
    /// Next color of the axes' cycle when unset.
    pub color: Option<skia::Color>,
    pub width_pt: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line2D {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub color: skia::Color,
    pub width_pt: f32,
}

/// Unconnected point markers.
#[derive(Clone, Debug, PartialEq)]
pub struct Scatter {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub color: skia::Color,
    /// Marker diameter.
    pub size_pt: f32,
}

/// Independent two-point segments, one color each.
#[derive(Clone, Debug, PartialEq)]
pub struct LineCollection {
    pub segments: Vec<[(f64, f64); 2]>,
    pub colors: Vec<skia::Color>,
    pub width_pt: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatchStyle {
    /// Falls back to the theme's patch edge color.
    pub edge: Option<skia::Color>,
    pub fill: Option<skia::Color>,
    pub line_width_pt: f32,
}

impl Default for PatchStyle {
    fn default() -> Self { Self { edge: None, fill: None, line_width_pt: 1.0 } }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub style: PatchStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Artist {
    Line(Line2D),
    Markers(Scatter),
    Collection(LineCollection),
    Text(Text),
    Rect(Rectangle),
    Image(Heatmap),
}

#[derive(Clone, Debug, PartialEq)]
pub enum AxesKind {
    Plot,
    /// Color scale strip along the long axis.
    Colorbar { colormap: Colormap, orientation: Orientation, alpha: f64 },
}

/// Position inside a subplot grid, kept so the grid can be re-spaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GridCell {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

#[derive(Clone, Debug)]
pub struct Axes {
    pub rect: AxesRect,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub title: String,
    pub y_side: YSide,
    /// Draw x ticks/labels.
    pub show_x: bool,
    /// Draw y ticks/labels.
    pub show_y: bool,
    /// Hidden axes draw nothing at all.
    pub visible: bool,
    pub kind: AxesKind,
    pub artists: Vec<Artist>,
    pub(crate) cycle: Colors,
    pub(crate) cell: Option<GridCell>,
    pub(crate) line_width_pt: f32,
    data_lim: Option<[f64; 4]>,
}

impl Axes {
    pub(crate) fn new(rect: AxesRect, cycle: Colors, line_width_pt: f32) -> Self {
        Self {
            rect,
            x_axis: Axis::unit(),
            y_axis: Axis::unit(),
            title: String::new(),
            y_side: YSide::Left,
            show_x: true,
            show_y: true,
            visible: true,
            kind: AxesKind::Plot,
            artists: Vec::new(),
            cycle,
            cell: None,
            line_width_pt,
            data_lim: None,
        }
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) { self.x_axis.label = label.into(); }
    pub fn set_ylabel(&mut self, label: impl Into<String>) { self.y_axis.label = label.into(); }
    pub fn set_title(&mut self, title: impl Into<String>) { self.title = title.into(); }
    pub fn set_xlim(&mut self, min: f64, max: f64) { self.x_axis.set_limits(min, max); }
    pub fn set_ylim(&mut self, min: f64, max: f64) { self.y_axis.set_limits(min, max); }
    /// `[xmin, xmax, ymin, ymax]`
    pub fn set_view(&mut self, view: [f64; 4]) {
        self.set_xlim(view[0], view[1]);
        self.set_ylim(view[2], view[3]);
    }
    pub fn set_xscale(&mut self, kind: ScaleKind) {
        self.x_axis.kind = kind;
        self.autoscale_view();
    }
    pub fn set_yscale(&mut self, kind: ScaleKind) {
        self.y_axis.kind = kind;
        self.autoscale_view();
    }

    /// Line plot with the next color of the cycle.
    pub fn plot(&mut self, xs: &[f64], ys: &[f64]) -> Result<()> {
        self.plot_with(xs, ys, &LineStyle::default())
    }

    pub fn plot_with(&mut self, xs: &[f64], ys: &[f64], style: &LineStyle) -> Result<()> {
        if xs.len() != ys.len() {
            return Err(invalid(format!("x and y must have the same length ({} vs {})", xs.len(), ys.len())));
        }
        if xs.is_empty() {
            return Err(invalid("cannot plot an empty series"));
        }
        let color = match style.color {
            Some(c) => c,
            None => self.cycle.get_color(1),
        };
        self.update_datalim(xs.iter().copied().zip(ys.iter().copied()));
        self.artists.push(Artist::Line(Line2D {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            color,
            width_pt: style.width_pt.unwrap_or(self.line_width_pt),
        }));
        self.autoscale_view();
        Ok(())
    }

    /// Point markers with the next color of the cycle.
    pub fn scatter(&mut self, xs: &[f64], ys: &[f64], size_pt: f32) -> Result<()> {
        if xs.len() != ys.len() {
            return Err(invalid(format!("x and y must have the same length ({} vs {})", xs.len(), ys.len())));
        }
        let color = self.cycle.get_color(1);
        self.update_datalim(xs.iter().copied().zip(ys.iter().copied()));
        self.artists.push(Artist::Markers(Scatter { xs: xs.to_vec(), ys: ys.to_vec(), color, size_pt }));
        self.autoscale_view();
        Ok(())
    }

    /// Text anchored in data coordinates.
    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, style: TextStyle) {
        self.artists.push(Artist::Text(Text { x, y, text: text.into(), coords: Coords::Data, style }));
    }

    /// Text anchored in axes fractions.
    pub fn text_axes(&mut self, x: f64, y: f64, text: impl Into<String>, style: TextStyle) {
        self.artists.push(Artist::Text(Text { x, y, text: text.into(), coords: Coords::Axes, style }));
    }

    pub fn add_patch(&mut self, rect: Rectangle) {
        self.update_datalim([(rect.x, rect.y), (rect.x + rect.width, rect.y + rect.height)]);
        self.artists.push(Artist::Rect(rect));
    }

    pub fn add_collection(&mut self, coll: LineCollection) {
        self.update_datalim(coll.segments.iter().flat_map(|s| s.iter().copied()));
        self.artists.push(Artist::Collection(coll));
    }

    /// Show a heat map with one cell per value, row 0 at the top.
    pub fn imshow(&mut self, heat: Heatmap) {
        let (rows, cols) = heat.shape();
        self.x_axis.set_limits(-0.5, cols as f64 - 0.5);
        self.y_axis.set_limits(rows as f64 - 0.5, -0.5);
        self.artists.push(Artist::Image(heat));
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> + '_ {
        self.artists.iter().filter_map(|a| match a {
            Artist::Text(t) => Some(t),
            _ => None,
        })
    }

    /// `[xmin, xmax, ymin, ymax]` of everything added so far.
    pub fn data_limits(&self) -> Option<[f64; 4]> { self.data_lim }

    /// Grow the data limits to include `points`; non-finite points are ignored.
    pub fn update_datalim(&mut self, points: impl IntoIterator<Item = (f64, f64)>) {
        for (x, y) in points {
            if !x.is_finite() || !y.is_finite() { continue; }
            let lim = self.data_lim.get_or_insert([x, x, y, y]);
            lim[0] = lim[0].min(x);
            lim[1] = lim[1].max(x);
            lim[2] = lim[2].min(y);
            lim[3] = lim[3].max(y);
        }
    }

    /// Fit autoscaled axes to the data limits plus a small margin.
    pub fn autoscale_view(&mut self) {
        let Some([x0, x1, y0, y1]) = self.data_lim else { return };
        if self.x_axis.autoscale {
            let (lo, hi) = expand(x0, x1, self.x_axis.kind);
            self.x_axis.min = lo;
            self.x_axis.max = hi;
        }
        if self.y_axis.autoscale {
            let (lo, hi) = expand(y0, y1, self.y_axis.kind);
            self.y_axis.min = lo;
            self.y_axis.max = hi;
        }
    }

    /// Data point -> axes fractions.
    pub fn to_axes_fraction(&self, x: f64, y: f64) -> (f64, f64) {
        (self.x_axis.scale().to_fraction(x), self.y_axis.scale().to_fraction(y))
    }

    /// Axes fractions -> data point.
    pub fn from_axes_fraction(&self, fx: f64, fy: f64) -> (f64, f64) {
        (self.x_axis.scale().from_fraction(fx), self.y_axis.scale().from_fraction(fy))
    }
}

fn expand(lo: f64, hi: f64, kind: ScaleKind) -> (f64, f64) {
    match kind {
        ScaleKind::Log10 if hi > 0.0 => {
            let lo = if lo > 0.0 { lo } else { hi * 1e-3 };
            let (mut a, mut b) = (lo.log10(), hi.log10());
            if (b - a).abs() < 1e-12 { a -= 1.0; b += 1.0; }
            let m = (b - a) * MARGIN;
            (10f64.powf(a - m), 10f64.powf(b + m))
        }
        _ => {
            if (hi - lo).abs() < 1e-12 {
                return (lo - 1.0, hi + 1.0);
            }
            let m = (hi - lo) * MARGIN;
            (lo - m, hi + m)
        }
    }
}
