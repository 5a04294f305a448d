// File: crates/figpolish-core/src/layout.rs
// Summary: Display-space layout of one axes: frame, tick label boxes and axis label boxes.
// Notes:
// - Display space: pixels, origin bottom-left, y up (see geometry.rs).
// - Tick labels sit outside the frame at `tick length + tick pad`.

use crate::axes::{Axes, YSide};
use crate::axis::{Axis, LabelPlacement};
use crate::error::Result;
use crate::figure::Figure;
use crate::geometry::Bbox;
use crate::scale::ScaleTransform;
use crate::text::{HAlign, TextMeasure, VAlign};

/// One rendered tick label.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLabelBox {
    pub position: f64,
    pub label: String,
    pub bbox: Bbox,
    /// Tick position lies inside the view limits.
    pub in_limits: bool,
}

/// Everything about an axes that depends on the figure size and fonts.
#[derive(Clone, Debug)]
pub struct AxesLayout {
    pub frame: Bbox,
    pub x_ticks: Vec<TickLabelBox>,
    pub y_ticks: Vec<TickLabelBox>,
    /// Tick label size in pixels.
    pub tick_font_px: f64,
    /// Axis label/text size in pixels.
    pub font_px: f64,
    pub tick_len_px: f64,
    pub tick_pad_px: f64,
}

impl AxesLayout {
    /// Tick labels whose ticks are inside the view, in axis order.
    pub fn visible_x_ticks(&self) -> Vec<&TickLabelBox> {
        self.x_ticks.iter().filter(|t| t.in_limits && !t.label.is_empty()).collect()
    }

    pub fn visible_y_ticks(&self) -> Vec<&TickLabelBox> {
        self.y_ticks.iter().filter(|t| t.in_limits && !t.label.is_empty()).collect()
    }

    /// Axes fractions -> display.
    pub fn to_display(&self, fx: f64, fy: f64) -> (f64, f64) {
        (self.frame.x0 + fx * self.frame.width(), self.frame.y0 + fy * self.frame.height())
    }

    /// Display -> axes fractions.
    pub fn to_fraction(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.frame.x0) / self.frame.width(), (y - self.frame.y0) / self.frame.height())
    }
}

/// Lay out `ax` inside `fig`, measuring text with `metrics`.
pub fn layout_axes(fig: &Figure, ax: &Axes, metrics: &dyn TextMeasure) -> Result<AxesLayout> {
    let style = fig.style();
    let (fw, fh) = fig.pixel_size();
    let frame = ax.rect.to_display(fw, fh);
    let tick_font_px = style.pt_to_px(f64::from(style.tick_label_size_pt));
    let font_px = style.pt_to_px(f64::from(style.font_size_pt));
    let tick_len_px = style.pt_to_px(style.tick_length_pt);
    let tick_pad_px = style.pt_to_px(style.tick_pad_pt);
    let offset = tick_len_px + tick_pad_px;
    let mode = style.text_mode();

    let mut x_ticks = Vec::new();
    if ax.show_x {
        let scale = ax.x_axis.scale();
        for (pos, label) in ax.x_axis.tick_set(mode)?.iter() {
            let (w, h) = metrics.measure(label, tick_font_px);
            let cx = frame.x0 + scale.to_fraction(pos) * frame.width();
            let top = frame.y0 - offset;
            x_ticks.push(TickLabelBox {
                position: pos,
                label: label.to_string(),
                bbox: Bbox::from_extents(cx - w * 0.5, top - h, cx + w * 0.5, top),
                in_limits: scale.contains(pos),
            });
        }
    }

    let mut y_ticks = Vec::new();
    if ax.show_y {
        let scale = ax.y_axis.scale();
        for (pos, label) in ax.y_axis.tick_set(mode)?.iter() {
            let (w, h) = metrics.measure(label, tick_font_px);
            let cy = frame.y0 + scale.to_fraction(pos) * frame.height();
            let bbox = match ax.y_side {
                YSide::Left => {
                    let right = frame.x0 - offset;
                    Bbox::from_extents(right - w, cy - h * 0.5, right, cy + h * 0.5)
                }
                YSide::Right => {
                    let left = frame.x1 + offset;
                    Bbox::from_extents(left, cy - h * 0.5, left + w, cy + h * 0.5)
                }
            };
            y_ticks.push(TickLabelBox {
                position: pos,
                label: label.to_string(),
                bbox,
                in_limits: scale.contains(pos),
            });
        }
    }

    Ok(AxesLayout { frame, x_ticks, y_ticks, tick_font_px, font_px, tick_len_px, tick_pad_px })
}

/// Anchor, alignment and rotation of an axis label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub ha: HAlign,
    pub va: VAlign,
    /// Counter-clockwise, degrees.
    pub rotation: f32,
}

/// Where the x label is drawn (display space).
pub fn x_label_anchor(layout: &AxesLayout, axis: &Axis) -> LabelAnchor {
    match axis.label_placement {
        LabelPlacement::Embedded { x, y, ha, va } => {
            let (dx, dy) = layout.to_display(x, y);
            LabelAnchor { x: dx, y: dy, ha, va, rotation: 0.0 }
        }
        LabelPlacement::Auto => {
            let bottom = layout
                .visible_x_ticks()
                .iter()
                .map(|t| t.bbox.y0)
                .fold(layout.frame.y0 - layout.tick_len_px, f64::min);
            LabelAnchor {
                x: layout.frame.center().0,
                y: bottom - layout.tick_pad_px,
                ha: HAlign::Center,
                va: VAlign::Top,
                rotation: 0.0,
            }
        }
    }
}

/// Where the y label is drawn (display space).
pub fn y_label_anchor(layout: &AxesLayout, axis: &Axis, side: YSide) -> LabelAnchor {
    match axis.label_placement {
        LabelPlacement::Embedded { x, y, ha, va } => {
            let (dx, dy) = layout.to_display(x, y);
            LabelAnchor { x: dx, y: dy, ha, va, rotation: 0.0 }
        }
        LabelPlacement::Auto => {
            let ticks = layout.visible_y_ticks();
            let cy = layout.frame.center().1;
            match side {
                YSide::Left => {
                    let left = ticks.iter().map(|t| t.bbox.x0).fold(layout.frame.x0 - layout.tick_len_px, f64::min);
                    // rotated 90°: the text's bottom edge faces the axis
                    LabelAnchor { x: left - layout.tick_pad_px, y: cy, ha: HAlign::Center, va: VAlign::Bottom, rotation: 90.0 }
                }
                YSide::Right => {
                    let right = ticks.iter().map(|t| t.bbox.x1).fold(layout.frame.x1 + layout.tick_len_px, f64::max);
                    LabelAnchor { x: right + layout.tick_pad_px, y: cy, ha: HAlign::Center, va: VAlign::Top, rotation: 90.0 }
                }
            }
        }
    }
}

/// Display box of a text of size (`w`, `h`) anchored at `anchor`, unrotated.
pub fn anchored_box(x: f64, y: f64, w: f64, h: f64, ha: HAlign, va: VAlign) -> Bbox {
    let x0 = match ha {
        HAlign::Left => x,
        HAlign::Center => x - w * 0.5,
        HAlign::Right => x - w,
    };
    let y0 = match va {
        VAlign::Bottom => y,
        VAlign::Center => y - h * 0.5,
        VAlign::Top => y - h,
    };
    Bbox::from_bounds(x0, y0, w, h)
}

/// Display box of a text of size (`w`, `h`) anchored at (`x`, `y`) and rotated
/// counter-clockwise by `rotation` degrees about the anchor.
pub fn rotated_box(x: f64, y: f64, w: f64, h: f64, ha: HAlign, va: VAlign, rotation: f32) -> Bbox {
    let local = anchored_box(0.0, 0.0, w, h, ha, va);
    if rotation == 0.0 {
        return Bbox::from_bounds(x + local.x0, y + local.y0, w, h);
    }
    let (sin, cos) = f64::from(rotation).to_radians().sin_cos();
    let mut out = Bbox::from_extents(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (u, v) in local.corners() {
        let (px, py) = (x + u * cos - v * sin, y + u * sin + v * cos);
        out = out.union(&Bbox::from_extents(px, py, px, py));
    }
    out
}
