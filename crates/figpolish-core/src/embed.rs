// File: crates/figpolish-core/src/embed.rs
// Summary: Move axis labels into the gap between the last two tick labels.
// Notes:
// - Every function here plans first from the current layout, then mutates.
// - An axis with fewer than two visible tick labels is skipped when it has no
//   label and rejected when it has one.

use std::str::FromStr;

use tracing::debug;

use crate::axes::{Axes, AxesId};
use crate::axis::LabelPlacement;
use crate::error::{invalid, FigError, Result};
use crate::figure::Figure;
use crate::layout::{layout_axes, AxesLayout, TickLabelBox};
use crate::text::{HAlign, TextMeasure, VAlign};

/// Vertical placement of an embedded x label relative to the tick label row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum XLabelAlign {
    /// Mid-height of the tick labels.
    #[default]
    Top,
    /// Lower edge of the tick labels.
    Center,
    /// Lower edge minus half the tick label height.
    Bottom,
}

impl FromStr for XLabelAlign {
    type Err = FigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(XLabelAlign::Top),
            "center" => Ok(XLabelAlign::Center),
            "bottom" => Ok(XLabelAlign::Bottom),
            other => Err(invalid(format!(
                "Vertical x-alignment should have been one of ['top', 'center', 'bottom'], but was {other}!"
            ))),
        }
    }
}

/// Horizontal placement of an embedded y label relative to the tick label column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum YLabelAlign {
    /// Mid-width of the tick labels.
    #[default]
    Right,
    /// Left edge of the tick labels.
    Center,
    /// Left edge minus half the tick label width.
    Left,
}

impl FromStr for YLabelAlign {
    type Err = FigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "right" => Ok(YLabelAlign::Right),
            "center" => Ok(YLabelAlign::Center),
            "left" => Ok(YLabelAlign::Left),
            other => Err(invalid(format!(
                "Horizontal y-alignment should have been one of ['left', 'center', 'right'], but was {other}!"
            ))),
        }
    }
}

/// Vertical extent of the x tick label row, in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickRow {
    /// Lowest edge of the tallest visible tick label.
    pub bottom: f64,
    /// Distance from that edge up to the tick pad below the frame.
    pub height: f64,
}

fn visible_pair<'a>(ticks: &'a [&'a TickLabelBox], label: &str, axis: char) -> Result<Option<(&'a TickLabelBox, &'a TickLabelBox)>> {
    if ticks.len() < 2 {
        if label.is_empty() {
            return Ok(None);
        }
        return Err(invalid(format!(
            "{axis} axis has {} visible tick labels, need at least 2 to embed label '{label}'",
            ticks.len()
        )));
    }
    Ok(Some((ticks[ticks.len() - 2], ticks[ticks.len() - 1])))
}

/// The x tick label row, if any tick label is visible.
pub fn x_tick_row(layout: &AxesLayout) -> Option<TickRow> {
    let tallest = layout
        .visible_x_ticks()
        .into_iter()
        .max_by(|a, b| a.bbox.height().total_cmp(&b.bbox.height()))?;
    let bottom = tallest.bbox.y0;
    Some(TickRow { bottom, height: layout.frame.y0 - layout.tick_pad_px - bottom })
}

/// Where a caption goes under the x tick labels, in axes fractions.
pub fn caption_below_ticks(layout: &AxesLayout) -> (f64, f64) {
    let frame = layout.frame;
    let y = match x_tick_row(layout) {
        Some(row) => row.bottom - row.height,
        // no tick labels: one text line under the frame
        None => frame.y0 - layout.tick_len_px - layout.tick_pad_px - layout.font_px,
    };
    (0.5, (y - frame.y0) / frame.height())
}

/// Embedded x label placement for `ax`, or `None` when the axis is skipped.
pub fn plan_xlabel(layout: &AxesLayout, ax: &Axes, align: XLabelAlign) -> Result<Option<LabelPlacement>> {
    let ticks = layout.visible_x_ticks();
    let Some((prev, last)) = visible_pair(&ticks, &ax.x_axis.label, 'x')? else {
        return Ok(None);
    };
    let Some(row) = x_tick_row(layout) else { return Ok(None) };
    let xpos = (last.bbox.x0 + prev.bbox.x1) / 2.0;
    let ypos = match align {
        XLabelAlign::Top => row.bottom + row.height / 2.0,
        XLabelAlign::Center => row.bottom,
        XLabelAlign::Bottom => row.bottom - row.height / 2.0,
    };
    let (x, y) = layout.to_fraction(xpos, ypos);
    Ok(Some(LabelPlacement::Embedded { x, y, ha: HAlign::Center, va: VAlign::Center }))
}

/// Embedded y label placement for `ax`, or `None` when the axis is skipped.
///
/// A label that would reach into the frame is moved just outside it,
/// keeping the tick pad as a gap.
pub fn plan_ylabel(
    layout: &AxesLayout,
    ax: &Axes,
    align: YLabelAlign,
    metrics: &dyn TextMeasure,
) -> Result<Option<LabelPlacement>> {
    let ticks = layout.visible_y_ticks();
    let Some((prev, last)) = visible_pair(&ticks, &ax.y_axis.label, 'y')? else {
        return Ok(None);
    };
    let frame = layout.frame;
    let ypos = (last.bbox.y0 + prev.bbox.y1) / 2.0;
    let tick_width = last.bbox.width();
    let xpos = match align {
        YLabelAlign::Left => last.bbox.x0 - tick_width / 2.0,
        YLabelAlign::Center => last.bbox.x0,
        YLabelAlign::Right => last.bbox.x0 + tick_width / 2.0,
    };
    let (x, y) = layout.to_fraction(xpos, ypos);
    let (label_w, _) = metrics.measure(&ax.y_axis.label, layout.font_px);
    let pad = layout.tick_pad_px;

    let placement = if x < 0.5 && xpos + label_w / 2.0 + pad > frame.x0 {
        LabelPlacement::Embedded { x: -pad / frame.width(), y, ha: HAlign::Right, va: VAlign::Center }
    } else if x > 0.5 && xpos - label_w / 2.0 - pad < frame.x1 {
        LabelPlacement::Embedded { x: 1.0 + pad / frame.width(), y, ha: HAlign::Left, va: VAlign::Center }
    } else {
        LabelPlacement::Embedded { x, y, ha: HAlign::Center, va: VAlign::Center }
    };
    Ok(Some(placement))
}

pub fn embed_xlabel(fig: &mut Figure, id: AxesId, align: XLabelAlign) -> Result<()> {
    let shaper = fig.shaper();
    embed_xlabel_with(fig, id, align, &shaper)
}

pub fn embed_xlabel_with(fig: &mut Figure, id: AxesId, align: XLabelAlign, metrics: &dyn TextMeasure) -> Result<()> {
    let ax = fig.axes(id)?;
    let layout = layout_axes(fig, ax, metrics)?;
    if let Some(placement) = plan_xlabel(&layout, ax, align)? {
        debug!(axes = id.index(), ?placement, "embedding x label");
        fig.axes_mut(id)?.x_axis.label_placement = placement;
    }
    Ok(())
}

pub fn embed_ylabel(fig: &mut Figure, id: AxesId, align: YLabelAlign) -> Result<()> {
    let shaper = fig.shaper();
    embed_ylabel_with(fig, id, align, &shaper)
}

pub fn embed_ylabel_with(fig: &mut Figure, id: AxesId, align: YLabelAlign, metrics: &dyn TextMeasure) -> Result<()> {
    let ax = fig.axes(id)?;
    let layout = layout_axes(fig, ax, metrics)?;
    if let Some(placement) = plan_ylabel(&layout, ax, align, metrics)? {
        debug!(axes = id.index(), ?placement, "embedding y label");
        fig.axes_mut(id)?.y_axis.label_placement = placement;
    }
    Ok(())
}
