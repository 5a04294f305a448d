// File: crates/figpolish-core/src/tight.rs
// Summary: Tight layout: re-space a subplot grid so every axes' decorations fit the figure.
// Notes:
// - Only axes created through a subplot grid are moved; free axes (colorbars,
//   `add_axes`) keep their rectangles.
// - One pass: decorations are measured in pixels against the current frames,
//   which assumes their size does not depend on the frame size.

use tracing::{debug, warn};

use crate::axes::{Axes, Coords, GridCell};
use crate::error::{invalid, Result};
use crate::figure::{Figure, SubplotParams};
use crate::geometry::Bbox;
use crate::layout::{layout_axes, rotated_box, x_label_anchor, y_label_anchor, AxesLayout};
use crate::text::{HAlign, TextMeasure, VAlign};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TightLayout {
    /// Padding around and between decorated axes, in multiples of the font size.
    pub pad: f64,
    /// `[left, bottom, right, top]` region of the figure the grid may use.
    pub rect: [f64; 4],
}

impl Default for TightLayout {
    fn default() -> Self { Self { pad: 1.08, rect: [0.0, 0.0, 1.0, 1.0] } }
}

/// How far an axes' decorations reach past its frame on each side, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Overhang {
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
}

/// Largest `side` overhang among the cells `pick` selects, 0 when none.
fn widest(cells: &[(GridCell, Overhang)], pick: impl Fn(&GridCell) -> bool, side: impl Fn(&Overhang) -> f64) -> f64 {
    cells.iter().filter(|(c, _)| pick(c)).map(|(_, h)| side(h)).fold(0.0, f64::max)
}

/// Frame of `ax` united with its tick labels, axis labels, title and texts.
pub fn decorated_bbox(fig: &Figure, ax: &Axes, layout: &AxesLayout, metrics: &dyn TextMeasure) -> Bbox {
    let style = fig.style();
    let mut out = layout.frame;
    for t in layout.visible_x_ticks().into_iter().chain(layout.visible_y_ticks()) {
        out = out.union(&t.bbox);
    }
    if ax.show_x && !ax.x_axis.label.is_empty() {
        let a = x_label_anchor(layout, &ax.x_axis);
        let (w, h) = metrics.measure(&ax.x_axis.label, layout.font_px);
        out = out.union(&rotated_box(a.x, a.y, w, h, a.ha, a.va, a.rotation));
    }
    if ax.show_y && !ax.y_axis.label.is_empty() {
        let a = y_label_anchor(layout, &ax.y_axis, ax.y_side);
        let (w, h) = metrics.measure(&ax.y_axis.label, layout.font_px);
        out = out.union(&rotated_box(a.x, a.y, w, h, a.ha, a.va, a.rotation));
    }
    if !ax.title.is_empty() {
        let size = style.pt_to_px(f64::from(style.title_size_pt));
        let (w, h) = metrics.measure(&ax.title, size);
        let (cx, _) = layout.frame.center();
        let y = layout.frame.y1 + 1.5 * layout.tick_pad_px;
        out = out.union(&rotated_box(cx, y, w, h, HAlign::Center, VAlign::Bottom, 0.0));
    }
    for t in ax.texts() {
        let (fx, fy) = match t.coords {
            Coords::Data => ax.to_axes_fraction(t.x, t.y),
            Coords::Axes => (t.x, t.y),
        };
        if !fx.is_finite() || !fy.is_finite() {
            continue;
        }
        let (x, y) = layout.to_display(fx, fy);
        let size = style.pt_to_px(f64::from(t.style.size_pt.unwrap_or(style.font_size_pt)));
        let (w, h) = metrics.measure(&t.text, size);
        out = out.union(&rotated_box(x, y, w, h, t.style.ha, t.style.va, t.style.rotation));
    }
    out
}

impl Figure {
    /// Re-space the subplot grid so tick labels, axis labels and texts stay
    /// inside the figure, measuring text with the figure's fonts.
    pub fn tight_layout(&mut self, opts: &TightLayout) -> Result<()> {
        let shaper = self.shaper();
        self.tight_layout_with(opts, &shaper)
    }

    /// [`Figure::tight_layout`] with explicit text metrics.
    pub fn tight_layout_with(&mut self, opts: &TightLayout, metrics: &dyn TextMeasure) -> Result<()> {
        self.tight_layout_reserving(opts, metrics, &[])
    }

    /// Tight layout that also keeps the display boxes in `reserved` (one list
    /// per axes, by axes index) clear of the figure edges.
    pub(crate) fn tight_layout_reserving(
        &mut self,
        opts: &TightLayout,
        metrics: &dyn TextMeasure,
        reserved: &[(usize, Bbox)],
    ) -> Result<()> {
        let [rl, rb, rr, rt] = opts.rect;
        if !(0.0..=1.0).contains(&rl) || !(0.0..=1.0).contains(&rr) || !(0.0..=1.0).contains(&rb)
            || !(0.0..=1.0).contains(&rt) || rl >= rr || rb >= rt || !(opts.pad >= 0.0)
        {
            return Err(invalid(format!("invalid tight layout {opts:?}")));
        }

        let mut cells: Vec<(GridCell, Overhang)> = Vec::new();
        for (index, ax) in self.all_axes().iter().enumerate() {
            let Some(cell) = ax.cell else { continue };
            if !ax.visible {
                continue;
            }
            let layout = layout_axes(self, ax, metrics)?;
            let mut bbox = decorated_bbox(self, ax, &layout, metrics);
            for (_, extra) in reserved.iter().filter(|(i, _)| *i == index) {
                bbox = bbox.union(extra);
            }
            let f = layout.frame;
            let hang = Overhang {
                left: (f.x0 - bbox.x0).max(0.0),
                right: (bbox.x1 - f.x1).max(0.0),
                bottom: (f.y0 - bbox.y0).max(0.0),
                top: (bbox.y1 - f.y1).max(0.0),
            };
            cells.push((cell, hang));
        }
        let Some(&(first, _)) = cells.first() else { return Ok(()) };
        let (rows, cols) = (first.rows, first.cols);
        cells.retain(|(c, _)| c.rows == rows && c.cols == cols);

        let style = self.style();
        let pad = opts.pad * style.pt_to_px(f64::from(style.font_size_pt));
        let left_px = widest(&cells, |c| c.col == 0, |h| h.left) + pad;
        let right_px = widest(&cells, |c| c.col + 1 == cols, |h| h.right) + pad;
        let bottom_px = widest(&cells, |c| c.row + 1 == rows, |h| h.bottom) + pad;
        let top_px = widest(&cells, |c| c.row == 0, |h| h.top) + pad;
        let wgap_px = (1..cols)
            .map(|col| widest(&cells, |c| c.col + 1 == col, |h| h.right) + widest(&cells, |c| c.col == col, |h| h.left) + pad)
            .fold(0.0, f64::max);
        let hgap_px = (1..rows)
            .map(|row| widest(&cells, |c| c.row + 1 == row, |h| h.bottom) + widest(&cells, |c| c.row == row, |h| h.top) + pad)
            .fold(0.0, f64::max);

        let (fw, fh) = self.pixel_size();
        let current = self.subplot_params();
        let (left, right) = (rl + left_px / fw, rr - right_px / fw);
        let (bottom, top) = (rb + bottom_px / fh, rt - top_px / fh);
        let (ncols, nrows) = (cols as f64, rows as f64);
        let (wgap, hgap) = (wgap_px / fw, hgap_px / fh);
        let cell_w = (right - left - wgap * (ncols - 1.0)) / ncols;
        let cell_h = (top - bottom - hgap * (nrows - 1.0)) / nrows;
        if !(cell_w > 0.0 && cell_h > 0.0) {
            warn!(rows, cols, "decorations leave no room for the axes, tight layout not applied");
            return Ok(());
        }
        let params = SubplotParams {
            left,
            right,
            bottom,
            top,
            wspace: if cols > 1 { wgap / cell_w } else { current.wspace },
            hspace: if rows > 1 { hgap / cell_h } else { current.hspace },
        };
        debug!(?params, "tight layout");
        self.subplots_adjust(params)
    }
}
