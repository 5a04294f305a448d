// File: crates/figpolish-core/src/annotate.rs
// Summary: Text and box annotations for groups of points.

use tracing::debug;

use crate::axes::{Axes, AxesId, PatchStyle, Rectangle, TextStyle};
use crate::axis::ScaleKind;
use crate::error::{invalid, Result};
use crate::figure::Figure;
use crate::geometry::Bbox;
use crate::layout::anchored_box;
use crate::text::{HAlign, TextMeasure, VAlign};

fn extent(values: &[f64], what: &str) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(invalid(format!("{what} must not be empty")));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(invalid(format!("{what} contains non-finite values")));
    }
    Ok(values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

fn same_len(xs: &[f64], ys: &[f64]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(invalid(format!("x and y must have the same length ({} vs {})", xs.len(), ys.len())));
    }
    Ok(())
}

/// Display box of a text artist anchored at data point (`x`, `y`).
fn text_box(fig: &Figure, ax: &Axes, x: f64, y: f64, text: &str, style: &TextStyle, metrics: &dyn TextMeasure) -> Bbox {
    let (fw, fh) = fig.pixel_size();
    let frame = ax.rect.to_display(fw, fh);
    let (fx, fy) = ax.to_axes_fraction(x, y);
    let size_pt = style.size_pt.unwrap_or(fig.style().font_size_pt);
    let (w, h) = metrics.measure(text, fig.style().pt_to_px(f64::from(size_pt)));
    anchored_box(frame.x0 + fx * frame.width(), frame.y0 + fy * frame.height(), w, h, style.ha, style.va)
}

/// Display box -> data-space corners of `ax`.
fn box_to_data(fig: &Figure, ax: &Axes, b: &Bbox) -> Vec<(f64, f64)> {
    let (fw, fh) = fig.pixel_size();
    let frame = ax.rect.to_display(fw, fh);
    b.corners()
        .iter()
        .map(|&(x, y)| ax.from_axes_fraction((x - frame.x0) / frame.width(), (y - frame.y0) / frame.height()))
        .collect()
}

#[derive(Clone, Debug)]
pub struct AnnotateOptions {
    /// Offset from the group, as a fraction of the largest y value.
    pub yoffset: f64,
    /// Anchor at the group's left edge, center or right edge.
    pub align: HAlign,
    /// Put the text under the group instead of above.
    pub below: bool,
    pub style: TextStyle,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self { yoffset: 0.03, align: HAlign::Center, below: false, style: TextStyle::default() }
    }
}

/// Write `text` above (or below) the points `(xs, ys)` and grow the data
/// limits so the text stays inside the view.
pub fn annotate_points(fig: &mut Figure, id: AxesId, text: &str, xs: &[f64], ys: &[f64], opts: &AnnotateOptions) -> Result<()> {
    let shaper = fig.shaper();
    annotate_points_with(fig, id, text, xs, ys, opts, &shaper)
}

pub fn annotate_points_with(
    fig: &mut Figure,
    id: AxesId,
    text: &str,
    xs: &[f64],
    ys: &[f64],
    opts: &AnnotateOptions,
    metrics: &dyn TextMeasure,
) -> Result<()> {
    same_len(xs, ys)?;
    let (xmin, xmax) = extent(xs, "x")?;
    let (ymin, ymax) = extent(ys, "y")?;
    let xpos = match opts.align {
        HAlign::Left => xmin,
        HAlign::Center => (xmin + xmax) / 2.0,
        HAlign::Right => xmax,
    };
    let ypos = if opts.below { ymin - opts.yoffset * ymax } else { ymax + opts.yoffset * ymax };

    let corners = {
        let ax = fig.axes(id)?;
        let b = text_box(fig, ax, xpos, ypos, text, &opts.style, metrics);
        box_to_data(fig, ax, &b)
    };
    let ax = fig.axes_mut(id)?;
    ax.text(xpos, ypos, text, opts.style.clone());
    ax.update_datalim(corners);
    ax.autoscale_view();
    Ok(())
}

#[derive(Clone, Copy, Debug)]
pub struct BboxOptions {
    /// Horizontal margin in data units (relative to `xmin` on a log axis).
    pub xbuffer: f64,
    pub ybuffer: f64,
    pub style: PatchStyle,
}

impl Default for BboxOptions {
    fn default() -> Self { Self { xbuffer: 0.01, ybuffer: 0.05, style: PatchStyle::default() } }
}

/// Margins (below, above) around `[lo, hi]`; on a log axis the two margins
/// are equal in log space.
fn margins(lo: f64, hi: f64, buffer: f64, kind: ScaleKind) -> Result<(f64, f64)> {
    match kind {
        ScaleKind::Linear => Ok((buffer, buffer)),
        ScaleKind::Log10 => {
            let below = buffer * lo;
            if !(lo > 0.0 && lo - below > 0.0) {
                return Err(invalid(format!("cannot buffer [{lo}, {hi}] by {buffer} on a log axis")));
            }
            Ok((below, hi * below / (lo - below)))
        }
    }
}

/// Draw a rectangle around the points `(xs, ys)`. A single point draws nothing.
pub fn draw_bbox(ax: &mut Axes, xs: &[f64], ys: &[f64], opts: &BboxOptions) -> Result<()> {
    same_len(xs, ys)?;
    let (xmin, xmax) = extent(xs, "x")?;
    let (ymin, ymax) = extent(ys, "y")?;
    if xs.len() == 1 {
        return Ok(());
    }
    let (xl, xr) = margins(xmin, xmax, opts.xbuffer, ax.x_axis.kind)?;
    let (yb, yt) = margins(ymin, ymax, opts.ybuffer, ax.y_axis.kind)?;
    ax.add_patch(Rectangle {
        x: xmin - xl,
        y: ymin - yb,
        width: (xmax - xmin) + xl + xr,
        height: (ymax - ymin) + yb + yt,
        style: opts.style,
    });
    Ok(())
}

#[derive(Clone, Debug)]
pub struct CloudOptions {
    /// Label offset from its point, in axes fractions.
    pub offset: (f64, f64),
    pub style: TextStyle,
}

impl Default for CloudOptions {
    fn default() -> Self { Self { offset: (0.01, 0.01), style: TextStyle::default() } }
}

/// Where one cloud label ended up.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLabel {
    /// Data coordinates of the text anchor.
    pub anchor: (f64, f64),
    /// Display box.
    pub bbox: Bbox,
    /// A flipped offset was used instead of the configured one.
    pub flipped: bool,
}

/// Label every point of a cloud, offset from its point.
///
/// The configured offset is flipped horizontally and/or vertically when the
/// label would overlap one placed before it. Best effort: when every
/// direction collides the configured offset is kept.
pub fn annotate_cloud<S: AsRef<str>>(
    fig: &mut Figure,
    id: AxesId,
    points: &[(f64, f64)],
    labels: &[S],
    opts: &CloudOptions,
) -> Result<Vec<PlacedLabel>> {
    let shaper = fig.shaper();
    annotate_cloud_with(fig, id, points, labels, opts, &shaper)
}

pub fn annotate_cloud_with<S: AsRef<str>>(
    fig: &mut Figure,
    id: AxesId,
    points: &[(f64, f64)],
    labels: &[S],
    opts: &CloudOptions,
    metrics: &dyn TextMeasure,
) -> Result<Vec<PlacedLabel>> {
    if points.len() != labels.len() {
        return Err(invalid(format!("{} points but {} labels", points.len(), labels.len())));
    }
    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(invalid("point cloud contains non-finite coordinates"));
    }
    let (dx, dy) = opts.offset;
    let candidates = [(dx, dy), (dx, -dy), (-dx, dy), (-dx, -dy)];

    let mut placed: Vec<PlacedLabel> = Vec::with_capacity(points.len());
    let mut texts = Vec::with_capacity(points.len());
    {
        let ax = fig.axes(id)?;
        for (&(x, y), label) in points.iter().zip(labels) {
            let label = label.as_ref();
            let (fx, fy) = ax.to_axes_fraction(x, y);
            let place = |(ox, oy): (f64, f64)| {
                let mut style = opts.style.clone();
                style.ha = if ox >= 0.0 { HAlign::Left } else { HAlign::Right };
                style.va = if oy >= 0.0 { VAlign::Bottom } else { VAlign::Top };
                let anchor = ax.from_axes_fraction(fx + ox, fy + oy);
                let bbox = text_box(fig, ax, anchor.0, anchor.1, label, &style, metrics);
                (anchor, bbox, style)
            };
            let free = |b: &Bbox| placed.iter().all(|p| !p.bbox.overlaps(b));
            let (k, (anchor, bbox, style)) = candidates
                .iter()
                .map(|&c| place(c))
                .enumerate()
                .find(|(_, (_, b, _))| free(b))
                .unwrap_or_else(|| (0, place(candidates[0])));
            let flipped = k != 0;
            if flipped {
                debug!(label, "flipped cloud label offset");
            }
            texts.push((anchor, label.to_string(), style));
            placed.push(PlacedLabel { anchor, bbox, flipped });
        }
    }

    let ax = fig.axes_mut(id)?;
    for ((x, y), text, style) in texts {
        ax.text(x, y, text, style);
    }
    Ok(placed)
}
