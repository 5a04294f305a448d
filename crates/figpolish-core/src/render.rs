// File: crates/figpolish-core/src/render.rs
// Summary: Headless PNG rendering of a Figure using Skia CPU raster surfaces.
// Notes:
// - Layout works in display space (y up); everything is flipped to Skia's
//   y-down canvas only at draw time.

use std::path::Path;

use skia_safe as skia;

use crate::axes::{Artist, Axes, AxesKind, Coords, YSide};
use crate::colorbar::{Heatmap, Orientation};
use crate::colormap::Colormap;
use crate::error::{FigError, Result};
use crate::figure::Figure;
use crate::geometry::Bbox;
use crate::layout::{layout_axes, x_label_anchor, y_label_anchor, AxesLayout, LabelAnchor};
use crate::scale::ScaleTransform;
use crate::setup::Style;
use crate::text::{HAlign, TextShaper, VAlign};
use crate::theme::Theme;

/// Steps used to draw a colorbar gradient.
const GRADIENT_STEPS: usize = 256;

impl Figure {
    /// Render the figure to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(&self, output_png_path: impl AsRef<Path>) -> Result<()> {
        let data = self.render_to_png_bytes()?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, data)?;
        Ok(())
    }

    /// Render the figure and return the encoded PNG.
    pub fn render_to_png_bytes(&self) -> Result<Vec<u8>> {
        let (w, h) = self.pixel_size();
        let (w, h) = (w.round().max(1.0) as i32, h.round().max(1.0) as i32);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| FigError::Render("failed to create raster surface".to_string()))?;
        let shaper = self.shaper();
        let theme = self.style().theme();
        {
            let canvas = surface.canvas();
            canvas.clear(theme.background);
            let painter = Painter { canvas, shaper: &shaper, theme, style: self.style(), height: f64::from(h) };
            for ax in self.all_axes().iter().filter(|a| a.visible) {
                let layout = layout_axes(self, ax, &shaper)?;
                painter.draw_axes(ax, &layout);
            }
        }

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| FigError::Render("encode PNG failed".to_string()))?;
        Ok(data.as_bytes().to_vec())
    }
}

// ---- helpers ----------------------------------------------------------------

struct Painter<'a> {
    canvas: &'a skia::Canvas,
    shaper: &'a TextShaper,
    theme: Theme,
    style: &'a Style,
    /// Canvas height, for flipping y.
    height: f64,
}

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

fn fill(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

impl Painter<'_> {
    fn pt(&self, x: f64, y: f64) -> (f32, f32) { (x as f32, (self.height - y) as f32) }

    fn px(&self, pt: f64) -> f32 { self.style.pt_to_px(pt) as f32 }

    fn rect(&self, b: &Bbox) -> skia::Rect {
        let (l, t) = self.pt(b.x0, b.y1);
        let (r, bottom) = self.pt(b.x1, b.y0);
        skia::Rect::from_ltrb(l, t, r, bottom)
    }

    /// Data point of `ax` -> display.
    fn data(&self, ax: &Axes, layout: &AxesLayout, x: f64, y: f64) -> (f64, f64) {
        let (fx, fy) = ax.to_axes_fraction(x, y);
        layout.to_display(fx, fy)
    }

    #[allow(clippy::too_many_arguments)]
    fn text(&self, text: &str, x: f64, y: f64, size_px: f64, color: skia::Color, ha: HAlign, va: VAlign, rotation: f32) {
        let (cx, cy) = self.pt(x, y);
        self.shaper.draw_aligned(self.canvas, text, cx, cy, size_px as f32, color, ha, va, rotation);
    }

    fn draw_axes(&self, ax: &Axes, layout: &AxesLayout) {
        let frame = self.rect(&layout.frame);
        self.canvas.draw_rect(frame, &fill(self.theme.axes_background));

        self.canvas.save();
        self.canvas.clip_rect(frame, skia::ClipOp::Intersect, true);
        if let AxesKind::Colorbar { colormap, orientation, alpha } = &ax.kind {
            self.draw_gradient(layout, *colormap, *orientation, *alpha);
        }
        for artist in &ax.artists {
            self.draw_artist(ax, layout, artist);
        }
        self.canvas.restore();

        self.canvas.draw_rect(frame, &stroke(self.theme.spine, self.px(0.8)));
        self.draw_ticks(ax, layout);
        self.draw_labels(ax, layout);

        // texts may sit outside the frame (captions)
        for t in ax.texts() {
            let (x, y) = match t.coords {
                Coords::Data => self.data(ax, layout, t.x, t.y),
                Coords::Axes => layout.to_display(t.x, t.y),
            };
            let size = self.style.pt_to_px(f64::from(t.style.size_pt.unwrap_or(self.style.font_size_pt)));
            let color = t.style.color.unwrap_or(self.theme.text);
            self.text(&t.text, x, y, size, color, t.style.ha, t.style.va, t.style.rotation);
        }
    }

    fn draw_artist(&self, ax: &Axes, layout: &AxesLayout, artist: &Artist) {
        match artist {
            Artist::Line(line) => {
                let mut path = skia::Path::new();
                let mut pen_down = false;
                for (&x, &y) in line.xs.iter().zip(&line.ys) {
                    if !x.is_finite() || !y.is_finite() {
                        pen_down = false;
                        continue;
                    }
                    let (dx, dy) = self.data(ax, layout, x, y);
                    let p = self.pt(dx, dy);
                    if pen_down { path.line_to(p); } else { path.move_to(p); }
                    pen_down = true;
                }
                self.canvas.draw_path(&path, &stroke(line.color, self.px(f64::from(line.width_pt))));
            }
            Artist::Markers(m) => {
                let paint = fill(m.color);
                let r = self.px(f64::from(m.size_pt)) * 0.5;
                for (&x, &y) in m.xs.iter().zip(&m.ys) {
                    if !x.is_finite() || !y.is_finite() { continue; }
                    let (dx, dy) = self.data(ax, layout, x, y);
                    self.canvas.draw_circle(self.pt(dx, dy), r, &paint);
                }
            }
            Artist::Collection(coll) => {
                let width = self.px(f64::from(coll.width_pt));
                for (seg, &color) in coll.segments.iter().zip(&coll.colors) {
                    let (ax0, ay0) = self.data(ax, layout, seg[0].0, seg[0].1);
                    let (ax1, ay1) = self.data(ax, layout, seg[1].0, seg[1].1);
                    self.canvas.draw_line(self.pt(ax0, ay0), self.pt(ax1, ay1), &stroke(color, width));
                }
            }
            Artist::Rect(r) => {
                let (x0, y0) = self.data(ax, layout, r.x, r.y);
                let (x1, y1) = self.data(ax, layout, r.x + r.width, r.y + r.height);
                let rect = self.rect(&Bbox::from_extents(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)));
                if let Some(f) = r.style.fill {
                    self.canvas.draw_rect(rect, &fill(f));
                }
                let edge = r.style.edge.unwrap_or(self.theme.patch_edge);
                self.canvas.draw_rect(rect, &stroke(edge, self.px(f64::from(r.style.line_width_pt))));
            }
            Artist::Image(heat) => self.draw_heatmap(ax, layout, heat),
            // drawn unclipped after the frame
            Artist::Text(_) => {}
        }
    }

    fn draw_heatmap(&self, ax: &Axes, layout: &AxesLayout, heat: &Heatmap) {
        for (r, row) in heat.rows().iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                let (x, y) = (c as f64, r as f64);
                let (x0, y0) = self.data(ax, layout, x - 0.5, y - 0.5);
                let (x1, y1) = self.data(ax, layout, x + 0.5, y + 0.5);
                let cell = Bbox::from_extents(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1));
                let t = if v.is_finite() { heat.normalize(v) } else { f64::NAN };
                self.canvas.draw_rect(self.rect(&cell), &fill(heat.colormap.color(t, heat.alpha)));
            }
        }
    }

    fn draw_gradient(&self, layout: &AxesLayout, cmap: Colormap, orientation: Orientation, alpha: f64) {
        let f = layout.frame;
        for i in 0..GRADIENT_STEPS {
            let (a, b) = (i as f64 / GRADIENT_STEPS as f64, (i + 1) as f64 / GRADIENT_STEPS as f64);
            let strip = match orientation {
                Orientation::Horizontal => Bbox::from_extents(f.x0 + a * f.width(), f.y0, f.x0 + b * f.width(), f.y1),
                Orientation::Vertical => Bbox::from_extents(f.x0, f.y0 + a * f.height(), f.x1, f.y0 + b * f.height()),
            };
            let t = (i as f64 + 0.5) / GRADIENT_STEPS as f64;
            self.canvas.draw_rect(self.rect(&strip), &fill(cmap.color(t, alpha)));
        }
    }

    fn draw_ticks(&self, ax: &Axes, layout: &AxesLayout) {
        let f = layout.frame;
        let major = stroke(self.theme.tick, self.px(0.8));
        let minor = stroke(self.theme.tick, self.px(0.6));
        let major_len = layout.tick_len_px;
        let minor_len = self.style.pt_to_px(self.style.minor_tick_length_pt);

        if ax.show_x {
            let scale = ax.x_axis.scale();
            let ticks = layout.x_ticks.iter().filter(|t| t.in_limits).map(|t| (t.position, major_len, &major));
            let minors = ax.x_axis.minor_positions().into_iter().map(|p| (p, minor_len, &minor));
            for (pos, len, paint) in ticks.chain(minors) {
                let x = f.x0 + scale.to_fraction(pos) * f.width();
                self.canvas.draw_line(self.pt(x, f.y0), self.pt(x, f.y0 - len), paint);
            }
            for t in layout.visible_x_ticks() {
                let (cx, cy) = t.bbox.center();
                self.text(&t.label, cx, cy, layout.tick_font_px, self.theme.text, HAlign::Center, VAlign::Center, 0.0);
            }
        }

        if ax.show_y {
            let scale = ax.y_axis.scale();
            let (edge, dir) = match ax.y_side {
                YSide::Left => (f.x0, -1.0),
                YSide::Right => (f.x1, 1.0),
            };
            let ticks = layout.y_ticks.iter().filter(|t| t.in_limits).map(|t| (t.position, major_len, &major));
            let minors = ax.y_axis.minor_positions().into_iter().map(|p| (p, minor_len, &minor));
            for (pos, len, paint) in ticks.chain(minors) {
                let y = f.y0 + scale.to_fraction(pos) * f.height();
                self.canvas.draw_line(self.pt(edge, y), self.pt(edge + dir * len, y), paint);
            }
            for t in layout.visible_y_ticks() {
                let (cx, cy) = t.bbox.center();
                self.text(&t.label, cx, cy, layout.tick_font_px, self.theme.text, HAlign::Center, VAlign::Center, 0.0);
            }
        }
    }

    fn draw_label(&self, label: &str, a: LabelAnchor, size_px: f64) {
        self.text(label, a.x, a.y, size_px, self.theme.text, a.ha, a.va, a.rotation);
    }

    fn draw_labels(&self, ax: &Axes, layout: &AxesLayout) {
        if ax.show_x && !ax.x_axis.label.is_empty() {
            self.draw_label(&ax.x_axis.label, x_label_anchor(layout, &ax.x_axis), layout.font_px);
        }
        if ax.show_y && !ax.y_axis.label.is_empty() {
            self.draw_label(&ax.y_axis.label, y_label_anchor(layout, &ax.y_axis, ax.y_side), layout.font_px);
        }
        if !ax.title.is_empty() {
            let size = self.style.pt_to_px(f64::from(self.style.title_size_pt));
            let (cx, _) = layout.frame.center();
            let y = layout.frame.y1 + 1.5 * layout.tick_pad_px;
            self.text(&ax.title, cx, y, size, self.theme.text, HAlign::Center, VAlign::Bottom, 0.0);
        }
    }
}
