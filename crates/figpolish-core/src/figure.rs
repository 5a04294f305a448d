// File: crates/figpolish-core/src/figure.rs
// Summary: Figure: physical size, owned style, and the axes it contains.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::axes::{Axes, AxesId, GridCell, YSide};
use crate::error::{invalid, Result};
use crate::figsize::FigureDimensions;
use crate::geometry::AxesRect;
use crate::plotting::Colors;
use crate::setup::Style;
use crate::text::TextShaper;

static NEXT_FIGURE: AtomicU64 = AtomicU64::new(1);

/// Spacing of a subplot grid, in figure fractions
/// (`wspace`/`hspace` relative to the average cell size).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubplotParams {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub wspace: f64,
    pub hspace: f64,
}

impl Default for SubplotParams {
    fn default() -> Self {
        Self { left: 0.125, right: 0.9, bottom: 0.11, top: 0.88, wspace: 0.2, hspace: 0.2 }
    }
}

impl SubplotParams {
    fn validate(&self) -> Result<()> {
        let ok = (0.0..=1.0).contains(&self.left)
            && (0.0..=1.0).contains(&self.right)
            && (0.0..=1.0).contains(&self.bottom)
            && (0.0..=1.0).contains(&self.top)
            && self.left < self.right
            && self.bottom < self.top
            && self.wspace >= 0.0
            && self.hspace >= 0.0;
        if ok { Ok(()) } else { Err(invalid(format!("invalid subplot parameters {self:?}"))) }
    }

    fn cell_rect(&self, cell: GridCell) -> AxesRect {
        let (rows, cols) = (cell.rows as f64, cell.cols as f64);
        let cell_w = (self.right - self.left) / (cols + self.wspace * (cols - 1.0));
        let cell_h = (self.top - self.bottom) / (rows + self.hspace * (rows - 1.0));
        let (row, col) = (cell.row as f64, cell.col as f64);
        let left = self.left + col * cell_w * (1.0 + self.wspace);
        let bottom = self.top - (row + 1.0) * cell_h - row * cell_h * self.hspace;
        AxesRect::new(left, bottom, cell_w, cell_h)
    }
}

pub struct Figure {
    id: u64,
    style: Style,
    /// Inches.
    size: FigureDimensions,
    params: SubplotParams,
    axes: Vec<Axes>,
}

impl Figure {
    /// Empty figure sized by the style.
    pub fn new(style: &Style) -> Result<Self> {
        Self::with_size(style, style.figure_dimensions()?)
    }

    /// Empty figure of `size` inches.
    pub fn with_size(style: &Style, size: FigureDimensions) -> Result<Self> {
        style.validate()?;
        if !(size.width > 0.0 && size.height > 0.0 && size.width.is_finite() && size.height.is_finite()) {
            return Err(invalid(format!("figure size must be positive, got {}x{}", size.width, size.height)));
        }
        Ok(Self {
            id: NEXT_FIGURE.fetch_add(1, Ordering::Relaxed),
            style: style.clone(),
            size,
            params: SubplotParams::default(),
            axes: Vec::new(),
        })
    }

    /// Figure with a `rows` x `cols` grid; handles come back in row-major order.
    pub fn subplots(style: &Style, rows: usize, cols: usize) -> Result<(Self, Vec<AxesId>)> {
        let mut fig = Self::new(style)?;
        let ids = fig.add_subplot_grid(rows, cols)?;
        Ok((fig, ids))
    }

    pub fn add_subplot_grid(&mut self, rows: usize, cols: usize) -> Result<Vec<AxesId>> {
        if rows == 0 || cols == 0 {
            return Err(invalid(format!("subplot grid must be non-empty, got {rows}x{cols}")));
        }
        let mut ids = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let cell = GridCell { row, col, rows, cols };
                let id = self.add_axes(self.params.cell_rect(cell));
                self.axes[id.index].cell = Some(cell);
                ids.push(id);
            }
        }
        Ok(ids)
    }

    pub fn add_axes(&mut self, rect: impl Into<AxesRect>) -> AxesId {
        // palette was validated together with the style
        let cycle = Colors::from_style(&self.style).unwrap_or_default();
        self.axes.push(Axes::new(rect.into(), cycle, self.style.line_width_pt));
        AxesId { figure: self.id, index: self.axes.len() - 1 }
    }

    /// Second axes on top of `id` sharing its x range, with the y axis on the right.
    pub fn twinx(&mut self, id: AxesId) -> Result<AxesId> {
        let (rect, x_axis, cell) = {
            let host = self.axes(id)?;
            (host.rect, host.x_axis.clone(), host.cell)
        };
        let twin = self.add_axes(rect);
        let ax = &mut self.axes[twin.index];
        ax.x_axis = x_axis;
        ax.x_axis.label.clear();
        ax.y_side = YSide::Right;
        ax.show_x = false;
        ax.cell = cell;
        Ok(twin)
    }

    /// Re-space every axes created through a subplot grid.
    pub fn subplots_adjust(&mut self, params: SubplotParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        for ax in &mut self.axes {
            if let Some(cell) = ax.cell {
                ax.rect = params.cell_rect(cell);
            }
        }
        Ok(())
    }

    pub fn style(&self) -> &Style { &self.style }
    pub fn size(&self) -> FigureDimensions { self.size }
    pub fn dpi(&self) -> f64 { self.style.dpi }

    /// Size in display pixels.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.size.width * self.style.dpi, self.size.height * self.style.dpi)
    }

    pub fn len(&self) -> usize { self.axes.len() }
    pub fn is_empty(&self) -> bool { self.axes.is_empty() }

    pub fn axes_ids(&self) -> Vec<AxesId> {
        (0..self.axes.len()).map(|index| AxesId { figure: self.id, index }).collect()
    }

    fn resolve(&self, id: AxesId) -> Result<usize> {
        if id.figure != self.id || id.index >= self.axes.len() {
            return Err(invalid(format!("axes handle #{} does not belong to this figure", id.index)));
        }
        Ok(id.index)
    }

    pub fn check_handles(&self, ids: &[AxesId]) -> Result<()> {
        ids.iter().try_for_each(|&id| self.resolve(id).map(|_| ()))
    }

    pub fn axes(&self, id: AxesId) -> Result<&Axes> {
        let i = self.resolve(id)?;
        Ok(&self.axes[i])
    }

    pub fn axes_mut(&mut self, id: AxesId) -> Result<&mut Axes> {
        let i = self.resolve(id)?;
        Ok(&mut self.axes[i])
    }

    pub(crate) fn all_axes(&self) -> &[Axes] { &self.axes }

    /// Current subplot grid spacing.
    pub fn subplot_params(&self) -> SubplotParams { self.params }

    /// Copy that keeps this figure's identity, so existing handles resolve in it.
    pub(crate) fn staged(&self) -> Figure {
        Figure {
            id: self.id,
            style: self.style.clone(),
            size: self.size,
            params: self.params,
            axes: self.axes.clone(),
        }
    }

    /// Shaper with this figure's font family.
    pub fn shaper(&self) -> TextShaper { TextShaper::with_family(self.style.font_family) }
}
