// File: crates/figpolish-core/src/lib.rs
// Summary: Core library entry point; exports the figure model and the publication helpers.

pub mod annotate;
pub mod axes;
pub mod axis;
pub mod caption;
pub mod colorbar;
pub mod colormap;
pub mod embed;
pub mod error;
pub mod figsize;
pub mod figure;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod plotting;
pub mod render;
pub mod scale;
pub mod setup;
pub mod text;
pub mod theme;
pub mod ticks;
pub mod tight;

pub use annotate::{annotate_cloud, annotate_points, draw_bbox, AnnotateOptions, BboxOptions, CloudOptions, PlacedLabel};
pub use axes::{Axes, AxesId, LineStyle, PatchStyle, TextStyle, YSide};
pub use axis::{Axis, LabelPlacement, ScaleKind};
pub use caption::{polish, polish_with, AlphabeticalLabels, CaptionAssignment, CaptionPosition, OverflowPolicy, PerAxes, PolishOptions};
pub use colorbar::{plot_colorbar, ColorbarOptions, Heatmap, Orientation};
pub use colormap::Colormap;
pub use embed::{embed_xlabel, embed_ylabel, XLabelAlign, YLabelAlign};
pub use error::{FigError, Result};
pub use figsize::{figure_size, golden_ratio, set_figsize, DocumentWidth, FigureDimensions};
pub use figure::{Figure, SubplotParams};
pub use format::{format_ticklabels, set_ticks_linear, si_string, AxisSelector, MultipleFormatter, Unit};
pub use plotting::{plot_lines, plot_step, Colors};
pub use setup::{setup, FigSize, FontFamily, SetupOptions, Style, TextMode};
pub use text::{ApproxMetrics, HAlign, TextMeasure, TextShaper, VAlign};
pub use theme::Theme;
pub use tight::TightLayout;
