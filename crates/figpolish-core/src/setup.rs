// File: crates/figpolish-core/src/setup.rs
// Summary: Explicit style configuration (replaces process-wide plotting defaults).
// Notes:
// - A `Style` is a plain value. Every `Figure` owns a copy, so changing one
//   style never affects figures that were already created.
// - Style sheets are TOML files whose keys mirror the `Style` fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skia_safe as skia;
use tracing::debug;

use crate::error::{invalid, Result};
use crate::figsize::{set_figsize, DocumentWidth, FigureDimensions};
use crate::theme::{self, parse_color, Theme};

/// Default color cycle: high contrast on white paper.
pub const COLORS: [&str; 8] = ["blue", "rgb(1, 0.5, 0)", "green", "darkred", "cyan", "orangered", "purple", "lime"];

/// How text produced by the helpers is marked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextMode {
    /// Unicode text, e.g. `3π/2`.
    Plain,
    /// TeX math, e.g. `$\frac{3\pi}{2}$`.
    Tex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    Serif,
    SansSerif,
    Monospace,
}

/// Figure size either derived from a document width or given in inches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FigSize {
    Document { width: DocumentWidth, fraction: f64 },
    Inches { width: f64, height: f64 },
}

impl Default for FigSize {
    fn default() -> Self { FigSize::Document { width: DocumentWidth::Thesis, fraction: 1.0 } }
}

impl FigSize {
    pub fn dimensions(&self) -> Result<FigureDimensions> {
        match *self {
            FigSize::Document { width, fraction } => set_figsize(width, fraction, (1, 1)),
            FigSize::Inches { width, height } => {
                if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
                    Ok(FigureDimensions::new(width, height))
                } else {
                    Err(invalid(format!("figure size must be positive, got {width}x{height}")))
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Emit TeX markup and use a TeX-like serif font.
    pub use_tex: bool,
    pub figsize: FigSize,
    /// Pixels per inch used when rasterizing.
    pub dpi: f64,
    pub font_family: FontFamily,
    pub font_size_pt: f32,
    pub tick_label_size_pt: f32,
    pub title_size_pt: f32,
    pub tick_pad_pt: f64,
    pub tick_length_pt: f64,
    pub minor_tick_length_pt: f64,
    pub line_width_pt: f32,
    /// Color cycle for lines (see [`parse_color`] for accepted forms).
    pub colors: Vec<String>,
    /// Name of a [`Theme`] preset.
    pub theme: String,
    pub latex_preamble: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            use_tex: false,
            figsize: FigSize::default(),
            dpi: 100.0,
            font_family: FontFamily::SansSerif,
            font_size_pt: 10.0,
            tick_label_size_pt: 9.0,
            title_size_pt: 11.0,
            tick_pad_pt: 3.5,
            tick_length_pt: 3.5,
            minor_tick_length_pt: 2.0,
            line_width_pt: 1.5,
            colors: COLORS.iter().map(|c| c.to_string()).collect(),
            theme: "paper".to_string(),
            latex_preamble: String::new(),
        }
    }
}

impl Style {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let style: Style = toml::from_str(src)?;
        style.validate()?;
        Ok(style)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let src = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loading style sheet");
        Self::from_toml_str(&src)
    }

    /// Check the fields that later calls rely on.
    pub fn validate(&self) -> Result<()> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(invalid(format!("dpi must be positive, got {}", self.dpi)));
        }
        for (name, v) in [
            ("font_size_pt", self.font_size_pt),
            ("tick_label_size_pt", self.tick_label_size_pt),
            ("title_size_pt", self.title_size_pt),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {v}")));
            }
        }
        if self.colors.is_empty() {
            return Err(invalid("color cycle must not be empty"));
        }
        self.palette()?;
        self.figsize.dimensions()?;
        Ok(())
    }

    pub fn text_mode(&self) -> TextMode {
        if self.use_tex { TextMode::Tex } else { TextMode::Plain }
    }

    pub fn theme(&self) -> Theme { theme::find(&self.theme) }

    pub fn palette(&self) -> Result<Vec<skia::Color>> {
        self.colors.iter().map(|c| parse_color(c)).collect()
    }

    pub fn figure_dimensions(&self) -> Result<FigureDimensions> { self.figsize.dimensions() }

    /// Convert typographic points to pixels at this style's dpi.
    pub fn pt_to_px(&self, pt: f64) -> f64 { pt * self.dpi / 72.0 }
}

/// Options accepted by [`setup`].
#[derive(Clone, Debug, Default)]
pub struct SetupOptions {
    pub use_tex: bool,
    pub figsize: Option<FigSize>,
    pub colors: Option<Vec<String>>,
    /// TOML style sheet applied before the overrides above.
    pub style_sheet: Option<PathBuf>,
}

impl SetupOptions {
    pub fn tex() -> Self { Self { use_tex: true, ..Self::default() } }
}

/// Build the style every subsequent figure should be created with.
///
/// With `use_tex` the text switches to a serif family and the siunitx package
/// is added to the preamble; without it the font goes back to sans-serif.
pub fn setup(opts: SetupOptions) -> Result<Style> {
    let mut style = match &opts.style_sheet {
        Some(path) => Style::load(path)?,
        None => Style::default(),
    };
    if let Some(figsize) = opts.figsize {
        style.figsize = figsize;
    }
    if let Some(colors) = opts.colors {
        style.colors = colors;
    }
    style.use_tex = opts.use_tex;
    if opts.use_tex {
        style.font_family = FontFamily::Serif;
        style.latex_preamble = r"\usepackage{siunitx}".to_string();
    } else {
        style.font_family = FontFamily::SansSerif;
    }
    style.validate()?;
    debug!(use_tex = style.use_tex, theme = %style.theme, "style configured");
    Ok(style)
}
