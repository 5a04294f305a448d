// File: crates/figpolish-core/src/figsize.rs
// Summary: Physical figure sizing for inclusion in typeset documents.
// Notes:
// - Put `\showthe\textwidth` in the LaTeX document and read the log to get the
//   text width in points; a figure sized from that width needs no rescaling.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{invalid, Result};

/// Default text width of a KOMA-Script (scr) document, in pt.
pub const WIDTH_PT_SCR: f64 = 418.25555;
/// Default text width of a beamer document, in pt.
pub const WIDTH_PT_BMR: f64 = 302.0;
/// TeX points per inch are 72.27, not 72.
pub const INCHES_PER_PT: f64 = 1.0 / 72.27;

/// (sqrt(5) - 1) / 2
pub fn golden_ratio() -> f64 { (5f64.sqrt() - 1.0) / 2.0 }

/// Width and height in one physical unit (whatever the input used).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureDimensions {
    pub width: f64,
    pub height: f64,
}

impl FigureDimensions {
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }
}

impl From<FigureDimensions> for (f64, f64) {
    fn from(d: FigureDimensions) -> Self { (d.width, d.height) }
}

fn positive(name: &str, v: f64) -> Result<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(invalid(format!("{name} must be a positive finite number, got {v}")))
    }
}

/// `width = target_width * scale`, `height = width * aspect_ratio`.
pub fn figure_size(target_width: f64, aspect_ratio: f64, scale: f64) -> Result<FigureDimensions> {
    let width = positive("target width", target_width)? * positive("scale", scale)?;
    let height = width * positive("aspect ratio", aspect_ratio)?;
    Ok(FigureDimensions { width, height })
}

/// Text width of the target document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentWidth {
    #[default]
    Thesis,
    Beamer,
    Points(f64),
}

impl DocumentWidth {
    pub fn points(&self) -> f64 {
        match *self {
            DocumentWidth::Thesis => WIDTH_PT_SCR,
            DocumentWidth::Beamer => WIDTH_PT_BMR,
            DocumentWidth::Points(pt) => pt,
        }
    }
}

impl FromStr for DocumentWidth {
    type Err = crate::FigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thesis" => Ok(DocumentWidth::Thesis),
            "beamer" => Ok(DocumentWidth::Beamer),
            other => other
                .parse::<f64>()
                .map(DocumentWidth::Points)
                .map_err(|_| invalid(format!("unknown document width '{s}'"))),
        }
    }
}

/// Figure size in inches for a document of the given text width.
///
/// `fraction` is the share of the text width the figure occupies and
/// `subplots` the (rows, cols) grid, which scales the golden-ratio height.
pub fn set_figsize(width: DocumentWidth, fraction: f64, subplots: (u32, u32)) -> Result<FigureDimensions> {
    let (rows, cols) = subplots;
    if rows == 0 || cols == 0 {
        return Err(invalid(format!("subplot grid must be non-empty, got {rows}x{cols}")));
    }
    let width_pt = positive("document width", width.points())?;
    let fig_width_pt = width_pt * positive("fraction", fraction)?;
    let fig_width_in = fig_width_pt * INCHES_PER_PT;
    let fig_height_in = fig_width_in * golden_ratio() * (rows as f64 / cols as f64);
    Ok(FigureDimensions::new(fig_width_in, fig_height_in))
}
