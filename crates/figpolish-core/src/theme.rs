// File: crates/figpolish-core/src/theme.rs
// Summary: Figure color themes and color-name parsing.

use skia_safe as skia;

use crate::error::{invalid, Result};

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub axes_background: skia::Color,
    pub spine: skia::Color,
    pub tick: skia::Color,
    pub text: skia::Color,
    pub patch_edge: skia::Color,
}

impl Theme {
    /// White paper, black ink; the default for documents.
    pub fn paper() -> Self {
        Self {
            name: "paper",
            background: skia::Color::from_argb(255, 255, 255, 255),
            axes_background: skia::Color::from_argb(255, 255, 255, 255),
            spine: skia::Color::from_argb(255, 0, 0, 0),
            tick: skia::Color::from_argb(255, 0, 0, 0),
            text: skia::Color::from_argb(255, 0, 0, 0),
            patch_edge: skia::Color::from_argb(255, 80, 80, 80),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            axes_background: skia::Color::from_argb(255, 255, 255, 255),
            spine: skia::Color::from_argb(255, 60, 60, 70),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            text: skia::Color::from_argb(255, 20, 20, 30),
            patch_edge: skia::Color::from_argb(255, 100, 100, 110),
        }
    }

    /// Slides with a dark background.
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            axes_background: skia::Color::from_argb(255, 24, 24, 28),
            spine: skia::Color::from_argb(255, 180, 180, 190),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            text: skia::Color::from_argb(255, 235, 235, 245),
            patch_edge: skia::Color::from_argb(255, 200, 200, 210),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::paper(), Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to paper.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::paper()
}

const NAMED: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("red", (255, 0, 0)),
    ("blue", (0, 0, 255)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("orange", (255, 165, 0)),
    ("darkred", (139, 0, 0)),
    ("orangered", (255, 69, 0)),
    ("purple", (128, 0, 128)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("brown", (165, 42, 42)),
];

/// Parse a named color, `#rrggbb`, `#rrggbbaa` or `rgb(r, g, b)` with components in [0, 1].
pub fn parse_color(spec: &str) -> Result<skia::Color> {
    let s = spec.trim();
    if let Some(hex) = s.strip_prefix('#') {
        let byte = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| invalid(format!("bad hex color '{spec}'")))
        };
        return match hex.len() {
            6 => Ok(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
            _ => Err(invalid(format!("bad hex color '{spec}'"))),
        };
    }
    if let Some(body) = s.strip_prefix("rgb(").and_then(|b| b.strip_suffix(')')) {
        let parts = body
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid(format!("bad rgb color '{spec}'")))?;
        if parts.len() != 3 || parts.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(invalid(format!("bad rgb color '{spec}'")));
        }
        let c = |v: f64| (v * 255.0).round() as u8;
        return Ok(skia::Color::from_argb(255, c(parts[0]), c(parts[1]), c(parts[2])));
    }
    NAMED
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|(_, (r, g, b))| skia::Color::from_argb(255, *r, *g, *b))
        .ok_or_else(|| invalid(format!("unknown color '{spec}'")))
}
