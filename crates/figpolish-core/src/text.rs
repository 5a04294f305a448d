// File: crates/figpolish-core/src/text.rs
// Summary: Text measurement/drawing with Skia textlayout, plus TeX-to-Unicode flattening.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use crate::setup::FontFamily;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Anything that can tell the extent of a piece of text.
///
/// Returns `(width, height)` in pixels for text drawn at `size_px`.
pub trait TextMeasure {
    fn measure(&self, text: &str, size_px: f64) -> (f64, f64);
}

/// Font-free estimate: every glyph is `advance * size` wide, lines are `size` tall.
/// Deterministic across platforms, used for layout in tests and headless runs.
#[derive(Clone, Copy, Debug)]
pub struct ApproxMetrics {
    pub advance: f64,
}

impl Default for ApproxMetrics {
    fn default() -> Self { Self { advance: 0.6 } }
}

impl TextMeasure for ApproxMetrics {
    fn measure(&self, text: &str, size_px: f64) -> (f64, f64) {
        let plain = plain_text(text);
        let n = plain.chars().count() as f64;
        (n * self.advance * size_px, if plain.is_empty() { 0.0 } else { size_px })
    }
}

pub struct TextShaper {
    fonts: FontCollection,
    family: FontFamily,
}

impl TextShaper {
    pub fn new() -> Self { Self::with_family(FontFamily::SansSerif) }

    pub fn with_family(family: FontFamily) -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc, family }
    }

    fn families(&self) -> &'static [&'static str] {
        match self.family {
            FontFamily::Serif => &["Latin Modern Roman", "CMU Serif", "Computer Modern", "DejaVu Serif", "Times New Roman", "serif"],
            FontFamily::SansSerif => &["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"],
            FontFamily::Monospace => &["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"],
        }
    }

    fn make_style(&self, size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(self.families());
        ts
    }

    /// Lay out already-flattened text.
    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = self.make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Draw `text` anchored at (`x`, `y`) in canvas coordinates (y down),
    /// aligned around the anchor and rotated counter-clockwise by `rotation` degrees.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_aligned(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
        ha: HAlign,
        va: VAlign,
        rotation: f32,
    ) {
        let plain = plain_text(text);
        if plain.is_empty() { return; }
        let mut p = self.layout(&plain, size, color);
        let w = p.longest_line();
        let h = p.height();
        let dx = match ha { HAlign::Left => 0.0, HAlign::Center => -w * 0.5, HAlign::Right => -w };
        let dy = match va { VAlign::Top => 0.0, VAlign::Center => -h * 0.5, VAlign::Bottom => -h };
        canvas.save();
        canvas.translate((x, y));
        if rotation != 0.0 {
            canvas.rotate(-rotation, None);
        }
        p.paint(canvas, (dx, dy));
        canvas.restore();
    }
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextMeasure for TextShaper {
    fn measure(&self, text: &str, size_px: f64) -> (f64, f64) {
        let plain = plain_text(text);
        if plain.is_empty() { return (0.0, 0.0); }
        let p = self.layout(&plain, size_px as f32, skia::Color::from_argb(0, 0, 0, 0));
        // width of the longest line
        (p.longest_line() as f64, p.height() as f64)
    }
}

fn symbol(name: &str) -> Option<&'static str> {
    Some(match name {
        "pi" => "π",
        "Pi" => "Π",
        "tau" => "τ",
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "Delta" => "Δ",
        "epsilon" => "ε",
        "theta" => "θ",
        "lambda" => "λ",
        "mu" | "micro" => "µ",
        "sigma" => "σ",
        "phi" => "φ",
        "omega" => "ω",
        "Omega" => "Ω",
        "hbar" => "ħ",
        "cdot" => "·",
        "times" => "×",
        "degree" => "°",
        "percent" => "%",
        "second" => "s",
        "milli" => "m",
        "nano" => "n",
        "kilo" => "k",
        _ => return None,
    })
}

fn superscript(c: char) -> char {
    match c {
        '0' => '⁰', '1' => '¹', '2' => '²', '3' => '³', '4' => '⁴',
        '5' => '⁵', '6' => '⁶', '7' => '⁷', '8' => '⁸', '9' => '⁹',
        '-' => '⁻', '+' => '⁺',
        other => other,
    }
}

/// Read a `{...}` group (or a single char) starting at `chars[*i]`.
fn group(chars: &[char], i: &mut usize) -> String {
    while *i < chars.len() && chars[*i] == ' ' { *i += 1; }
    if *i >= chars.len() { return String::new(); }
    if chars[*i] != '{' {
        let c = chars[*i];
        *i += 1;
        return flatten(&[c]);
    }
    let mut depth = 0usize;
    let start = *i + 1;
    while *i < chars.len() {
        match chars[*i] {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let inner = flatten(&chars[start..*i]);
                    *i += 1;
                    return inner;
                }
            }
            _ => {}
        }
        *i += 1;
    }
    flatten(&chars[start.min(chars.len())..])
}

fn flatten(chars: &[char]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '$' | '{' | '}' => i += 1,
            '^' => {
                i += 1;
                out.extend(group(chars, &mut i).chars().map(superscript));
            }
            '_' => {
                i += 1;
                out.push_str(&group(chars, &mut i));
            }
            '\\' => {
                i += 1;
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphabetic() { i += 1; }
                let name: String = chars[start..i].iter().collect();
                if name.is_empty() {
                    // control symbol: \, \; \! \% ...
                    if let Some(&s) = chars.get(i) {
                        match s {
                            ',' | ';' | ' ' => out.push(' '),
                            '!' => {}
                            other => out.push(other),
                        }
                        i += 1;
                    }
                    continue;
                }
                match name.as_str() {
                    "frac" => {
                        let num = group(chars, &mut i);
                        let den = group(chars, &mut i);
                        out.push_str(&num);
                        out.push('/');
                        out.push_str(&den);
                    }
                    "SI" => {
                        let value = group(chars, &mut i);
                        let unit = group(chars, &mut i);
                        out.push_str(&value);
                        if !value.is_empty() && !unit.is_empty() { out.push(' '); }
                        out.push_str(&unit);
                    }
                    "si" | "mathrm" | "text" | "textrm" | "mathit" => out.push_str(&group(chars, &mut i)),
                    other => {
                        if let Some(s) = symbol(other) { out.push_str(s); }
                    }
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Flatten the small TeX subset the helpers emit (`$..$`, `\frac`, `\pi`,
/// `\SI`, `^{..}`, ...) into plain Unicode for on-screen rendering.
/// Text without TeX markup is returned unchanged.
pub fn plain_text(text: &str) -> String {
    if !text.contains(['$', '\\', '^']) {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    flatten(&chars)
}
