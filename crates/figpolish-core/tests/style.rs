// File: crates/figpolish-core/tests/style.rs
// Purpose: `setup`, TOML style sheets and per-figure style ownership.

use figpolish_core::figsize::FigureDimensions;
use figpolish_core::theme::parse_color;
use figpolish_core::{setup, DocumentWidth, FigError, FigSize, Figure, FontFamily, SetupOptions, Style, TextMode};
use skia_safe::Color;

#[test]
fn setup_defaults_to_plain_text() {
    let style = setup(SetupOptions::default()).unwrap();
    assert!(!style.use_tex);
    assert_eq!(style.text_mode(), TextMode::Plain);
    assert_eq!(style.font_family, FontFamily::SansSerif);
    assert!(style.latex_preamble.is_empty());
}

#[test]
fn setup_with_tex() {
    let style = setup(SetupOptions::tex()).unwrap();
    assert!(style.use_tex);
    assert_eq!(style.text_mode(), TextMode::Tex);
    assert_eq!(style.font_family, FontFamily::Serif);
    assert!(style.latex_preamble.contains("siunitx"));
}

#[test]
fn setup_overrides() {
    let opts = SetupOptions {
        figsize: Some(FigSize::Inches { width: 5.0, height: 2.5 }),
        colors: Some(vec!["red".into(), "#00ff00".into()]),
        ..SetupOptions::default()
    };
    let style = setup(opts).unwrap();
    assert_eq!(style.figure_dimensions().unwrap(), FigureDimensions::new(5.0, 2.5));
    assert_eq!(style.palette().unwrap(), vec![Color::from_rgb(255, 0, 0), Color::from_rgb(0, 255, 0)]);

    let bad = SetupOptions { colors: Some(vec!["not-a-color".into()]), ..SetupOptions::default() };
    assert!(matches!(setup(bad), Err(FigError::InvalidInput(_))));
}

#[test]
fn style_sheet_from_toml() {
    let src = r##"
        use_tex = true
        dpi = 200.0
        font_size_pt = 8.0
        colors = ["black", "rgb(1, 0.5, 0)"]
        theme = "dark"

        [figsize]
        kind = "document"
        width = "beamer"
        fraction = 0.5
    "##;
    let style = Style::from_toml_str(src).unwrap();
    assert!(style.use_tex);
    assert_eq!(style.dpi, 200.0);
    assert_eq!(style.font_size_pt, 8.0);
    // unspecified keys keep their defaults
    assert_eq!(style.tick_label_size_pt, Style::default().tick_label_size_pt);
    assert_eq!(style.figsize, FigSize::Document { width: DocumentWidth::Beamer, fraction: 0.5 });
    assert_eq!(style.theme().name, "dark");
    assert_eq!(style.palette().unwrap()[1], Color::from_rgb(255, 128, 0));
}

#[test]
fn style_sheet_errors() {
    assert!(matches!(Style::from_toml_str("dpi = \"high\""), Err(FigError::Style(_))));
    assert!(matches!(Style::from_toml_str("dpi = -1.0"), Err(FigError::InvalidInput(_))));
    assert!(matches!(Style::from_toml_str("colors = []"), Err(FigError::InvalidInput(_))));
    assert!(matches!(Style::load("does/not/exist.toml"), Err(FigError::Io(_))));
}

#[test]
fn setup_reads_style_sheet_file() {
    let dir = std::path::PathBuf::from("target/test_out");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("style_sheet.toml");
    std::fs::write(&path, "dpi = 300.0\nfont_family = \"monospace\"\n").unwrap();
    let style = setup(SetupOptions { style_sheet: Some(path), ..SetupOptions::default() }).unwrap();
    assert_eq!(style.dpi, 300.0);
    // use_tex = false resets the family
    assert_eq!(style.font_family, FontFamily::SansSerif);
}

#[test]
fn unknown_theme_falls_back_to_paper() {
    let style = Style { theme: "neon".into(), ..Style::default() };
    assert_eq!(style.theme().name, "paper");
}

#[test]
fn figures_own_a_copy_of_the_style() {
    let mut style = Style::default();
    let fig = Figure::new(&style).unwrap();
    style.dpi = 300.0;
    assert_eq!(fig.dpi(), 100.0);
}

#[test]
fn color_forms() {
    assert_eq!(parse_color("Blue").unwrap(), Color::from_rgb(0, 0, 255));
    assert_eq!(parse_color("#ff000080").unwrap(), Color::from_argb(0x80, 255, 0, 0));
    assert!(parse_color("rgb(2, 0, 0)").is_err());
    assert!(parse_color("#12").is_err());
}
