// File: crates/figpolish-core/tests/figsize.rs
// Purpose: Physical figure sizes for typeset documents.

use figpolish_core::figsize::{INCHES_PER_PT, WIDTH_PT_BMR, WIDTH_PT_SCR};
use figpolish_core::{figure_size, golden_ratio, set_figsize, DocumentWidth, FigError, Figure, FigSize, Style};

#[test]
fn figure_size_scales_width_then_height() {
    let d = figure_size(10.0, 0.5, 1.0).unwrap();
    assert_eq!((d.width, d.height), (10.0, 5.0));
    let d = figure_size(10.0, 0.5, 2.0).unwrap();
    assert_eq!(<(f64, f64)>::from(d), (20.0, 10.0));
}

#[test]
fn figure_size_rejects_non_positive_input() {
    for (w, a, s) in [(0.0, 0.5, 1.0), (-1.0, 0.5, 1.0), (10.0, 0.0, 1.0), (10.0, 0.5, -2.0), (f64::NAN, 0.5, 1.0)] {
        assert!(matches!(figure_size(w, a, s), Err(FigError::InvalidInput(_))), "({w}, {a}, {s})");
    }
    assert!(figure_size(f64::INFINITY, 0.5, 1.0).is_err());
}

#[test]
fn thesis_width_uses_golden_ratio() {
    let d = set_figsize(DocumentWidth::Thesis, 1.0, (1, 1)).unwrap();
    let want_w = WIDTH_PT_SCR * INCHES_PER_PT;
    assert!((d.width - want_w).abs() < 1e-12);
    assert!((d.height - want_w * golden_ratio()).abs() < 1e-12);
    assert!((golden_ratio() - 0.618_033_988_749_895).abs() < 1e-15);
}

#[test]
fn fraction_and_grid_shape() {
    let half = set_figsize(DocumentWidth::Beamer, 0.5, (1, 1)).unwrap();
    assert!((half.width - 0.5 * WIDTH_PT_BMR / 72.27).abs() < 1e-12);
    let tall = set_figsize(DocumentWidth::Beamer, 0.5, (2, 1)).unwrap();
    assert!((tall.height - 2.0 * half.height).abs() < 1e-12);
    let wide = set_figsize(DocumentWidth::Points(400.0), 1.0, (1, 2)).unwrap();
    assert!((wide.height - 0.5 * wide.width * golden_ratio()).abs() < 1e-12);
    assert!(set_figsize(DocumentWidth::Thesis, 1.0, (0, 1)).is_err());
    assert!(set_figsize(DocumentWidth::Points(-3.0), 1.0, (1, 1)).is_err());
}

#[test]
fn document_width_names() {
    assert_eq!("thesis".parse::<DocumentWidth>().unwrap(), DocumentWidth::Thesis);
    assert_eq!(" Beamer ".parse::<DocumentWidth>().unwrap(), DocumentWidth::Beamer);
    assert_eq!("345.0".parse::<DocumentWidth>().unwrap(), DocumentWidth::Points(345.0));
    assert!("a4".parse::<DocumentWidth>().is_err());
}

#[test]
fn figures_take_their_size_from_the_style() {
    let style = Style { figsize: FigSize::Inches { width: 3.0, height: 2.0 }, dpi: 150.0, ..Style::default() };
    let fig = Figure::new(&style).unwrap();
    assert_eq!(fig.pixel_size(), (450.0, 300.0));
    let bad = Style { figsize: FigSize::Inches { width: 0.0, height: 2.0 }, ..Style::default() };
    assert!(Figure::new(&bad).is_err());
}
