// File: crates/figpolish-core/tests/smoke.rs
// Purpose: End-to-end render of a polished figure to PNG.

use figpolish_core::{
    format_ticklabels, plot_colorbar, polish, AxisSelector, ColorbarOptions, Figure, MultipleFormatter, PolishOptions,
    Style,
};

#[test]
fn render_smoke_png() {
    let (mut fig, ids) = Figure::subplots(&Style::default(), 1, 2).unwrap();
    let xs: Vec<f64> = (0..=64).map(|i| i as f64 * std::f64::consts::TAU / 64.0).collect();
    for (k, &id) in ids.iter().enumerate() {
        let ax = fig.axes_mut(id).unwrap();
        let ys: Vec<f64> = xs.iter().map(|x| (x * (k + 1) as f64).sin()).collect();
        ax.plot(&xs, &ys).unwrap();
        ax.set_xlabel("phase");
        ax.set_ylabel("amplitude");
    }
    format_ticklabels(&mut fig, &ids, AxisSelector::X, &MultipleFormatter::new(2)).unwrap();
    let captions = polish(&mut fig, &ids, &PolishOptions::captions()).unwrap();
    assert_eq!(captions.labels(), ["(a)", "(b)"]);

    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    fig.render_to_png(&out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = fig.render_to_png_bytes().expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode png");
    let (w, h) = fig.pixel_size();
    assert_eq!((img.width(), img.height()), (w.round() as u32, h.round() as u32));
}

#[test]
fn render_colorbar_png() {
    let heat = vec![vec![0.0, 0.5], vec![1.0, 2.0]];
    let (fig, _) = plot_colorbar(&Style::default(), heat, &ColorbarOptions::default()).unwrap();
    let bytes = fig.render_to_png_bytes().expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}
