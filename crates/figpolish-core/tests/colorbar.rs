// File: crates/figpolish-core/tests/colorbar.rs
// Purpose: Standalone colorbars, heat maps and colormap sampling.

use figpolish_core::axes::AxesKind;
use figpolish_core::{plot_colorbar, ColorbarOptions, Colormap, FigError, Figure, Heatmap, Orientation, Style};
use skia_safe::Color;

fn heat() -> Vec<Vec<f64>> { vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 6.0]] }

#[test]
fn horizontal_colorbar_defaults() {
    let style = Style::default();
    let base = style.figure_dimensions().unwrap();
    let (fig, cbar) = plot_colorbar(&style, heat(), &ColorbarOptions::default()).unwrap();

    assert_eq!(fig.len(), 2);
    assert!((fig.size().width - base.width).abs() < 1e-12);
    assert!((fig.size().height - 0.2 * base.height).abs() < 1e-12);

    let host = fig.axes_ids()[0];
    assert!(!fig.axes(host).unwrap().visible);

    let ax = fig.axes(cbar).unwrap();
    assert!(matches!(ax.kind, AxesKind::Colorbar { orientation: Orientation::Horizontal, .. }));
    assert_eq!((ax.rect.left, ax.rect.bottom, ax.rect.width, ax.rect.height), (0.1, 0.5, 0.8, 0.3));
    assert_eq!((ax.x_axis.min, ax.x_axis.max), (0.0, 6.0));
    assert!(!ax.show_y);
}

#[test]
fn vertical_colorbar_swaps_mismatched_extent() {
    let style = Style::default();
    let opts = ColorbarOptions { orientation: Orientation::Vertical, label: Some("T (K)".into()), ..ColorbarOptions::default() };
    let (fig, cbar) = plot_colorbar(&style, heat(), &opts).unwrap();
    let ax = fig.axes(cbar).unwrap();
    assert_eq!((ax.rect.left, ax.rect.bottom, ax.rect.width, ax.rect.height), (0.2, 0.1, 0.3, 0.8));
    assert_eq!((ax.y_axis.min, ax.y_axis.max), (0.0, 6.0));
    assert_eq!(ax.y_axis.label, "T (K)");
    assert!(!ax.show_x);
    let base = style.figure_dimensions().unwrap();
    assert!((fig.size().width - 0.15 * base.width).abs() < 1e-12);
}

#[test]
fn explicit_position_and_size() {
    let style = Style::default();
    let opts = ColorbarOptions {
        figsize: Some(figpolish_core::FigureDimensions::new(4.0, 1.0)),
        x0: Some(0.05),
        y0: Some(0.4),
        ..ColorbarOptions::default()
    };
    let (fig, cbar) = plot_colorbar(&style, heat(), &opts).unwrap();
    assert_eq!(fig.size(), figpolish_core::FigureDimensions::new(4.0, 1.0));
    let r = fig.axes(cbar).unwrap().rect;
    assert_eq!((r.left, r.bottom), (0.05, 0.4));
}

#[test]
fn ragged_or_empty_heat_is_rejected() {
    let style = Style::default();
    let ragged = vec![vec![0.0, 1.0], vec![2.0]];
    assert!(matches!(plot_colorbar(&style, ragged, &ColorbarOptions::default()), Err(FigError::InvalidInput(_))));
    assert!(plot_colorbar(&style, vec![], &ColorbarOptions::default()).is_err());
    assert!(Heatmap::new(vec![vec![f64::NAN]]).is_err());
}

#[test]
fn add_colorbar_to_existing_figure() {
    let style = Style::default();
    let (mut fig, ids) = Figure::subplots(&style, 1, 1).unwrap();
    let map = Heatmap::new(heat()).unwrap().with_colormap(Colormap::Magma).with_limits(-1.0, 1.0).unwrap();
    fig.axes_mut(ids[0]).unwrap().imshow(map.clone());
    let cbar = fig.add_colorbar(&map, [0.92, 0.1, 0.02, 0.8], Orientation::Vertical, None).unwrap();
    let ax = fig.axes(cbar).unwrap();
    assert_eq!((ax.y_axis.min, ax.y_axis.max), (-1.0, 1.0));
    assert!(matches!(ax.kind, AxesKind::Colorbar { colormap: Colormap::Magma, .. }));

    let img = fig.axes(ids[0]).unwrap();
    assert_eq!((img.x_axis.min, img.x_axis.max), (-0.5, 2.5));
    assert_eq!((img.y_axis.min, img.y_axis.max), (1.5, -0.5));
}

#[test]
fn heatmap_normalization() {
    let map = Heatmap::new(heat()).unwrap();
    assert_eq!(map.shape(), (2, 3));
    assert_eq!((map.vmin, map.vmax), (0.0, 6.0));
    assert_eq!(map.normalize(3.0), 0.5);
    assert!(map.clone().with_limits(2.0, 1.0).is_err());
}

#[test]
fn colormap_endpoints() {
    assert_eq!(Colormap::Viridis.color(0.0, 1.0), Color::from_rgb(68, 1, 84));
    assert_eq!(Colormap::Viridis.color(1.0, 1.0), Color::from_rgb(253, 231, 37));
    assert_eq!(Colormap::Gray.color(0.5, 1.0), Color::from_rgb(128, 128, 128));
    assert_eq!(Colormap::Gray.color(2.0, 1.0), Color::from_rgb(255, 255, 255));
    assert_eq!(Colormap::Viridis.color(f64::NAN, 1.0).a(), 0);
    assert_eq!("Coolwarm".parse::<Colormap>().unwrap(), Colormap::Coolwarm);
    assert!("jet".parse::<Colormap>().is_err());
    assert!("sideways".parse::<Orientation>().is_err());
}
