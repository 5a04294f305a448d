// File: crates/figpolish-core/tests/plotting.rs
// Purpose: Color cycle, colored segments and step curves.

use figpolish_core::axes::Artist;
use figpolish_core::plotting::step_points;
use figpolish_core::{plot_lines, plot_step, Colormap, Colors, Figure, LineStyle, Style};
use skia_safe::Color;

#[test]
fn color_cycle_advances_and_wraps() {
    let mut c = Colors::default();
    assert_eq!(c.len(), 8);
    assert_eq!(c.get_color(0), Color::from_rgb(0, 0, 255));
    assert_eq!(c.get_color(1), Color::from_rgb(0, 0, 255));
    assert_eq!(c.prev_color(), Color::from_rgb(0, 0, 255));
    assert_eq!(c.get_color(1), Color::from_rgb(255, 128, 0));
    assert_eq!(c.get_color(6), Color::from_rgb(0, 128, 0));
    // 1 + 1 + 6 = 8 -> back at the start
    assert_eq!(c.get_color(1), Color::from_rgb(0, 0, 255));
    assert!(Colors::new(vec![]).is_err());
}

#[test]
fn style_palette_matches_default_cycle() {
    let mut from_style = Colors::from_style(&Style::default()).unwrap();
    let mut default = Colors::default();
    for _ in 0..8 {
        assert_eq!(from_style.get_color(1), default.get_color(1));
    }
    assert_eq!(Colors::tab10().len(), 10);
}

#[test]
fn lines_use_the_axes_cycle() {
    let (mut fig, ids) = Figure::subplots(&Style::default(), 1, 1).unwrap();
    let ax = fig.axes_mut(ids[0]).unwrap();
    ax.plot(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
    ax.plot(&[0.0, 1.0], &[1.0, 0.0]).unwrap();
    let colors: Vec<Color> = ax
        .artists
        .iter()
        .filter_map(|a| match a {
            Artist::Line(l) => Some(l.color),
            _ => None,
        })
        .collect();
    assert_eq!(colors, [Color::from_rgb(0, 0, 255), Color::from_rgb(255, 128, 0)]);
    assert!(ax.plot(&[0.0], &[0.0, 1.0]).is_err());
}

#[test]
fn plot_lines_one_segment_per_pair() {
    let (mut fig, ids) = Figure::subplots(&Style::default(), 1, 1).unwrap();
    let ax = fig.axes_mut(ids[0]).unwrap();
    plot_lines(ax, &[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 0.0, 1.0], &[0.0, 1.0, 2.0, 3.0], Colormap::Gray).unwrap();
    let Some(Artist::Collection(coll)) = ax.artists.first() else { panic!("expected a line collection") };
    assert_eq!(coll.segments.len(), 3);
    assert_eq!(coll.segments[1], [(1.0, 1.0), (2.0, 0.0)]);
    assert_eq!(coll.colors[0], Color::from_rgb(0, 0, 0));
    assert!(ax.x_axis.min < 0.0 && ax.x_axis.max > 3.0);
    assert!(plot_lines(ax, &[0.0, 1.0], &[0.0], &[0.0, 1.0], Colormap::Gray).is_err());
}

#[test]
fn step_vertices() {
    let (xs, ys) = step_points(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], false).unwrap();
    assert_eq!(xs, [0.0, 1.0, 1.0, 2.0, 2.0]);
    assert_eq!(ys, [1.0, 1.0, 2.0, 2.0, 3.0]);
}

#[test]
fn step_fills_nans_forward() {
    let (_, ys) = step_points(&[0.0, 1.0, 2.0, 3.0], &[f64::NAN, 2.0, f64::NAN, 4.0], true).unwrap();
    assert_eq!(ys, [2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 4.0]);
    assert!(step_points(&[0.0], &[f64::NAN], true).is_err());
    let (_, kept) = step_points(&[0.0, 1.0], &[f64::NAN, 1.0], false).unwrap();
    assert!(kept[0].is_nan());
}

#[test]
fn plot_step_draws_one_line() {
    let (mut fig, ids) = Figure::subplots(&Style::default(), 1, 1).unwrap();
    let ax = fig.axes_mut(ids[0]).unwrap();
    let style = LineStyle { color: Some(Color::from_rgb(139, 0, 0)), width_pt: Some(0.5) };
    plot_step(ax, &[0.0, 1.0, 2.0], &[3.0, 1.0, 2.0], false, &style).unwrap();
    let Some(Artist::Line(line)) = ax.artists.first() else { panic!("expected a line") };
    assert_eq!(line.xs.len(), 5);
    assert_eq!(line.color, Color::from_rgb(139, 0, 0));
    assert_eq!(line.width_pt, 0.5);
    assert!(plot_step(ax, &[], &[], false, &style).is_err());
}
