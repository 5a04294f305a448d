// File: crates/figpolish-core/tests/annotate.rs
// Purpose: Group annotations, bounding boxes and point-cloud labels.

use figpolish_core::annotate::{annotate_cloud_with, annotate_points_with};
use figpolish_core::axes::{Artist, Rectangle};
use figpolish_core::figsize::FigureDimensions;
use figpolish_core::{
    draw_bbox, AnnotateOptions, ApproxMetrics, AxesId, BboxOptions, CloudOptions, FigError, Figure, ScaleKind, Style,
};

const METRICS: ApproxMetrics = ApproxMetrics { advance: 0.6 };

fn figure() -> (Figure, AxesId) {
    let mut fig = Figure::with_size(&Style::default(), FigureDimensions::new(4.0, 3.0)).unwrap();
    let id = fig.add_axes([0.25, 0.25, 0.5, 0.5]);
    (fig, id)
}

fn rects(fig: &Figure, id: AxesId) -> Vec<Rectangle> {
    fig.axes(id)
        .unwrap()
        .artists
        .iter()
        .filter_map(|a| match a {
            Artist::Rect(r) => Some(r.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn bbox_with_linear_buffers() {
    let (mut fig, id) = figure();
    draw_bbox(fig.axes_mut(id).unwrap(), &[1.0, 3.0, 2.0], &[2.0, 6.0, 4.0], &BboxOptions::default()).unwrap();
    let r = &rects(&fig, id)[0];
    assert!((r.x - 0.99).abs() < 1e-12);
    assert!((r.y - 1.95).abs() < 1e-12);
    assert!((r.width - 2.02).abs() < 1e-12);
    assert!((r.height - 4.1).abs() < 1e-12);
}

#[test]
fn bbox_on_log_axis_is_symmetric_in_log_space() {
    let (mut fig, id) = figure();
    let ax = fig.axes_mut(id).unwrap();
    ax.set_xscale(ScaleKind::Log10);
    let opts = BboxOptions { xbuffer: 0.1, ..BboxOptions::default() };
    draw_bbox(ax, &[10.0, 100.0], &[0.0, 1.0], &opts).unwrap();
    let r = &rects(&fig, id)[0];
    let (left, right) = (r.x, r.x + r.width);
    assert!((left - 9.0).abs() < 1e-12);
    let below = 10f64.log10() - left.log10();
    let above = right.log10() - 100f64.log10();
    assert!((below - above).abs() < 1e-12, "{below} vs {above}");
}

#[test]
fn bbox_single_point_and_bad_input() {
    let (mut fig, id) = figure();
    let ax = fig.axes_mut(id).unwrap();
    draw_bbox(ax, &[1.0], &[1.0], &BboxOptions::default()).unwrap();
    assert!(ax.artists.is_empty());
    assert!(matches!(draw_bbox(ax, &[], &[], &BboxOptions::default()), Err(FigError::InvalidInput(_))));
    assert!(draw_bbox(ax, &[1.0, 2.0], &[1.0], &BboxOptions::default()).is_err());
}

#[test]
fn annotate_points_grows_the_view() {
    let (mut fig, id) = figure();
    fig.axes_mut(id).unwrap().plot(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
    let before = fig.axes(id).unwrap().y_axis.max;

    annotate_points_with(&mut fig, id, "peak", &[1.0, 2.0], &[2.0, 3.0], &AnnotateOptions::default(), &METRICS).unwrap();

    let ax = fig.axes(id).unwrap();
    let t = ax.texts().next().expect("annotation");
    assert_eq!(t.text, "peak");
    assert_eq!(t.x, 1.5);
    assert!((t.y - 3.09).abs() < 1e-12);
    let lim = ax.data_limits().unwrap();
    assert!(lim[3] > 3.09, "data limits should include the text: {lim:?}");
    assert!(ax.y_axis.max > before);
}

#[test]
fn annotate_points_below_and_left() {
    let (mut fig, id) = figure();
    fig.axes_mut(id).unwrap().plot(&[0.0, 4.0], &[1.0, 2.0]).unwrap();
    let opts = AnnotateOptions { below: true, align: figpolish_core::HAlign::Left, ..AnnotateOptions::default() };
    annotate_points_with(&mut fig, id, "low", &[1.0, 3.0], &[1.0, 2.0], &opts, &METRICS).unwrap();
    let t = fig.axes(id).unwrap().texts().next().cloned().unwrap();
    assert_eq!(t.x, 1.0);
    assert!((t.y - (1.0 - 0.03 * 2.0)).abs() < 1e-12);
    assert!(annotate_points_with(&mut fig, id, "x", &[], &[], &opts, &METRICS).is_err());
}

#[test]
fn cloud_labels_flip_away_from_each_other() {
    let (mut fig, id) = figure();
    fig.axes_mut(id).unwrap().set_view([0.0, 1.0, 0.0, 1.0]);
    let points = [(0.5, 0.5), (0.5, 0.5), (0.1, 0.1)];
    let placed = annotate_cloud_with(&mut fig, id, &points, &["A", "B", "C"], &CloudOptions::default(), &METRICS).unwrap();

    assert_eq!(placed.len(), 3);
    assert!(!placed[0].flipped);
    assert!(placed[1].flipped);
    assert!(!placed[2].flipped);
    assert!(!placed[0].bbox.overlaps(&placed[1].bbox));
    assert_eq!(fig.axes(id).unwrap().texts().count(), 3);
}

#[test]
fn cloud_requires_one_label_per_point() {
    let (mut fig, id) = figure();
    let res = annotate_cloud_with(&mut fig, id, &[(0.0, 0.0), (1.0, 1.0)], &["only one"], &CloudOptions::default(), &METRICS);
    assert!(matches!(res, Err(FigError::InvalidInput(_))));
    assert_eq!(fig.axes(id).unwrap().texts().count(), 0);
}
