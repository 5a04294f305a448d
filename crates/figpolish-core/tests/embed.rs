// File: crates/figpolish-core/tests/embed.rs
// Purpose: Axis labels embedded between the last two tick labels.
// Layout: 4x3 in figure at 100 dpi, axes frame (100, 75)-(300, 225) px,
// both axes 0..4 with ticks at every integer; text measured by ApproxMetrics.

use figpolish_core::embed::{embed_xlabel_with, embed_ylabel_with};
use figpolish_core::figsize::FigureDimensions;
use figpolish_core::layout::layout_axes;
use figpolish_core::ticks::Locator;
use figpolish_core::{
    ApproxMetrics, AxesId, FigError, Figure, HAlign, LabelPlacement, Style, VAlign, XLabelAlign, YLabelAlign,
};

const METRICS: ApproxMetrics = ApproxMetrics { advance: 0.6 };

fn px(pt: f64) -> f64 { pt * 100.0 / 72.0 }

fn figure(xlabel: &str, ylabel: &str) -> (Figure, AxesId) {
    let mut fig = Figure::with_size(&Style::default(), FigureDimensions::new(4.0, 3.0)).unwrap();
    let id = fig.add_axes([0.25, 0.25, 0.5, 0.5]);
    let ax = fig.axes_mut(id).unwrap();
    ax.set_view([0.0, 4.0, 0.0, 4.0]);
    ax.set_xlabel(xlabel);
    ax.set_ylabel(ylabel);
    (fig, id)
}

fn embedded(p: LabelPlacement) -> (f64, f64, HAlign, VAlign) {
    match p {
        LabelPlacement::Embedded { x, y, ha, va } => (x, y, ha, va),
        LabelPlacement::Auto => panic!("label was not embedded"),
    }
}

fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

#[test]
fn layout_matches_hand_computation() {
    let (fig, id) = figure("x", "y");
    let layout = layout_axes(&fig, fig.axes(id).unwrap(), &METRICS).unwrap();
    assert!(close(layout.frame.x0, 100.0) && close(layout.frame.y1, 225.0));
    assert_eq!(layout.x_ticks.len(), 5);
    let top = 75.0 - 2.0 * px(3.5);
    let last = &layout.x_ticks[4];
    assert_eq!(last.label, "4");
    assert!(close(last.bbox.y1, top));
    assert!(close(last.bbox.y0, top - px(9.0)));
    assert!(close(last.bbox.x0, 300.0 - 0.3 * px(9.0)));
}

#[test]
fn xlabel_lands_between_last_two_ticks() {
    let (mut fig, id) = figure("x", "y");
    embed_xlabel_with(&mut fig, id, XLabelAlign::Top, &METRICS).unwrap();
    let (x, y, ha, va) = embedded(fig.axes(id).unwrap().x_axis.label_placement);

    let half = 0.3 * px(9.0);
    let xpos = ((300.0 - half) + (250.0 + half)) / 2.0;
    let bottom = 75.0 - 2.0 * px(3.5) - px(9.0);
    let height = 75.0 - px(3.5) - bottom;
    assert!(close(x, (xpos - 100.0) / 200.0));
    assert!(close(y, (bottom + height / 2.0 - 75.0) / 150.0));
    assert_eq!((ha, va), (HAlign::Center, VAlign::Center));
}

#[test]
fn xlabel_alignments_are_ordered() {
    let ys: Vec<f64> = [XLabelAlign::Top, XLabelAlign::Center, XLabelAlign::Bottom]
        .into_iter()
        .map(|align| {
            let (mut fig, id) = figure("x", "");
            embed_xlabel_with(&mut fig, id, align, &METRICS).unwrap();
            embedded(fig.axes(id).unwrap().x_axis.label_placement).1
        })
        .collect();
    assert!(ys[0] > ys[1] && ys[1] > ys[2], "{ys:?}");
    let bottom = 75.0 - 2.0 * px(3.5) - px(9.0);
    assert!(close(ys[1], (bottom - 75.0) / 150.0));
}

#[test]
fn short_ylabel_stays_in_the_tick_column() {
    let (mut fig, id) = figure("", "y");
    embed_ylabel_with(&mut fig, id, YLabelAlign::Right, &METRICS).unwrap();
    let (x, y, ha, _) = embedded(fig.axes(id).unwrap().y_axis.label_placement);

    let right = 100.0 - 2.0 * px(3.5);
    let w = 0.6 * px(9.0);
    let xpos = right - w + w / 2.0;
    let tick_h = px(9.0);
    let ypos = ((225.0 - tick_h / 2.0) + (187.5 + tick_h / 2.0)) / 2.0;
    assert_eq!(ha, HAlign::Center);
    assert!(close(x, (xpos - 100.0) / 200.0));
    assert!(close(y, (ypos - 75.0) / 150.0));
}

#[test]
fn long_ylabel_is_pushed_off_the_frame() {
    let (mut fig, id) = figure("", "voltage");
    embed_ylabel_with(&mut fig, id, YLabelAlign::Right, &METRICS).unwrap();
    let (x, _, ha, va) = embedded(fig.axes(id).unwrap().y_axis.label_placement);
    assert_eq!((ha, va), (HAlign::Right, VAlign::Center));
    assert!(close(x, -px(3.5) / 200.0));
}

#[test]
fn twin_ylabel_is_pushed_right() {
    let (mut fig, host) = figure("", "");
    let twin = fig.twinx(host).unwrap();
    {
        let ax = fig.axes_mut(twin).unwrap();
        ax.set_ylim(0.0, 4.0);
        ax.set_ylabel("current");
    }
    embed_ylabel_with(&mut fig, twin, YLabelAlign::Right, &METRICS).unwrap();
    let (x, _, ha, _) = embedded(fig.axes(twin).unwrap().y_axis.label_placement);
    assert_eq!(ha, HAlign::Left);
    assert!(close(x, 1.0 + px(3.5) / 200.0));
}

#[test]
fn too_few_ticks_with_label_fails() {
    let (mut fig, id) = figure("x", "");
    {
        let ax = fig.axes_mut(id).unwrap();
        ax.x_axis.major = Locator::Fixed(vec![0.0, 1.0, 2.0]);
        ax.set_xlim(0.0, 0.5);
    }
    let res = embed_xlabel_with(&mut fig, id, XLabelAlign::Top, &METRICS);
    assert!(matches!(res, Err(FigError::InvalidInput(_))));
}

#[test]
fn too_few_ticks_without_label_is_skipped() {
    let (mut fig, id) = figure("", "");
    {
        let ax = fig.axes_mut(id).unwrap();
        ax.x_axis.major = Locator::Fixed(vec![0.0, 1.0, 2.0]);
        ax.set_xlim(0.0, 0.5);
    }
    embed_xlabel_with(&mut fig, id, XLabelAlign::Top, &METRICS).unwrap();
    assert_eq!(fig.axes(id).unwrap().x_axis.label_placement, LabelPlacement::Auto);
}

#[test]
fn alignment_names() {
    assert_eq!("bottom".parse::<XLabelAlign>().unwrap(), XLabelAlign::Bottom);
    assert_eq!("left".parse::<YLabelAlign>().unwrap(), YLabelAlign::Left);
    let err = "middle".parse::<XLabelAlign>().unwrap_err().to_string();
    assert!(err.contains("['top', 'center', 'bottom']"), "{err}");
    assert!("up".parse::<YLabelAlign>().is_err());
}
