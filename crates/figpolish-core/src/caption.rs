// File: crates/figpolish-core/src/caption.rs
// Summary: Sequential "(a)", "(b)", ... subplot captions and the `polish` pass.
// Notes:
// - The whole batch runs on a staged copy of the figure, committed only when
//   every axes planned successfully.
// - By default the subplot grid is then re-spaced (tight layout) so captions
//   below the tick labels stay on the canvas.

use tracing::debug;

use crate::axes::{AxesId, TextStyle};
use crate::embed::{caption_below_ticks, plan_xlabel, plan_ylabel, XLabelAlign, YLabelAlign};
use crate::error::{invalid, Result};
use crate::figure::Figure;
use crate::geometry::Bbox;
use crate::layout::{layout_axes, rotated_box};
use crate::text::TextMeasure;
use crate::tight::TightLayout;

/// What to do once the letters run out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Requesting more captions than letters is an error.
    #[default]
    Error,
    /// Start over at the first letter.
    Cycle,
}

/// Caption generator: `pattern` with `%s` replaced by the next letter.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphabeticalLabels {
    pattern: String,
    letters: Vec<char>,
    ctr: usize,
    pub overflow: OverflowPolicy,
}

impl Default for AlphabeticalLabels {
    fn default() -> Self {
        Self { pattern: "(%s)".to_string(), letters: ('a'..='z').collect(), ctr: 0, overflow: OverflowPolicy::Error }
    }
}

impl AlphabeticalLabels {
    pub fn new() -> Self { Self::default() }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains("%s") {
            return Err(invalid(format!("caption pattern '{pattern}' has no '%s' placeholder")));
        }
        self.pattern = pattern;
        Ok(self)
    }

    pub fn with_letters(mut self, letters: impl IntoIterator<Item = char>) -> Result<Self> {
        let letters: Vec<char> = letters.into_iter().collect();
        if letters.is_empty() {
            return Err(invalid("caption alphabet must not be empty"));
        }
        self.letters = letters;
        Ok(self)
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Number of captions handed out so far.
    pub fn issued(&self) -> usize { self.ctr }

    pub fn next_label(&mut self) -> Result<String> {
        let n = self.letters.len();
        if self.ctr >= n && self.overflow == OverflowPolicy::Error {
            return Err(invalid(format!("requested caption #{} but only {n} letters are available", self.ctr + 1)));
        }
        let letter = self.letters[self.ctr % n].to_string();
        self.ctr += 1;
        Ok(self.pattern.replace("%s", &letter))
    }
}

/// Per-axes option: one value for every axes, or one value each.
#[derive(Clone, Debug, PartialEq)]
pub enum PerAxes<T> {
    All(T),
    Each(Vec<T>),
}

impl<T: Clone> PerAxes<T> {
    /// Expand to exactly `n` values.
    pub fn resolve(&self, n: usize, what: &str) -> Result<Vec<T>> {
        match self {
            PerAxes::All(v) => Ok(vec![v.clone(); n]),
            PerAxes::Each(vs) if vs.len() == n => Ok(vs.clone()),
            PerAxes::Each(vs) => Err(invalid(format!("{what}: got {} values for {n} axes", vs.len()))),
        }
    }
}

impl<T: Default> Default for PerAxes<T> {
    fn default() -> Self { PerAxes::All(T::default()) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CaptionPosition {
    /// Axes fractions.
    Relative { x: f64, y: f64 },
    /// Centered one tick-row height below the x tick labels.
    #[default]
    BelowTickLabels,
}

#[derive(Clone, Debug)]
pub struct PolishOptions {
    pub set_captions: PerAxes<bool>,
    pub embed_xlabels: PerAxes<bool>,
    pub embed_ylabels: PerAxes<bool>,
    pub xva: PerAxes<XLabelAlign>,
    pub yha: PerAxes<YLabelAlign>,
    pub position: CaptionPosition,
    pub caption_style: TextStyle,
    pub labels: AlphabeticalLabels,
    /// Re-space the subplot grid afterwards so captions and labels fit the figure.
    pub tight_layout: Option<TightLayout>,
}

impl Default for PolishOptions {
    fn default() -> Self {
        Self {
            set_captions: PerAxes::All(false),
            embed_xlabels: PerAxes::All(true),
            embed_ylabels: PerAxes::All(true),
            xva: PerAxes::default(),
            yha: PerAxes::default(),
            position: CaptionPosition::default(),
            caption_style: TextStyle::centered(),
            labels: AlphabeticalLabels::default(),
            tight_layout: Some(TightLayout::default()),
        }
    }
}

impl PolishOptions {
    /// Defaults with captions on every axes.
    pub fn captions() -> Self { Self { set_captions: PerAxes::All(true), ..Self::default() } }

    /// Captions only, axis labels left where they are.
    pub fn captions_only() -> Self {
        Self { embed_xlabels: PerAxes::All(false), embed_ylabels: PerAxes::All(false), ..Self::captions() }
    }
}

/// Captions assigned by one `polish` call, in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptionAssignment {
    entries: Vec<(AxesId, String)>,
}

impl CaptionAssignment {
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = (AxesId, &str)> + '_ {
        self.entries.iter().map(|(id, s)| (*id, s.as_str()))
    }
    pub fn labels(&self) -> Vec<&str> { self.entries.iter().map(|(_, s)| s.as_str()).collect() }

    /// Caption of `id` (the first one if the axes was listed twice).
    pub fn get(&self, id: AxesId) -> Option<&str> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, s)| s.as_str())
    }
}

/// Embed axis labels and caption `ids` in order, measuring text with the
/// figure's fonts.
pub fn polish(fig: &mut Figure, ids: &[AxesId], opts: &PolishOptions) -> Result<CaptionAssignment> {
    let shaper = fig.shaper();
    polish_with(fig, ids, opts, &shaper)
}

fn embed_labels(
    fig: &mut Figure,
    ids: &[AxesId],
    embed: &[(bool, bool)],
    align: &[(XLabelAlign, YLabelAlign)],
    metrics: &dyn TextMeasure,
) -> Result<()> {
    let mut plans = Vec::with_capacity(ids.len());
    for (i, &id) in ids.iter().enumerate() {
        let ax = fig.axes(id)?;
        let layout = layout_axes(fig, ax, metrics)?;
        let (embed_x, embed_y) = embed[i];
        let (xva, yha) = align[i];
        let xlabel = if embed_x { plan_xlabel(&layout, ax, xva)? } else { None };
        let ylabel = if embed_y { plan_ylabel(&layout, ax, yha, metrics)? } else { None };
        plans.push((id, xlabel, ylabel));
    }
    for (id, xlabel, ylabel) in plans {
        let ax = fig.axes_mut(id)?;
        if let Some(p) = xlabel {
            ax.x_axis.label_placement = p;
        }
        if let Some(p) = ylabel {
            ax.y_axis.label_placement = p;
        }
    }
    Ok(())
}

fn caption_anchor(fig: &Figure, id: AxesId, position: CaptionPosition, metrics: &dyn TextMeasure) -> Result<(f64, f64)> {
    let layout = layout_axes(fig, fig.axes(id)?, metrics)?;
    Ok(match position {
        CaptionPosition::Relative { x, y } => (x, y),
        CaptionPosition::BelowTickLabels => caption_below_ticks(&layout),
    })
}

/// Display box a caption at axes fraction `(x, y)` of `id` would cover.
fn caption_box(fig: &Figure, id: AxesId, text: &str, (x, y): (f64, f64), style: &TextStyle, metrics: &dyn TextMeasure) -> Result<Bbox> {
    let layout = layout_axes(fig, fig.axes(id)?, metrics)?;
    let (dx, dy) = layout.to_display(x, y);
    let fstyle = fig.style();
    let size = fstyle.pt_to_px(f64::from(style.size_pt.unwrap_or(fstyle.font_size_pt)));
    let (w, h) = metrics.measure(text, size);
    Ok(rotated_box(dx, dy, w, h, style.ha, style.va, style.rotation))
}

/// [`polish`] with explicit text metrics.
///
/// Work happens on a copy of the figure that replaces `fig` only once every
/// step succeeded.
pub fn polish_with(
    fig: &mut Figure,
    ids: &[AxesId],
    opts: &PolishOptions,
    metrics: &dyn TextMeasure,
) -> Result<CaptionAssignment> {
    fig.check_handles(ids)?;
    let n = ids.len();
    let set_captions = opts.set_captions.resolve(n, "set_captions")?;
    let embed_x = opts.embed_xlabels.resolve(n, "embed_xlabels")?;
    let embed_y = opts.embed_ylabels.resolve(n, "embed_ylabels")?;
    let xva = opts.xva.resolve(n, "xva")?;
    let yha = opts.yha.resolve(n, "yha")?;
    let embed: Vec<(bool, bool)> = embed_x.into_iter().zip(embed_y).collect();
    let align: Vec<(XLabelAlign, YLabelAlign)> = xva.into_iter().zip(yha).collect();

    let mut labels = opts.labels.clone();
    let mut captions = Vec::new();
    for (&id, &wanted) in ids.iter().zip(&set_captions) {
        if wanted {
            captions.push((id, labels.next_label()?));
        }
    }

    let mut staged = fig.staged();
    embed_labels(&mut staged, ids, &embed, &align, metrics)?;
    if let Some(tight) = &opts.tight_layout {
        let mut reserved = Vec::with_capacity(captions.len());
        for (id, text) in &captions {
            let at = caption_anchor(&staged, *id, opts.position, metrics)?;
            reserved.push((id.index(), caption_box(&staged, *id, text, at, &opts.caption_style, metrics)?));
        }
        staged.tight_layout_reserving(tight, metrics, &reserved)?;
        // tick labels may differ in the re-spaced frames
        embed_labels(&mut staged, ids, &embed, &align, metrics)?;
    }

    let mut placed = Vec::with_capacity(captions.len());
    for (id, text) in captions {
        let at = caption_anchor(&staged, id, opts.position, metrics)?;
        placed.push((id, text, at));
    }
    let mut assignment = CaptionAssignment::default();
    for (id, text, (x, y)) in placed {
        debug!(axes = id.index(), caption = %text, x, y, "placing caption");
        staged.axes_mut(id)?.text_axes(x, y, text.clone(), opts.caption_style.clone());
        assignment.entries.push((id, text));
    }
    *fig = staged;
    Ok(assignment)
}
