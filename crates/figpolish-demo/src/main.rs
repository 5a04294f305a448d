// File: crates/figpolish-demo/src/main.rs
// Summary: Demo loads a labelled point cloud from CSV, annotates it and renders the
// scatter, a density heat map with colorbar, and a standalone colorbar to PNGs.

use anyhow::{Context, Result};
use figpolish_core::{
    annotate_cloud, draw_bbox, plot_colorbar, polish, setup, BboxOptions, CloudOptions, ColorbarOptions, Colormap,
    Figure, FigureDimensions, Heatmap, Orientation, PerAxes, PolishOptions,
    SetupOptions, TightLayout,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Cells per side of the density grid.
const BINS: usize = 8;

struct Point {
    x: f64,
    y: f64,
    label: String,
    value: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Accept path from CLI or fall back to the bundled sample
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("data/points.csv"));
    info!(path = %path.display(), "using input file");

    let points = load_points(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    if points.is_empty() {
        anyhow::bail!("no points loaded, check headers/delimiter.");
    }
    info!(count = points.len(), "loaded points");

    let style = setup(SetupOptions::default())?;
    let (mut fig, ids) = Figure::subplots(&style, 1, 2)?;
    let (cloud, density) = (ids[0], ids[1]);

    // 1) Scatter with per-point labels and a box around the heaviest group
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    {
        let ax = fig.axes_mut(cloud)?;
        ax.scatter(&xs, &ys, 4.0)?;
        ax.set_xlabel("x");
        ax.set_ylabel("y");
    }
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    let placed = annotate_cloud(&mut fig, cloud, &coords, &labels, &CloudOptions::default())?;
    let flipped = placed.iter().filter(|p| p.flipped).count();
    if flipped > 0 {
        info!(flipped, "moved labels away from their neighbours");
    }

    let mean = points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64;
    let (hx, hy): (Vec<f64>, Vec<f64>) = points.iter().filter(|p| p.value > mean).map(|p| (p.x, p.y)).unzip();
    if hx.is_empty() {
        warn!("no point above the mean value, skipping box");
    } else {
        draw_bbox(fig.axes_mut(cloud)?, &hx, &hy, &BboxOptions::default())?;
    }

    // 2) Value-weighted density with a colorbar beside it
    let heat = Heatmap::new(density_grid(&points))?.with_colormap(Colormap::Magma);
    {
        let ax = fig.axes_mut(density)?;
        ax.imshow(heat.clone());
        ax.set_xlabel("x bin");
        ax.set_ylabel("y bin");
    }

    // the heat map keeps its labels outside the frame; the right edge stays free for the colorbar
    let polish_opts = PolishOptions {
        embed_xlabels: PerAxes::Each(vec![true, false]),
        embed_ylabels: PerAxes::Each(vec![true, false]),
        tight_layout: Some(TightLayout { rect: [0.0, 0.0, 0.9, 1.0], ..TightLayout::default() }),
        ..PolishOptions::captions()
    };
    polish(&mut fig, &ids, &polish_opts)?;
    let rect = fig.axes(density)?.rect;
    fig.add_colorbar(&heat, [rect.left + rect.width + 0.01, rect.bottom, 0.02, rect.height], Orientation::Vertical, Some("value"))?;
    let out = out_name_with(&path, "cloud");
    fig.render_to_png(&out)?;
    println!("Wrote {}", out.display());

    // 3) Standalone colorbar for the same data
    let opts = ColorbarOptions {
        colormap: Colormap::Magma,
        figsize: Some(FigureDimensions::new(4.0, 0.8)),
        label: Some("value".to_string()),
        ..ColorbarOptions::default()
    };
    let (bar, _) = plot_colorbar(&style, heat.rows().to_vec(), &opts)?;
    let out = out_name_with(&path, "colorbar");
    bar.render_to_png(&out)?;
    println!("Wrote {}", out.display());

    Ok(())
}

/// Produce output file name like target/out/figpolish_<stem>_<suffix>.png
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let mut out = PathBuf::from("target/out");
    if stem.is_empty() {
        out.push(format!("figpolish_{suffix}.png"));
    } else {
        out.push(format!("figpolish_{stem}_{suffix}.png"));
    }
    out
}

/// Load `x,y,label[,value]` rows; the value defaults to 1.
fn load_points(path: &Path) -> Result<Vec<Point>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    info!(?headers, "csv headers");
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_x = idx(&["x", "px"]).context("missing x column")?;
    let i_y = idx(&["y", "py"]).context("missing y column")?;
    let i_label = idx(&["label", "name", "id"]).context("missing label column")?;
    let i_value = idx(&["value", "weight", "v"]);

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let num = |i: usize| rec.get(i).and_then(|s| s.parse::<f64>().ok());
        match (num(i_x), num(i_y), rec.get(i_label)) {
            (Some(x), Some(y), Some(label)) if x.is_finite() && y.is_finite() => {
                let value = i_value.and_then(num).unwrap_or(1.0);
                out.push(Point { x, y, label: label.to_string(), value });
            }
            _ => warn!(row, "skipping malformed row"),
        }
    }
    Ok(out)
}

/// Sum of point values per cell of a BINS x BINS grid over the cloud's extent; row 0 is the top.
fn density_grid(points: &[Point]) -> Vec<Vec<f64>> {
    let (x0, x1) = minmax(points.iter().map(|p| p.x));
    let (y0, y1) = minmax(points.iter().map(|p| p.y));
    let cell = |v: f64, lo: f64, hi: f64| {
        if hi > lo { (((v - lo) / (hi - lo)) * BINS as f64).floor().min((BINS - 1) as f64) as usize } else { 0 }
    };
    let mut grid = vec![vec![0.0; BINS]; BINS];
    for p in points {
        let row = BINS - 1 - cell(p.y, y0, y1);
        grid[row][cell(p.x, x0, x1)] += p.value;
    }
    grid
}

fn minmax(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
