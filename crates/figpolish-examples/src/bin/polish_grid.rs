// File: crates/figpolish-examples/src/bin/polish_grid.rs
// Summary: 2x2 grid of harmonics with π ticks, embedded labels and (a)-(d) captions.

use anyhow::Result;
use figpolish_core::{
    format_ticklabels, polish, setup, AxisSelector, Figure, MultipleFormatter, PolishOptions, SetupOptions,
};
use std::f64::consts::TAU;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let use_tex = std::env::args().any(|a| a == "--tex");
    let style = setup(SetupOptions { use_tex, ..SetupOptions::default() })?;
    let (mut fig, ids) = Figure::subplots(&style, 2, 2)?;

    let xs: Vec<f64> = (0..=200).map(|i| i as f64 * TAU / 200.0).collect();
    for (k, &id) in ids.iter().enumerate() {
        let n = (k + 1) as f64;
        let ys: Vec<f64> = xs.iter().map(|x| (n * x).sin() / n).collect();
        let ax = fig.axes_mut(id)?;
        ax.plot(&xs, &ys)?;
        ax.set_xlabel("phase");
        ax.set_ylabel("amplitude");
    }

    format_ticklabels(&mut fig, &ids, AxisSelector::X, &MultipleFormatter::new(2).with_minor(4))?;
    let captions = polish(&mut fig, &ids, &PolishOptions::captions())?;
    for (id, label) in captions.iter() {
        info!(axes = id.index(), label, "captioned");
    }

    let out = std::path::PathBuf::from("target/out/polish_grid.png");
    fig.render_to_png(&out)?;
    println!("Wrote {}", out.display());
    Ok(())
}
