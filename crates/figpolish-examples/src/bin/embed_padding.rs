// File: crates/figpolish-examples/src/bin/embed_padding.rs
// Summary: Embeds axis labels into the tick-label row, including a twin y axis on the right.

use anyhow::Result;
use figpolish_core::{embed_xlabel, embed_ylabel, setup, Figure, SetupOptions, XLabelAlign, YLabelAlign};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let style = setup(SetupOptions::default())?;
    let (mut fig, ids) = Figure::subplots(&style, 1, 1)?;
    let main = ids[0];
    let twin = fig.twinx(main)?;

    let ts: Vec<f64> = (0..=100).map(|i| i as f64 * 0.1).collect();
    let volts: Vec<f64> = ts.iter().map(|t| 5.0 * (-t / 4.0).exp()).collect();
    let amps: Vec<f64> = ts.iter().map(|t| 0.2 * (1.0 - (-t / 4.0).exp())).collect();

    let ax = fig.axes_mut(main)?;
    ax.plot(&ts, &volts)?;
    ax.set_xlabel("time (s)");
    ax.set_ylabel("voltage (V)");
    let ax = fig.axes_mut(twin)?;
    ax.plot(&ts, &amps)?;
    ax.set_ylabel("current (A)");

    embed_xlabel(&mut fig, main, XLabelAlign::Top)?;
    embed_ylabel(&mut fig, main, YLabelAlign::Right)?;
    embed_ylabel(&mut fig, twin, YLabelAlign::Left)?;

    let out = std::path::PathBuf::from("target/out/embed_padding.png");
    fig.render_to_png(&out)?;
    println!("Wrote {}", out.display());
    Ok(())
}
