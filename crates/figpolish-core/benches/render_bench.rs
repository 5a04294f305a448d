use anyhow::Result;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use figpolish_core::{
    format_ticklabels, polish, AxisSelector, Figure, MultipleFormatter, PolishOptions, Style,
};

fn build_figure(n: usize, rows: usize, cols: usize) -> Result<Figure> {
    let (mut fig, ids) = Figure::subplots(&Style::default(), rows, cols)?;
    let xs: Vec<f64> = (0..n).map(|i| i as f64 * 0.01).collect();
    for &id in &ids {
        let ax = fig.axes_mut(id)?;
        let ys: Vec<f64> = xs.iter().map(|x| x.sin() * 10.0 + x * 0.0001).collect();
        ax.plot(&xs, &ys)?;
        ax.set_xlabel("t");
        ax.set_ylabel("y");
    }
    format_ticklabels(&mut fig, &ids, AxisSelector::X, &MultipleFormatter::new(1))?;
    polish(&mut fig, &ids, &PolishOptions::captions())?;
    Ok(fig)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for &n in &[10_000usize, 50_000usize] {
        group.bench_function(format!("polished_{n}"), |b| {
            let fig = build_figure(n, 1, 2).expect("build figure");
            b.iter(|| -> Result<()> {
                let bytes = fig.render_to_png_bytes()?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

fn bench_polish(c: &mut Criterion) {
    c.bench_function("polish_3x3", |b| {
        b.iter(|| -> Result<()> {
            let fig = build_figure(200, 3, 3)?;
            black_box(fig);
            Ok(())
        });
    });
}

criterion_group!(benches, bench_render, bench_polish);
criterion_main!(benches);
