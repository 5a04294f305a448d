// File: crates/figpolish-core/src/grid.rs
// Summary: Tick position helpers (linear spacing, multiples of a step, rounding).

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Round half to even at `decimals` places.
pub fn round_to(v: f64, decimals: u32) -> f64 {
    let p = 10f64.powi(decimals as i32);
    let r = (v * p).round_ties_even() / p;
    if r == 0.0 { 0.0 } else { r }
}

/// Upper bound on the ticks one call to [`multiples_in`] produces.
pub const MAX_TICKS: f64 = 10_000.0;

/// 2^53: beyond this, consecutive integers are no longer representable as f64.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// All integer multiples of `step` inside `[lo, hi]` (either order), ascending.
/// Endpoints within a small relative tolerance are included. Ranges holding
/// more than [`MAX_TICKS`] multiples, or multipliers past 2^53, give no ticks.
pub fn multiples_in(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let step = step.abs();
    if !(step > 0.0) || !lo.is_finite() || !hi.is_finite() { return Vec::new(); }
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let eps = 1e-9;
    let first = (lo / step - eps).ceil();
    let last = (hi / step + eps).floor();
    // multipliers must be exact integers and the count bounded
    if !(first.abs() <= MAX_EXACT_INT && last.abs() <= MAX_EXACT_INT) || last < first || last - first > MAX_TICKS {
        return Vec::new();
    }
    (first as i64..=last as i64)
        .map(|k| if k == 0 { 0.0 } else { k as f64 * step })
        .collect()
}

/// 1-2-5 "nice" rounding of a raw step size.
pub fn nice_number(value: f64) -> f64 {
    if value <= 0.0 || !value.is_finite() { return 1.0; }
    let exponent = value.log10().floor();
    let fraction = value / 10f64.powf(exponent);
    let nice = if fraction < 1.5 {
        1.0
    } else if fraction < 3.0 {
        2.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * 10f64.powf(exponent)
}
