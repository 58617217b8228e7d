//! Maximum drawdown.

/// Largest peak-to-trough decline of a cumulative value path.
///
/// Returns `min_t (C_t − max_{s≤t} C_s) / max_{s≤t} C_s`, a non-positive
/// fraction. The running peak starts at the first value, so a path that
/// only rises returns 0. An empty path returns 0.
///
/// # Example
///
/// ```rust
/// use folio_portfolio::analytics::max_drawdown;
///
/// let dd = max_drawdown(&[1.0, 1.2, 0.9, 1.1]);
/// assert!((dd + 0.25).abs() < 1e-12);
/// ```
#[must_use]
pub fn max_drawdown(cumulative: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst: f64 = 0.0;
    for &value in cumulative {
        peak = peak.max(value);
        if peak != 0.0 {
            worst = worst.min((value - peak) / peak);
        }
    }
    worst
}

/// Maximum drawdown of the growth path `C_t = Π(1 + r_s)` built from
/// per-period returns.
#[must_use]
pub fn max_drawdown_of_returns(returns: &[f64]) -> f64 {
    let mut level = 1.0;
    let path: Vec<f64> = returns
        .iter()
        .map(|r| {
            level *= 1.0 + r;
            level
        })
        .collect();
    max_drawdown(&path)
}
