//! Euclidean projection onto `{x : lo ≤ x ≤ hi, Σx = total}`.

const MAX_BISECTIONS: u32 = 200;

/// Projects `v` onto the box-bounded hyperplane.
///
/// The projection has the form `x_i = clamp(v_i − τ, lo_i, hi_i)` for the
/// shift `τ` that makes the coordinates sum to `total`. The sum is
/// monotone non-increasing in `τ`, so `τ` is found by bisection.
///
/// Bounds must be feasible (`Σlo ≤ total ≤ Σhi`); otherwise the result is
/// the nearest corner of the box.
#[must_use]
pub fn project_onto_bounded_simplex(v: &[f64], lower: &[f64], upper: &[f64], total: f64) -> Vec<f64> {
    let shifted = |tau: f64| -> Vec<f64> {
        v.iter()
            .zip(lower.iter().zip(upper))
            .map(|(x, (lo, hi))| (x - tau).max(*lo).min(*hi))
            .collect()
    };
    let sum_at = |tau: f64| -> f64 { shifted(tau).iter().sum() };

    // At tau_lo every coordinate sits on its upper bound, at tau_hi on its lower.
    let mut tau_lo = v
        .iter()
        .zip(upper)
        .map(|(x, hi)| x - hi)
        .fold(f64::INFINITY, f64::min)
        - 1.0;
    let mut tau_hi = v
        .iter()
        .zip(lower)
        .map(|(x, lo)| x - lo)
        .fold(f64::NEG_INFINITY, f64::max)
        + 1.0;

    if !tau_lo.is_finite() || !tau_hi.is_finite() {
        return lower.to_vec();
    }

    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (tau_lo + tau_hi);
        if sum_at(mid) > total {
            tau_lo = mid;
        } else {
            tau_hi = mid;
        }
        if tau_hi - tau_lo <= 1e-15 {
            break;
        }
    }

    shifted(0.5 * (tau_lo + tau_hi))
}
