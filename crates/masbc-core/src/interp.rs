//! One-dimensional piecewise-linear interpolation.
//!
//! Queries outside `[xp[0], xp[n - 1]]` return the nearest endpoint value;
//! there is no extrapolation. `xp` must be increasing.

/// Interpolates `fp(xp)` at `x`. Returns `None` when `xp` is empty or the
/// slices differ in length.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> Option<f64> {
    if xp.is_empty() || xp.len() != fp.len() {
        return None;
    }
    let last = xp.len() - 1;
    if x <= xp[0] {
        return Some(fp[0]);
    }
    if x >= xp[last] {
        return Some(fp[last]);
    }

    // Invariant: xp[lo] <= x < xp[hi].
    let mut lo = 0;
    let mut hi = last;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xp[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let span = xp[hi] - xp[lo];
    if span <= 0.0 {
        return Some(fp[lo]);
    }
    let t = (x - xp[lo]) / span;
    Some(fp[lo] + t * (fp[hi] - fp[lo]))
}

/// Interpolates at every point of `xs`. Output length equals `xs.len()`.
pub fn interp_many(xs: &[f64], xp: &[f64], fp: &[f64]) -> Option<Vec<f64>> {
    xs.iter().map(|&x| interp(x, xp, fp)).collect()
}
