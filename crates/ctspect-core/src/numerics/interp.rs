//! Piecewise-linear interpolation over a strictly increasing abscissa.
//!
//! The boundary policy is part of the call signature because the pipeline
//! mandates different behavior per table kind: X-ray source spectra are
//! extended along the boundary slope, attenuation tables are clamped to the
//! edge value so extrapolation can never produce negative or unbounded LACs.

/// Behavior for query points outside the tabulated domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Continue the slope of the first/last segment past the table.
    ExtrapolateLinear,
    /// Hold the first/last tabulated value constant past the table.
    ClampToEdge,
}

/// Interpolate `ys` (tabulated over strictly increasing `xs`) at `x`.
///
/// `xs` and `ys` must be the same nonzero length; a single-sample table
/// evaluates to its sole value everywhere under either policy.
pub fn interp_linear(xs: &[f64], ys: &[f64], x: f64, policy: BoundaryPolicy) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(!xs.is_empty());
    debug_assert!(
        xs.windows(2).all(|pair| pair[0] < pair[1]),
        "abscissa must be strictly increasing"
    );

    if xs.len() == 1 {
        return ys[0];
    }

    if policy == BoundaryPolicy::ClampToEdge {
        if x <= xs[0] {
            return ys[0];
        }
        if x >= xs[xs.len() - 1] {
            return ys[ys.len() - 1];
        }
    }

    // Bracket via binary search; out-of-domain queries under the linear
    // policy reuse the first/last segment's slope.
    let hi = match xs.partition_point(|&v| v < x) {
        0 => 1,
        i if i >= xs.len() => xs.len() - 1,
        i => i,
    };
    let lo = hi - 1;

    let slope = (ys[hi] - ys[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + slope * (x - xs[lo])
}

/// Interpolate at every point of `xout`.
pub fn interp_linear_many(xs: &[f64], ys: &[f64], xout: &[f64], policy: BoundaryPolicy) -> Vec<f64> {
    xout.iter()
        .map(|&x| interp_linear(xs, ys, x, policy))
        .collect()
}
