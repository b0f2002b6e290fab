//! Numerical quadrature for definite integrals.
//!
//! Two interchangeable strategies over the same interval and integrand:
//!
//! - [`trapezoid`] - fixed-step trapezoidal rule. Deterministic, one
//!   integrand evaluation per step, accuracy bought with small steps.
//! - [`romberg`] - trapezoid refinements with repeated Richardson
//!   extrapolation. Far fewer evaluations for smooth integrands.
//!
//! Both take the integrand as a plain closure; neither inspects the values
//! it accumulates, so an integrand that leaves its domain (for instance a
//! negative radicand under a square root) propagates NaN into the result
//! and the caller is expected to check for it.

use thiserror::Error;

/// Upper bound on the Romberg extrapolation table depth.
///
/// Each level doubles the sample count, so 15 levels already means 2^14
/// intervals at the finest refinement; the bound exists to keep the table
/// on the stack.
pub const ROMBERG_MAX_LEVELS: usize = 15;

/// Errors from the Romberg integrator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuadratureError {
    #[error("romberg level count {0} outside 1..={max}", max = ROMBERG_MAX_LEVELS)]
    LevelsOutOfRange(usize),
}

/// Integrate `f` over `[a, b]` with the trapezoidal rule at a fixed step.
///
/// Interior samples are summed at full weight, the endpoints at half
/// weight, and the total scaled by the step. Evaluation count is
/// `(b - a) / step + 2`.
pub fn trapezoid<F>(f: F, a: f64, b: f64, step: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut interior = 0.0;
    // Each abscissa is computed from the index so rounding drift cannot
    // accumulate across samples.
    let mut k = 1usize;
    loop {
        let x = a + k as f64 * step;
        if x >= b {
            break;
        }
        interior += f(x);
        k += 1;
    }
    (step / 2.0) * (f(a) + f(b)) + interior * step
}

/// Integrate `f` over `[a, b]` by Romberg extrapolation with `levels` rows.
///
/// Row 0 is the two-endpoint trapezoid estimate; each further row halves
/// the step, reusing every previous sample and adding the `2^(j-1)` new
/// midpoints. Richardson extrapolation then sweeps the rows, cancelling
/// the leading error term per sweep. The divisors `4^j - 1` are
/// accumulated into a single factor applied at the end.
///
/// `levels` must lie in `1..=ROMBERG_MAX_LEVELS`; one level degenerates to
/// the plain two-point trapezoid estimate.
pub fn romberg<F>(f: F, a: f64, b: f64, levels: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    if levels == 0 || levels > ROMBERG_MAX_LEVELS {
        return Err(QuadratureError::LevelsOutOfRange(levels));
    }

    let width = b - a;
    // Sample in normalized coordinates so refinement arithmetic stays exact.
    let ff = |x: f64| f(a + width * x);

    let mut table = [0.0f64; ROMBERG_MAX_LEVELS];
    table[0] = 0.5 * (ff(0.0) + ff(1.0));

    let mut step = 1.0f64;
    let mut midpoints = 1usize;
    for level in 1..levels {
        step *= 0.5;
        let mut sum = 0.0;
        for k in 1..=midpoints {
            sum += ff(step * (2 * k - 1) as f64);
        }
        table[level] = step * sum + 0.5 * table[level - 1];
        midpoints *= 2;
    }

    let mut power = 1.0f64;
    let mut divisor = 1.0f64;
    for sweep in 1..levels {
        power *= 4.0;
        divisor *= power - 1.0;
        for k in 0..(levels - sweep) {
            table[k] = power * table[k + 1] - table[k];
        }
    }

    Ok(width * table[0] / divisor)
}
