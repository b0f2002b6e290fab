//! Cosmological model constants and their algebraic constraints.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Constraint violations raised by model mutations.
///
/// Every mutation validates the full constraint set before committing, so
/// a rejected update always leaves the previous valid state in place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// `lambda - kappa + omega + alpha` must round to exactly 1.
    #[error("lambda - kappa + omega + alpha = {sum:.5}, expected 1.00000")]
    SumConstraint { sum: f64 },

    /// The matter density must be strictly positive.
    #[error("omega = {omega} violates omega > 0")]
    NonPositiveOmega { omega: f64 },

    /// `(27/4) * lambda * omega^2` must exceed `kappa^3`.
    #[error("(27/4) * lambda * omega^2 = {lhs:.6} does not exceed kappa^3 = {rhs:.6}")]
    DiscriminantConstraint { lhs: f64, rhs: f64 },

    /// A flat model (`kappa == 0`) is only meaningful in comoving space.
    #[error("kappa = 0 requires comoving space to be enabled")]
    FlatWithoutComoving,
}

/// Round half-up to `decimals` places, matching the tolerance the sum
/// constraint is checked at.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale + 0.5).floor() / scale
}

/// The four Friedmann–Lemaître-style constants plus the comoving-space
/// display flag.
///
/// Invariants (checked together, atomically, on every mutation):
/// - `lambda - kappa + omega + alpha == 1` at five decimals
/// - `omega > 0`
/// - `(27/4) * lambda * omega^2 > kappa^3`
/// - `kappa != 0` whenever comoving space is disabled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmoModel {
    lambda: f64,
    omega: f64,
    kappa: f64,
    alpha: f64,
    comoving_space: bool,
}

impl Default for CosmoModel {
    /// The reference model: `(1.2, 0.2, 0.40005, 0.00005)`, comoving
    /// space disabled.
    fn default() -> Self {
        Self {
            lambda: 1.2,
            omega: 0.2,
            kappa: 0.40005,
            alpha: 0.00005,
            comoving_space: false,
        }
    }
}

impl CosmoModel {
    /// Build a model, validating the full constraint set.
    pub fn new(
        lambda: f64,
        omega: f64,
        kappa: f64,
        alpha: f64,
        comoving_space: bool,
    ) -> Result<Self, ModelError> {
        Self::validate(lambda, omega, kappa, alpha, comoving_space)?;
        Ok(Self {
            lambda,
            omega,
            kappa,
            alpha,
            comoving_space,
        })
    }

    fn validate(
        lambda: f64,
        omega: f64,
        kappa: f64,
        alpha: f64,
        comoving_space: bool,
    ) -> Result<(), ModelError> {
        let sum = lambda - kappa + omega + alpha;
        if round_to(sum, 5) != 1.0 {
            return Err(ModelError::SumConstraint { sum });
        }
        if omega <= 0.0 {
            return Err(ModelError::NonPositiveOmega { omega });
        }
        let lhs = (27.0 / 4.0) * lambda * omega * omega;
        let rhs = kappa * kappa * kappa;
        if lhs <= rhs {
            return Err(ModelError::DiscriminantConstraint { lhs, rhs });
        }
        if !comoving_space && kappa == 0.0 {
            return Err(ModelError::FlatWithoutComoving);
        }
        Ok(())
    }

    /// Replace all four constants at once, or leave the model untouched.
    pub fn set_constants(
        &mut self,
        lambda: f64,
        omega: f64,
        kappa: f64,
        alpha: f64,
    ) -> Result<(), ModelError> {
        Self::validate(lambda, omega, kappa, alpha, self.comoving_space)?;
        self.lambda = lambda;
        self.omega = omega;
        self.kappa = kappa;
        self.alpha = alpha;
        Ok(())
    }

    /// Toggle comoving-space display. Disabling it is rejected while the
    /// model is flat, keeping the flat non-comoving state unreachable.
    pub fn set_comoving_space(&mut self, enabled: bool) -> Result<(), ModelError> {
        if !enabled && self.kappa == 0.0 {
            return Err(ModelError::FlatWithoutComoving);
        }
        self.comoving_space = enabled;
        Ok(())
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn comoving_space(&self) -> bool {
        self.comoving_space
    }

    /// The expansion polynomial `lambda*x^4 - kappa*x^2 + omega*x + alpha`.
    pub fn expansion_polynomial(&self, x: f64) -> f64 {
        self.lambda * x.powi(4) - self.kappa * x * x + self.omega * x + self.alpha
    }

    /// The comoving-distance integrand `1 / sqrt(polynomial)`.
    ///
    /// Adversarial constant combinations can drive the polynomial negative
    /// inside the integration interval even though they pass validation;
    /// the resulting NaN is propagated and reported by the solver's
    /// domain-health scan rather than clamped here.
    pub fn integrand_at(&self, x: f64) -> f64 {
        1.0 / self.expansion_polynomial(x).sqrt()
    }
}
