//! cosmo-math - Numerical building blocks for cosmological embedding
//!
//! This crate provides the mathematics underneath the quasar projection
//! pipeline, kept free of any pipeline state:
//!
//! - **Quadrature** - fixed-step trapezoid and Romberg extrapolation for
//!   definite integrals with expensive integrands
//! - **Triad construction** - orthonormal spatial frames built from a
//!   pointing direction on the celestial sphere
//! - **Vector helpers** - lifting spatial 3-vectors into the 4D embedding
//!   space on top of `nalgebra`
//!
//! # Example
//!
//! ```
//! use cosmo_math::{romberg, trapezoid};
//!
//! let f = |x: f64| x * x;
//! let slow = trapezoid(&f, 0.0, 1.0, 0.001);
//! let fast = romberg(&f, 0.0, 1.0, 5).unwrap();
//! assert!((slow - 1.0 / 3.0).abs() < 1e-6);
//! assert!((fast - 1.0 / 3.0).abs() < 1e-12);
//! ```

pub mod quadrature;
pub mod triad;
pub mod vec;

// Re-export commonly used items
pub use quadrature::{romberg, trapezoid, QuadratureError, ROMBERG_MAX_LEVELS};
pub use triad::{orthonormal_triad, radial_unit_vector, AUX_AXIS_EPSILON};
pub use vec::{spatial, time_axis, with_time};
