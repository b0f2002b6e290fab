//! A single catalogued source.

use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

/// One quasar from the registry.
///
/// The observed inputs (ascension, declination, redshift) are fixed at
/// construction; everything the pipeline derives from them lives in the
/// public `Option` fields, `None` until the first full recompute pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quasar {
    /// Right ascension in radians.
    ascension: f64,
    /// Declination in radians.
    declination: f64,
    /// Observed cosmological redshift, non-negative.
    redshift: f64,

    /// Curvature-scaled comoving distance; `None` for a flat model.
    pub angular_distance: Option<f64>,
    /// Embedded position in 4D model space.
    pub position: Option<Vector4<f64>>,
    /// Coordinates on the active viewing plane.
    pub projected: Option<(f64, f64)>,

    /// Viewer selection flag, managed by the owning catalogue.
    pub(crate) selected: bool,
}

impl Quasar {
    /// Create a record from observed values already converted to radians.
    pub fn new(ascension: f64, declination: f64, redshift: f64) -> Self {
        Self {
            ascension,
            declination,
            redshift,
            angular_distance: None,
            position: None,
            projected: None,
            selected: false,
        }
    }

    /// Right ascension in radians.
    pub fn ascension(&self) -> f64 {
        self.ascension
    }

    /// Declination in radians.
    pub fn declination(&self) -> f64 {
        self.declination
    }

    /// Observed redshift.
    pub fn redshift(&self) -> f64 {
        self.redshift
    }

    /// Whether this record is part of the current viewer selection.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// True once every derived field from the last pass was finite.
    pub fn derived_is_finite(&self) -> bool {
        self.angular_distance.map_or(true, f64::is_finite)
            && self.position.map_or(true, |p| p.iter().all(|c| c.is_finite()))
            && self
                .projected
                .map_or(true, |(x, y)| x.is_finite() && y.is_finite())
    }
}
