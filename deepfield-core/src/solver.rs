//! Per-record computation: redshift to comoving distance to embedded 4D
//! position to 2D viewing-plane coordinates.
//!
//! Each pass is a pure function of the model/frame snapshot it is handed
//! and one record's raw inputs; records have no cross-dependencies, so the
//! passes run through `rayon` once a catalogue is large enough to pay for
//! the fan-out.

use nalgebra::Vector4;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use cosmo_math::{radial_unit_vector, romberg, trapezoid, with_time};
use quasar_catalog::{Quasar, QuasarCatalog};

use crate::frame::ProjectionFrame;
use crate::model::CosmoModel;
use crate::view::ViewSelector;

/// Step used by the precise (trapezoid) integrator.
pub const PRECISE_STEP: f64 = 0.01;
/// Romberg table depth used by the fast integrator.
pub const FAST_LEVELS: usize = 6;
/// Catalogue size at which the per-record passes go parallel.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Choice between the two comoving-distance integrators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationMode {
    /// Fixed-step trapezoid at [`PRECISE_STEP`]: slower, deterministic.
    Precise,
    /// Romberg extrapolation at [`FAST_LEVELS`]: far fewer evaluations.
    #[default]
    Fast,
}

/// Comoving distance to a source at `redshift`: the model integrand
/// integrated over `[1/(1+z), 1]`.
pub fn comoving_distance(model: &CosmoModel, redshift: f64, mode: IntegrationMode) -> f64 {
    let lower = 1.0 / (1.0 + redshift);
    match mode {
        IntegrationMode::Precise => {
            trapezoid(|x| model.integrand_at(x), lower, 1.0, PRECISE_STEP)
        }
        // FAST_LEVELS is inside the Romberg bound; a non-finite result is
        // caught by the domain-health scan like any other.
        IntegrationMode::Fast => romberg(|x| model.integrand_at(x), lower, 1.0, FAST_LEVELS)
            .unwrap_or(f64::NAN),
    }
}

fn for_each_record<F>(records: &mut [Quasar], apply: F)
where
    F: Fn(&mut Quasar) + Send + Sync,
{
    if records.len() >= PARALLEL_THRESHOLD {
        records.par_iter_mut().for_each(|q| apply(q));
    } else {
        records.iter_mut().for_each(|q| apply(q));
    }
}

/// Recompute every record's angular distance, `sqrt(|kappa|)` times its
/// comoving distance.
///
/// For a flat model the quantity does not exist and every record's field
/// is cleared instead.
pub fn recompute_angular_distances(
    catalog: &mut QuasarCatalog,
    model: &CosmoModel,
    mode: IntegrationMode,
) {
    if model.kappa() == 0.0 {
        for_each_record(catalog.records_mut(), |q| q.angular_distance = None);
        return;
    }
    let scale = model.kappa().abs().sqrt();
    for_each_record(catalog.records_mut(), |q| {
        q.angular_distance = Some(scale * comoving_distance(model, q.redshift(), mode));
    });
}

fn embedded_position(q: &Quasar, model: &CosmoModel, mode: IntegrationMode) -> Vector4<f64> {
    let radial = radial_unit_vector(q.ascension(), q.declination());
    let kappa = model.kappa();

    if kappa == 0.0 {
        // Flat model, comoving by construction: raw comoving distance, no
        // curvature trigonometry, zero time component.
        let d = comoving_distance(model, q.redshift(), mode);
        return with_time(&(d * radial), 0.0);
    }

    let d = q.angular_distance.unwrap_or(f64::NAN);
    let (radial_factor, time_factor) = if kappa < 0.0 {
        (d.sinh(), d.cosh())
    } else {
        (d.sin(), d.cos())
    };
    let scale = if model.comoving_space() {
        1.0 / kappa.abs().sqrt()
    } else {
        1.0
    };
    with_time(&(scale * radial_factor * radial), scale * time_factor)
}

/// Recompute every record's embedded 4D position from its angular
/// distance (or, for the flat comoving case, its comoving distance).
pub fn recompute_positions(catalog: &mut QuasarCatalog, model: &CosmoModel, mode: IntegrationMode) {
    for_each_record(catalog.records_mut(), |q| {
        q.position = Some(embedded_position(q, model, mode));
    });
}

/// Recompute every record's viewing-plane coordinates by projecting its
/// position onto the selected basis pair. Records that have never been
/// positioned stay unprojected.
pub fn recompute_projections(
    catalog: &mut QuasarCatalog,
    frame: &ProjectionFrame,
    selector: ViewSelector,
) {
    let (a, b) = selector.basis_pair();
    let basis_a = *frame.basis(a);
    let basis_b = *frame.basis(b);
    for_each_record(catalog.records_mut(), |q| {
        q.projected = q.position.map(|p| (p.dot(&basis_a), p.dot(&basis_b)));
    });
}

/// Outcome of the non-finite scan run after a full recompute pass.
///
/// Adversarial constants can drive the integrand's radicand negative
/// inside the integration interval, which poisons distances, positions and
/// projections with NaN. The scan makes that visible instead of letting it
/// propagate silently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainHealth {
    /// Records whose derived fields contain a non-finite value.
    pub poisoned: usize,
    /// Records examined.
    pub total: usize,
}

impl DomainHealth {
    pub fn scan(catalog: &QuasarCatalog) -> Self {
        let poisoned = catalog.iter().filter(|q| !q.derived_is_finite()).count();
        if poisoned > 0 {
            log::warn!(
                "integrand left its domain: {poisoned} of {} records have non-finite derived values",
                catalog.len()
            );
        }
        Self {
            poisoned,
            total: catalog.len(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.poisoned == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::frame::ViewAngles;

    fn one_record_catalog(ascension: f64, declination: f64, redshift: f64) -> QuasarCatalog {
        QuasarCatalog::from_records(vec![Quasar::new(ascension, declination, redshift)])
    }

    #[test]
    fn integrators_agree_on_comoving_distance() {
        // Redshifts whose interval width is a whole number of precise
        // steps, so the fixed-step rule has no partial end panel.
        let model = CosmoModel::default();
        for redshift in [0.25, 1.0, 3.0, 4.0] {
            let precise = comoving_distance(&model, redshift, IntegrationMode::Precise);
            let fast = comoving_distance(&model, redshift, IntegrationMode::Fast);
            assert_relative_eq!(precise, fast, epsilon = 1e-4);
        }
    }

    #[test]
    fn angular_distance_scales_the_comoving_distance() {
        let model = CosmoModel::default();
        let mut catalog = one_record_catalog(1.0, 0.2, 1.0);
        recompute_angular_distances(&mut catalog, &model, IntegrationMode::Fast);

        let expected = model.kappa().sqrt() * comoving_distance(&model, 1.0, IntegrationMode::Fast);
        let got = catalog.get(0).unwrap().angular_distance.unwrap();
        assert_relative_eq!(got, expected, epsilon = 1e-12);
    }

    #[test]
    fn flat_model_clears_angular_distances() {
        let model = CosmoModel::new(0.7, 0.2, 0.0, 0.1, true).unwrap();
        let mut catalog = one_record_catalog(1.0, 0.2, 1.0);
        catalog.records_mut()[0].angular_distance = Some(0.5);

        recompute_angular_distances(&mut catalog, &model, IntegrationMode::Fast);
        assert!(catalog.get(0).unwrap().angular_distance.is_none());
    }

    #[test]
    fn spherical_position_uses_circular_functions() {
        // kappa > 0, comoving space off: (sin d * radial, cos d).
        let model = CosmoModel::default();
        let mode = IntegrationMode::Fast;
        let (ra, dec, z) = (1.3, -0.4, 1.5);
        let mut catalog = one_record_catalog(ra, dec, z);
        recompute_angular_distances(&mut catalog, &model, mode);
        recompute_positions(&mut catalog, &model, mode);

        let d = catalog.get(0).unwrap().angular_distance.unwrap();
        let p = catalog.get(0).unwrap().position.unwrap();
        assert_relative_eq!(p.x, d.sin() * ra.cos() * dec.cos(), epsilon = 1e-12);
        assert_relative_eq!(p.y, d.sin() * ra.sin() * dec.cos(), epsilon = 1e-12);
        assert_relative_eq!(p.z, d.sin() * dec.sin(), epsilon = 1e-12);
        assert_relative_eq!(p.w, d.cos(), epsilon = 1e-12);
    }

    #[test]
    fn hyperbolic_position_uses_hyperbolic_functions() {
        // kappa < 0, comoving space off: (sinh d * radial, cosh d).
        let model = CosmoModel::new(0.5, 0.2, -0.2, 0.1, false).unwrap();
        let mode = IntegrationMode::Fast;
        let (ra, dec, z) = (0.7, 0.3, 0.8);
        let mut catalog = one_record_catalog(ra, dec, z);
        recompute_angular_distances(&mut catalog, &model, mode);
        recompute_positions(&mut catalog, &model, mode);

        let d = catalog.get(0).unwrap().angular_distance.unwrap();
        let p = catalog.get(0).unwrap().position.unwrap();
        assert_relative_eq!(p.x, d.sinh() * ra.cos() * dec.cos(), epsilon = 1e-12);
        assert_relative_eq!(p.w, d.cosh(), epsilon = 1e-12);
    }

    #[test]
    fn comoving_space_scales_by_curvature_radius() {
        let mut model = CosmoModel::default();
        let mode = IntegrationMode::Fast;
        let mut catalog = one_record_catalog(1.3, -0.4, 1.5);

        recompute_angular_distances(&mut catalog, &model, mode);
        recompute_positions(&mut catalog, &model, mode);
        let reference = catalog.get(0).unwrap().position.unwrap();

        model.set_comoving_space(true).unwrap();
        recompute_angular_distances(&mut catalog, &model, mode);
        recompute_positions(&mut catalog, &model, mode);
        let scaled = catalog.get(0).unwrap().position.unwrap();

        let scale = 1.0 / model.kappa().sqrt();
        for i in 0..4 {
            assert_relative_eq!(scaled[i], scale * reference[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn flat_comoving_position_uses_raw_distance() {
        let model = CosmoModel::new(0.7, 0.2, 0.0, 0.1, true).unwrap();
        let mode = IntegrationMode::Precise;
        let (ra, dec, z) = (2.1, 0.6, 1.0);
        let mut catalog = one_record_catalog(ra, dec, z);
        recompute_angular_distances(&mut catalog, &model, mode);
        recompute_positions(&mut catalog, &model, mode);

        let d = comoving_distance(&model, z, mode);
        let p = catalog.get(0).unwrap().position.unwrap();
        assert_relative_eq!(p.x, d * ra.cos() * dec.cos(), epsilon = 1e-12);
        assert_relative_eq!(p.y, d * ra.sin() * dec.cos(), epsilon = 1e-12);
        assert_relative_eq!(p.z, d * dec.sin(), epsilon = 1e-12);
        assert_relative_eq!(p.w, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn projection_is_the_dot_with_the_selected_pair() {
        let model = CosmoModel::default();
        let mode = IntegrationMode::Fast;
        let frame = ProjectionFrame::from_angles(&ViewAngles::from_user(6.0, 45.0, 3.0));
        let mut catalog = one_record_catalog(1.3, -0.4, 1.5);
        recompute_angular_distances(&mut catalog, &model, mode);
        recompute_positions(&mut catalog, &model, mode);

        for number in 1u8..=6 {
            let selector = ViewSelector::new(number).unwrap();
            recompute_projections(&mut catalog, &frame, selector);

            let record = catalog.get(0).unwrap();
            let p = record.position.unwrap();
            let (a, b) = selector.basis_pair();
            let (x, y) = record.projected.unwrap();
            assert_relative_eq!(x, p.dot(frame.basis(a)), epsilon = 1e-12);
            assert_relative_eq!(y, p.dot(frame.basis(b)), epsilon = 1e-12);
        }
    }

    #[test]
    fn unpositioned_records_stay_unprojected() {
        let frame = ProjectionFrame::default();
        let mut catalog = one_record_catalog(0.0, 0.0, 1.0);
        recompute_projections(&mut catalog, &frame, ViewSelector::default());
        assert!(catalog.get(0).unwrap().projected.is_none());
    }

    #[test]
    fn domain_scan_counts_poisoned_records() {
        let model = CosmoModel::default();
        let mode = IntegrationMode::Fast;
        let mut catalog = QuasarCatalog::from_records(vec![
            Quasar::new(1.0, 0.0, 1.0),
            Quasar::new(2.0, 0.5, 2.0),
        ]);
        recompute_angular_distances(&mut catalog, &model, mode);
        recompute_positions(&mut catalog, &model, mode);

        let health = DomainHealth::scan(&catalog);
        assert!(health.is_clean());
        assert_eq!(health.total, 2);

        catalog.records_mut()[1].angular_distance = Some(f64::NAN);
        let health = DomainHealth::scan(&catalog);
        assert_eq!(health.poisoned, 1);
        assert!(!health.is_clean());
    }
}
