//! The owned pipeline state and its update entry point.
//!
//! All shared state lives in one value, no process-wide statics: the
//! cosmological model, the viewing angles and the frame derived from
//! them, the active plane selector, the integrator choice, the catalogue,
//! and the ready-to-render flag. Collaborators hold the context, mutate
//! it through the fallible setters, and call [`update`] with the scope
//! that matches what changed.
//!
//! [`update`]: CosmologicalContext::update

use serde::{Deserialize, Serialize};

use quasar_catalog::{Quasar, QuasarCatalog};

use crate::frame::{ProjectionFrame, ViewAngles};
use crate::model::{CosmoModel, ModelError};
use crate::solver::{self, DomainHealth, IntegrationMode};
use crate::view::{ViewSelector, ViewSelectorError};

/// What an update pass has to recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateScope {
    /// Model constants changed: angular distances, positions, projections.
    All,
    /// Only the viewing angles or plane selector changed: projections.
    View,
    /// Display options changed: nothing to recompute, just re-render.
    Viewer,
}

/// The complete pipeline state.
#[derive(Debug, Clone, Default)]
pub struct CosmologicalContext {
    model: CosmoModel,
    angles: ViewAngles,
    frame: ProjectionFrame,
    selector: ViewSelector,
    mode: IntegrationMode,
    catalog: QuasarCatalog,
    something_to_show: bool,
    health: DomainHealth,
}

impl CosmologicalContext {
    /// Context with the reference model, origin viewing angles, the first
    /// viewing plane, fast integration, and an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- mutations ----

    /// Replace the cosmological constants. On rejection the previous
    /// constants, and everything displayed from them, stay untouched.
    pub fn set_constants(
        &mut self,
        lambda: f64,
        omega: f64,
        kappa: f64,
        alpha: f64,
    ) -> Result<(), ModelError> {
        self.model.set_constants(lambda, omega, kappa, alpha)
    }

    /// Toggle comoving-space display.
    pub fn set_comoving_space(&mut self, enabled: bool) -> Result<(), ModelError> {
        self.model.set_comoving_space(enabled)
    }

    /// Set the viewing angles (hours, degrees, hours) and rebuild the
    /// projection frame.
    pub fn set_view_angles(&mut self, ra1_hours: f64, dec1_degrees: f64, beta_hours: f64) {
        self.angles = ViewAngles::from_user(ra1_hours, dec1_degrees, beta_hours);
        self.frame = ProjectionFrame::from_angles(&self.angles);
    }

    /// Choose one of the six viewing planes.
    pub fn set_view_selector(&mut self, selector: u8) -> Result<(), ViewSelectorError> {
        self.selector = ViewSelector::new(selector)?;
        Ok(())
    }

    /// Switch between the precise and the fast integrator.
    pub fn set_precision(&mut self, precise: bool) {
        self.mode = if precise {
            IntegrationMode::Precise
        } else {
            IntegrationMode::Fast
        };
    }

    /// Replace the catalogue. Derived fields start empty and the previous
    /// selection is gone with the records that carried it.
    pub fn load_catalogue(&mut self, catalog: QuasarCatalog) {
        log::debug!("catalogue replaced: {} records", catalog.len());
        self.catalog = catalog;
        self.health = DomainHealth::default();
        self.something_to_show = false;
    }

    /// Run one synchronous recompute pass.
    ///
    /// Passes go in dependency order: angular distances, then positions,
    /// then projections. The frame is rebuilt from the current angles
    /// whenever projections are, and the ready-to-render flag is raised by
    /// the projection pass; `Viewer` only tells the renderer to redraw
    /// what is already there.
    pub fn update(&mut self, scope: UpdateScope) {
        match scope {
            UpdateScope::All => {
                solver::recompute_angular_distances(&mut self.catalog, &self.model, self.mode);
                solver::recompute_positions(&mut self.catalog, &self.model, self.mode);
                self.recompute_projections();
                self.health = DomainHealth::scan(&self.catalog);
            }
            UpdateScope::View => {
                self.recompute_projections();
            }
            UpdateScope::Viewer => {}
        }
    }

    fn recompute_projections(&mut self) {
        self.frame = ProjectionFrame::from_angles(&self.angles);
        solver::recompute_projections(&mut self.catalog, &self.frame, self.selector);
        self.something_to_show = true;
    }

    // ---- selection passthrough ----

    /// Select or deselect one record; see [`QuasarCatalog::set_selected`].
    pub fn set_selected(&mut self, index: usize, selected: bool) -> bool {
        self.catalog.set_selected(index, selected)
    }

    /// Deselect every record.
    pub fn clear_selection(&mut self) {
        self.catalog.clear_selection()
    }

    // ---- reads ----

    pub fn model(&self) -> &CosmoModel {
        &self.model
    }

    pub fn view_angles(&self) -> &ViewAngles {
        &self.angles
    }

    pub fn frame(&self) -> &ProjectionFrame {
        &self.frame
    }

    pub fn view_selector(&self) -> ViewSelector {
        self.selector
    }

    pub fn integration_mode(&self) -> IntegrationMode {
        self.mode
    }

    pub fn catalog(&self) -> &QuasarCatalog {
        &self.catalog
    }

    /// Iterate over the records with their derived fields.
    pub fn quasars(&self) -> impl Iterator<Item = &Quasar> {
        self.catalog.iter()
    }

    /// True once an update pass has produced drawable projections.
    pub fn something_to_show(&self) -> bool {
        self.something_to_show
    }

    /// Result of the non-finite scan from the last full update.
    pub fn domain_health(&self) -> DomainHealth {
        self.health
    }
}
