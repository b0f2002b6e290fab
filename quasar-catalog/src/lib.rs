//! quasar-catalog - Source records for the embedding pipeline.
//!
//! A catalogue is loaded from a plain-text registry (one source per line,
//! `ascension_hours declination_degrees redshift`), converted to radians at
//! the boundary, and owned as a flat collection. Raw observed inputs are
//! immutable after load; the derived fields (angular distance, 4D position,
//! 2D projection) are recomputed downstream whenever the cosmological model
//! or the viewing frame changes.

pub mod catalog;
pub mod record;

pub use catalog::{CatalogError, QuasarCatalog};
pub use record::Quasar;
