//! Catalogue collection and plain-text registry parsing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::record::Quasar;

/// Hours of right ascension per radian conversion factor.
const RADIANS_PER_HOUR: f64 = std::f64::consts::PI / 12.0;
/// Degrees of declination per radian conversion factor.
const RADIANS_PER_DEGREE: f64 = std::f64::consts::PI / 180.0;

/// Errors raised while loading a registry file.
///
/// Any malformed line aborts the load of that file; the caller never sees
/// a partially parsed record.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("line {line}: expected 3 fields (ascension declination redshift), found {found}")]
    MissingFields { line: usize, found: usize },

    #[error("line {line}: {field} value {value:?} is not a number")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("error reading registry: {0}")]
    Io(#[from] std::io::Error),
}

/// The loaded catalogue: owns every record plus the registry-wide
/// statistics and selection bookkeeping that travel with it.
#[derive(Debug, Clone)]
pub struct QuasarCatalog {
    quasars: Vec<Quasar>,
    ascension_max_hours: f64,
    selected_count: usize,
    multiple_selection: bool,
}

impl Default for QuasarCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl QuasarCatalog {
    /// Empty catalogue with multiple selection enabled.
    pub fn new() -> Self {
        Self {
            quasars: Vec::new(),
            ascension_max_hours: 0.0,
            selected_count: 0,
            multiple_selection: true,
        }
    }

    /// Build a catalogue from records already converted to radians.
    pub fn from_records(quasars: Vec<Quasar>) -> Self {
        let ascension_max_hours = quasars
            .iter()
            .map(|q| q.ascension() / RADIANS_PER_HOUR)
            .fold(0.0, f64::max);
        Self {
            quasars,
            ascension_max_hours,
            ..Self::new()
        }
    }

    /// Parse a registry from any buffered reader.
    ///
    /// One record per line, three whitespace-separated decimals in the
    /// order `ascension_hours declination_degrees redshift`. Ascension and
    /// declination are converted to radians here; the raw maximum
    /// ascension (hours) is tracked for the renderer's reference curves.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CatalogError> {
        let mut quasars = Vec::new();
        let mut ascension_max_hours = 0.0f64;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                return Err(CatalogError::MissingFields {
                    line: number,
                    found: fields.len(),
                });
            }

            let names = ["ascension", "declination", "redshift"];
            let mut values = [0.0f64; 3];
            for (slot, (&field, &name)) in values
                .iter_mut()
                .zip(fields.iter().zip(names.iter()))
            {
                *slot = field
                    .parse()
                    .map_err(|_| CatalogError::InvalidNumber {
                        line: number,
                        field: name,
                        value: field.to_string(),
                    })?;
            }

            let [ascension_hours, declination_degrees, redshift] = values;
            ascension_max_hours = ascension_max_hours.max(ascension_hours);
            quasars.push(Quasar::new(
                ascension_hours * RADIANS_PER_HOUR,
                declination_degrees * RADIANS_PER_DEGREE,
                redshift,
            ));
        }

        log::debug!(
            "registry parsed: {} records, max ascension {:.4}h",
            quasars.len(),
            ascension_max_hours
        );

        Ok(Self {
            quasars,
            ascension_max_hours,
            ..Self::new()
        })
    }

    /// Parse a registry file from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.quasars.len()
    }

    /// True when no registry has been loaded.
    pub fn is_empty(&self) -> bool {
        self.quasars.is_empty()
    }

    /// A record by index.
    pub fn get(&self, index: usize) -> Option<&Quasar> {
        self.quasars.get(index)
    }

    /// Iterate over all records.
    pub fn iter(&self) -> impl Iterator<Item = &Quasar> {
        self.quasars.iter()
    }

    /// Records matching a predicate.
    pub fn filter<F>(&self, predicate: F) -> Vec<&Quasar>
    where
        F: Fn(&Quasar) -> bool,
    {
        self.quasars.iter().filter(|q| predicate(q)).collect()
    }

    /// Mutable access for the recompute passes. Raw observed inputs stay
    /// immutable; only derived fields are writable through the records.
    pub fn records_mut(&mut self) -> &mut [Quasar] {
        &mut self.quasars
    }

    /// Largest ascension seen in the registry, in raw hours.
    pub fn ascension_max_hours(&self) -> f64 {
        self.ascension_max_hours
    }

    // ---- selection bookkeeping ----

    /// Number of currently selected records.
    pub fn selected_count(&self) -> usize {
        self.selected_count
    }

    /// Whether more than one record may be selected at a time.
    pub fn multiple_selection(&self) -> bool {
        self.multiple_selection
    }

    /// Switch between multiple and single selection. Dropping to single
    /// selection clears any wider selection already made.
    pub fn set_multiple_selection(&mut self, enabled: bool) {
        if !enabled && self.selected_count > 1 {
            self.clear_selection();
        }
        self.multiple_selection = enabled;
    }

    /// Select or deselect one record. With single selection active,
    /// selecting a record deselects every other one. Returns `false` if
    /// the index is out of range.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> bool {
        if index >= self.quasars.len() {
            return false;
        }
        if selected && !self.multiple_selection {
            self.clear_selection();
        }
        let record = &mut self.quasars[index];
        if record.selected != selected {
            record.selected = selected;
            if selected {
                self.selected_count += 1;
            } else {
                self.selected_count -= 1;
            }
        }
        true
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        for q in &mut self.quasars {
            q.selected = false;
        }
        self.selected_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const REGISTRY: &str = "12.0 0.0 1.0\n6.0 45.0 0.5\n23.5 -89.9 3.2\n";

    #[test]
    fn parses_whitespace_registry() {
        let catalog = QuasarCatalog::from_reader(REGISTRY.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);

        let first = catalog.get(0).unwrap();
        assert_relative_eq!(first.ascension(), PI, epsilon = 1e-12);
        assert_relative_eq!(first.declination(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(first.redshift(), 1.0, epsilon = 1e-12);

        let second = catalog.get(1).unwrap();
        assert_relative_eq!(second.ascension(), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(second.declination(), PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn tracks_max_ascension_in_hours() {
        let catalog = QuasarCatalog::from_reader(REGISTRY.as_bytes()).unwrap();
        assert_relative_eq!(catalog.ascension_max_hours(), 23.5, epsilon = 1e-12);
    }

    #[test]
    fn short_line_aborts_the_load() {
        let err = QuasarCatalog::from_reader("12.0 0.0 1.0\n6.0 45.0\n".as_bytes()).unwrap_err();
        match err {
            CatalogError::MissingFields { line, found } => {
                assert_eq!(line, 2);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_token_aborts_the_load() {
        let err =
            QuasarCatalog::from_reader("12.0 north 1.0\n".as_bytes()).unwrap_err();
        match err {
            CatalogError::InvalidNumber { line, field, value } => {
                assert_eq!(line, 1);
                assert_eq!(field, "declination");
                assert_eq!(value, "north");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extra_columns_are_ignored() {
        // Registries sometimes carry trailing annotations; only the first
        // three fields are meaningful.
        let catalog =
            QuasarCatalog::from_reader("1.0 2.0 3.0 extra tokens\n".as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_relative_eq!(catalog.get(0).unwrap().redshift(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn selection_count_follows_toggles() {
        let mut catalog = QuasarCatalog::from_reader(REGISTRY.as_bytes()).unwrap();
        assert_eq!(catalog.selected_count(), 0);

        assert!(catalog.set_selected(0, true));
        assert!(catalog.set_selected(2, true));
        assert_eq!(catalog.selected_count(), 2);

        // Re-selecting is a no-op on the count.
        assert!(catalog.set_selected(0, true));
        assert_eq!(catalog.selected_count(), 2);

        assert!(catalog.set_selected(0, false));
        assert_eq!(catalog.selected_count(), 1);
        assert!(!catalog.set_selected(99, true));

        catalog.clear_selection();
        assert_eq!(catalog.selected_count(), 0);
        assert!(catalog.iter().all(|q| !q.is_selected()));
    }

    #[test]
    fn single_selection_keeps_at_most_one() {
        let mut catalog = QuasarCatalog::from_reader(REGISTRY.as_bytes()).unwrap();
        catalog.set_selected(0, true);
        catalog.set_selected(1, true);
        catalog.set_multiple_selection(false);
        assert_eq!(catalog.selected_count(), 0);

        catalog.set_selected(1, true);
        catalog.set_selected(2, true);
        assert_eq!(catalog.selected_count(), 1);
        assert!(catalog.get(2).unwrap().is_selected());
        assert!(!catalog.get(1).unwrap().is_selected());
    }

    #[test]
    fn empty_registry_is_fine() {
        let catalog = QuasarCatalog::from_reader("".as_bytes()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.ascension_max_hours(), 0.0);
    }
}
