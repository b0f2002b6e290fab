//! Selection of the 2D viewing plane.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Basis-index pairs for the six viewing planes, in selector order:
/// (E0,E1), (E0,E2), (E0,E3), (E1,E2), (E1,E3), (E2,E3).
const VIEW_PLANES: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Raised for a selector outside 1..=6.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("view selector {0} outside 1..=6")]
pub struct ViewSelectorError(pub u8);

/// One of the six basis-vector pairs a projection plane can be spanned by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSelector(u8);

impl Default for ViewSelector {
    fn default() -> Self {
        Self(1)
    }
}

impl ViewSelector {
    /// Validate a user-facing selector number (1..=6).
    pub fn new(selector: u8) -> Result<Self, ViewSelectorError> {
        if (1..=6).contains(&selector) {
            Ok(Self(selector))
        } else {
            Err(ViewSelectorError(selector))
        }
    }

    /// The user-facing selector number.
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Indices into the projection-frame basis spanning this plane.
    pub fn basis_pair(&self) -> (usize, usize) {
        VIEW_PLANES[(self.0 - 1) as usize]
    }
}
