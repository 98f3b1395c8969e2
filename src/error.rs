//! Errors raised while resolving navigation requests.

use bevy::prelude::Entity;
use thiserror::Error;

/// Why a navigation request could not produce a new selection.
///
/// A failed request always leaves the current selection untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("nothing is selected")]
    NoSelection,
    #[error("selected entity {0:?} no longer exists")]
    StaleSelection(Entity),
    #[error("entity {0:?} does not exist")]
    MissingEntity(Entity),
    #[error("selected entity has no parent")]
    NoParent,
    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no well-known node is registered as {0:?}")]
    UnknownWellKnown(String),
    #[error("well-known node {0:?} did not resolve to a live entity")]
    WellKnownUnresolved(String),
}

impl NavigationError {
    /// Failures that correspond to selecting "nothing" and are not worth a warning.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::NoSelection | Self::NoParent)
    }
}
