//! Error types for Feyndraw editing operations.
//!
//! This module provides [`EditError`], returned by every fallible engine
//! operation. Errors are raised before any change is described, so a failed
//! operation never leaves a partial mutation behind.

use thiserror::Error;

use feyndraw_core::{element::ElementKind, identifier::Id};

/// The main error type for Feyndraw editing operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// The referenced element does not exist in its collection.
    #[error("{kind} `{id}` not found")]
    NotFound { kind: ElementKind, id: Id },

    /// A bounded identifier space has no free ids left.
    #[error("identifier space for {0} is exhausted")]
    Exhausted(ElementKind),

    /// The diagram breaks a graph invariant, either on input or after a change.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl EditError {
    pub fn anchor_not_found(id: Id) -> Self {
        Self::NotFound {
            kind: ElementKind::Anchors,
            id,
        }
    }

    pub fn propagator_not_found(id: Id) -> Self {
        Self::NotFound {
            kind: ElementKind::Propagators,
            id,
        }
    }
}
