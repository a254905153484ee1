//! Hierarchy error types.

use medistock_shared::AppError;
use thiserror::Error;

/// Structural violations found while building a tree.
///
/// Orphaned parent references are not errors; they are promoted to roots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Two input records share the same id.
    #[error("Duplicate node id: {id}")]
    DuplicateId {
        /// The repeated id.
        id: i64,
    },

    /// A node is its own ancestor.
    #[error("Cyclic parent chain through node {id}")]
    Cycle {
        /// A node on the cycle.
        id: i64,
    },
}

impl TreeError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "DUPLICATE_NODE_ID",
            Self::Cycle { .. } => "CYCLIC_HIERARCHY",
        }
    }
}

impl From<TreeError> for AppError {
    fn from(err: TreeError) -> Self {
        Self::Structural(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TreeError::DuplicateId { id: 1 }.error_code(), "DUPLICATE_NODE_ID");
        assert_eq!(TreeError::Cycle { id: 1 }.error_code(), "CYCLIC_HIERARCHY");
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = TreeError::DuplicateId { id: 4 }.into();
        assert_eq!(err.error_code(), "STRUCTURAL_VIOLATION");
        assert_eq!(err.to_string(), "Structural violation: Duplicate node id: 4");
    }
}
