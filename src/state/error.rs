//! State management-specific error types.

use super::navigation::Category;

/// Errors that can occur during edit session operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Item kind does not belong in the active category
    #[error("Cannot put {kind} item into {category}")]
    KindMismatch {
        kind: &'static str,
        category: Category,
    },

    /// Action path does not lead to an existing group
    #[error("Action path {0} does not resolve to a group")]
    UnresolvedActionPath(String),

    /// Item not found in the active list
    #[error("Item not found: {id}")]
    ItemNotFound { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::KindMismatch {
            kind: "role",
            category: Category::Entities,
        };
        assert!(error.to_string().contains("role"));
        assert!(error.to_string().contains("entities"));

        let error = StateError::UnresolvedActionPath("/g1/missing".to_string());
        assert!(error.to_string().contains("/g1/missing"));

        let error = StateError::ItemNotFound {
            id: "e42".to_string(),
        };
        assert!(error.to_string().contains("Item not found"));
        assert!(error.to_string().contains("e42"));
    }
}
