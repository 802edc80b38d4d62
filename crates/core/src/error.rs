use crate::dom::NodeId;
use thiserror::Error;

/// Errors raised by the in-memory document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// Element or attribute name is not a valid XML name.
    #[error("Invalid character in name: {name:?}")]
    InvalidCharacter {
        /// The rejected name
        name: String,
    },
    /// The append would break the tree structure.
    #[error("Hierarchy request error: {reason}")]
    HierarchyRequest {
        /// Why the append was rejected
        reason: String,
    },
    /// An element-only operation was applied to another node kind.
    #[error("Cannot {operation} on a non-element node")]
    NotAnElement {
        /// The attempted operation
        operation: &'static str,
    },
    /// The handle does not belong to this document.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
}

impl DomError {
    /// Create an invalid character error for `name`
    pub fn invalid_character(name: impl Into<String>) -> Self {
        Self::InvalidCharacter { name: name.into() }
    }

    /// Create a hierarchy request error
    pub fn hierarchy_request(reason: impl Into<String>) -> Self {
        Self::HierarchyRequest {
            reason: reason.into(),
        }
    }
}
