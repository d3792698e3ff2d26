//! Error types for page navigation.
//!
//! Reaching the start or end of the book is not an error. Those outcomes are
//! reported as [`crate::PageTurn::BeforeStart`] and [`crate::PageTurn::PastEnd`].
//! `PagerError` covers collaborator defects and data-source failures only.

use std::fmt;

/// Fatal navigation error.
#[derive(Debug)]
pub enum PagerError {
    /// The data source lists no components.
    EmptyBook,
    /// Component index is outside the data source's component list.
    ComponentOutOfRange { index: usize, count: usize },
    /// Data source could not supply raw content for a component.
    MissingContent { id: String },
    /// A component reported zero pages after a dimension update.
    DegenerateComponent { index: usize, id: String },
    /// Boundary crossing did not settle within the allowed number of hops.
    CrossingLimit { hops: usize },
    /// Component could not be built from its raw content.
    Component { id: String, reason: String },
    /// Book manifest failed to deserialize.
    Manifest(serde_json::Error),
}

impl fmt::Display for PagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBook => write!(f, "book has no components"),
            Self::ComponentOutOfRange { index, count } => write!(
                f,
                "component index {} out of range (count={})",
                index, count
            ),
            Self::MissingContent { id } => write!(f, "no content for component '{}'", id),
            Self::DegenerateComponent { index, id } => write!(
                f,
                "component '{}' (index {}) reported no pages after measuring",
                id, index
            ),
            Self::CrossingLimit { hops } => {
                write!(f, "page turn did not settle after {} component hops", hops)
            }
            Self::Component { id, reason } => {
                write!(f, "failed to build component '{}': {}", id, reason)
            }
            Self::Manifest(err) => write!(f, "invalid book manifest: {}", err),
        }
    }
}

impl std::error::Error for PagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Manifest(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PagerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Manifest(value)
    }
}

/// Result alias for navigation operations.
pub type Result<T> = std::result::Result<T, PagerError>;
