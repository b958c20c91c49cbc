use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the floor-plan library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The floor-plan document is structurally malformed.
    ///
    /// `field` is a path into the document such as `graph.edges[3].weight`.
    #[error("invalid floor plan field {field}: {message}")]
    Schema { field: String, message: String },

    /// Floor-plan file could not be located at the given path.
    #[error("floor plan not found at {path}")]
    FloorPlanNotFound { path: PathBuf },

    /// A start or end identifier is not a node of the loaded graph.
    #[error("unknown node: {id}")]
    NodeNotFound { id: String },

    /// Both endpoints exist but no route connects them.
    #[error("no route found between {start} and {goal}")]
    PathNotFound { start: String, goal: String },

    /// A path query arrived before any floor plan was loaded.
    #[error("no floor plan has been loaded")]
    GraphUninitialized,

    /// The search observed its cancellation flag.
    #[error("route search was cancelled")]
    SearchCancelled,

    /// The search ran past its deadline.
    #[error("route search exceeded its deadline after {elapsed_ms}ms")]
    SearchTimedOut { elapsed_ms: u128 },

    /// Two consecutive nodes of a computed path share no edge.
    #[error("no segment connects {from} to {to}")]
    MissingSegment { from: String, to: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a schema error for the given document field.
    pub fn schema(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Schema {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Error::Io(err.into());
        }
        let field = if err.line() == 0 {
            "document".to_string()
        } else {
            format!("document (line {}, column {})", err.line(), err.column())
        };
        Error::Schema {
            field,
            message: err.to_string(),
        }
    }
}
