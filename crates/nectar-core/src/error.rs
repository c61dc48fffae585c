//! Error types for nectar-core

use thiserror::Error;

/// Result type alias for nectar-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in nectar-core
#[derive(Error, Debug)]
pub enum Error {
    /// A requested include has no resolver on its transformer
    #[error("transformer '{transformer}' is missing resolver '{resolver}' for include '{include}'")]
    MissingResolver {
        /// Diagnostic name of the transformer
        transformer: String,
        /// Resolver key the transformer was expected to handle
        resolver: String,
        /// Include name as declared
        include: String,
    },

    /// Caller-supplied include path could not be parsed
    #[error("invalid include path '{path}': {message}")]
    InvalidIncludePath {
        /// The offending path
        path: String,
        /// Description of what's invalid
        message: String,
    },

    /// Include recursion crossed the configured depth limit
    #[error("include depth limit of {limit} exceeded at '{path}'")]
    DepthExceeded {
        /// Configured maximum depth
        limit: usize,
        /// Fully-qualified include path that crossed the limit
        path: String,
    },

    /// A transform or include resolver failed on its own data
    #[error("transform error in '{transformer}': {message}")]
    Transform {
        /// Diagnostic name of the transformer
        transformer: String,
        /// Description of the error
        message: String,
    },

    /// The eager-load collaborator failed
    #[error("eager load error: {message}")]
    EagerLoad {
        /// Description of the error
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Configuration error for a relation the transformer has no resolver for.
    pub fn missing_resolver(transformer: &str, include: &str) -> Self {
        Self::MissingResolver {
            transformer: transformer.to_string(),
            resolver: crate::transformer::resolver_key(include),
            include: include.to_string(),
        }
    }

    /// Data error for a transform or resolver failing on its input.
    pub fn transform(transformer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transform {
            transformer: transformer.into(),
            message: message.into(),
        }
    }

    /// Collaborator error for a failed eager load.
    pub fn eager_load(message: impl Into<String>) -> Self {
        Self::EagerLoad {
            message: message.into(),
        }
    }
}
