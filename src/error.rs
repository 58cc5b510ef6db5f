//! Error types for SLQ.

use thiserror::Error;

use crate::ast::NodeType;
use crate::kind::Kind;

/// The main error type for SLQ operations.
#[derive(Debug, Error)]
pub enum SlqError {
    /// The pipeline is malformed (e.g. it has no relation-producing segment).
    #[error("Structural error: {0}")]
    Structural(String),

    /// A walker visitor rejected a node.
    #[error("Visitor failed on {node} node: {message}")]
    Visitor { node: NodeType, message: String },

    /// A numeric kind tag outside the defined set.
    #[error("Invalid kind: {0}")]
    InvalidKind(u16),

    /// Text that does not name any kind.
    #[error("Unknown kind: '{0}'")]
    UnknownKind(String),

    /// A normalizer was handed a value that does not fit the detected kind.
    #[error("Cannot normalize {value} as {kind}: {message}")]
    Normalize {
        kind: Kind,
        value: String,
        message: String,
    },

    /// Native samples from incompatible lanes.
    #[error("Ambiguous samples: {0}")]
    Ambiguous(String),

    /// The dialect has no native type for a kind.
    #[error("Dialect {dialect} does not support kind {kind}")]
    UnsupportedKind { dialect: &'static str, kind: Kind },

    /// A statement was requested that has nothing to generate.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Malformed @handle.table reference.
    #[error("Invalid table handle: '{0}'")]
    InvalidHandle(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SlqError {
    /// Create a structural error.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }

    /// Create a visitor error for the given node type.
    pub fn visitor(node: NodeType, message: impl Into<String>) -> Self {
        Self::Visitor {
            node,
            message: message.into(),
        }
    }

    /// Create a normalization error.
    pub fn normalize(kind: Kind, value: impl ToString, message: impl Into<String>) -> Self {
        Self::Normalize {
            kind,
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Create a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}

impl From<toml::de::Error> for SlqError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for SLQ operations.
pub type SlqResult<T> = Result<T, SlqError>;
