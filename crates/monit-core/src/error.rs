//! Error types for monit-core

use crate::kind::ServiceKind;
use thiserror::Error;

/// A notification could not be turned into a [`crate::Document`]
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Markup error reported by the XML reader
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The declared encoding has no known decoder
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Input ended before any element was seen
    #[error("Empty document")]
    Empty,

    /// Input ended while elements were still open
    #[error("Document truncated inside <{0}>")]
    Truncated(String),

    /// Root element is not a notification
    #[error("Unexpected root element <{0}>, expected <monit>")]
    UnexpectedRoot(String),

    /// A field's text does not parse as the field's type
    #[error("Invalid value {value:?} for {field}")]
    InvalidValue { field: String, value: String },
}

/// A generic service record could not be projected onto the requested view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("Service '{service}' is a {actual} service, not a {expected} service")]
    KindMismatch {
        service: String,
        expected: ServiceKind,
        actual: ServiceKind,
    },

    #[error("Service '{service}' has unknown type code {code}")]
    UnknownKind { service: String, code: u32 },

    #[error("Service '{service}' has an out-of-range {field}: {seconds}s + {micros}us")]
    InvalidTimestamp {
        service: String,
        field: &'static str,
        seconds: i64,
        micros: i64,
    },
}

/// Result type alias for decoding
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type alias for projection
pub type ProjectionResult<T> = Result<T, ProjectionError>;
