//! Error types.
//!
//! Nothing in the editor is fatal. Every `Err` below means "the operation
//! was refused and state is unchanged"; callers typically log and carry on.

use thiserror::Error;

/// A state mutation was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// The value could not be coerced to the field's type.
    #[error("field `{field}` expects {expected}, got {got}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    /// Text could not be parsed as a number for an integer-only field.
    #[error("field `{field}` expects a whole number, got {text:?}")]
    InvalidNumber { field: &'static str, text: String },

    /// Positions and scales must be finite.
    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f64 },
}

/// An image could not be turned into a layer handle.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a recognizable image format.
    #[error("unrecognized image format")]
    UnknownFormat,

    /// The format was recognized but decoding failed.
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("i/o error while reading image: {0}")]
    Io(#[from] std::io::Error),

    /// A newer upload for the same slot superseded this one.
    #[error("decode cancelled")]
    Cancelled,

    /// Decoding needs a tokio runtime and none is running.
    #[error("no async runtime available for decoding")]
    NoRuntime,

    /// The decode task panicked or was aborted.
    #[error("decode task failed: {0}")]
    Join(String),
}

/// The host export facility did not produce output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("print facility unavailable")]
    Unavailable,

    #[error("print cancelled by user")]
    Cancelled,

    #[error("print failed: {0}")]
    Failed(String),
}

/// An editor input was refused.
#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
