//! Error types for ObjectId construction and decoding.

use thiserror::Error;

/// Errors that can occur when constructing an ObjectId.
///
/// Construction is the single checkpoint: every accepted input shape is
/// either turned into exactly 12 bytes or rejected with one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObjectIdError {
    /// A byte buffer did not hold exactly 12 bytes.
    #[error("expected a buffer of {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A string was neither 12 characters nor 24 hex characters long.
    #[error("expected a string of 12 bytes or 24 hex characters, got {len} characters")]
    InvalidStringLength { len: usize },

    /// A 12-character string did not encode to 12 UTF-8 bytes.
    #[error("12-character string must encode to 12 bytes, got {byte_len}")]
    InvalidLegacyString { byte_len: usize },

    /// An id-like value produced a hex form that did not decode to 12 bytes.
    #[error("id-like value decoded to {actual} bytes, expected 12")]
    InvalidIdLike { actual: usize },

    /// A 24-character string contained non-hex characters.
    #[error("invalid hex string: {0:?}")]
    InvalidHex(String),

    /// Base64 input could not be decoded.
    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}

impl ObjectIdError {
    /// Returns true if the input had the wrong shape or length.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            ObjectIdError::InvalidLength { .. }
                | ObjectIdError::InvalidStringLength { .. }
                | ObjectIdError::InvalidLegacyString { .. }
                | ObjectIdError::InvalidIdLike { .. }
        )
    }

    /// Returns true if the input had a plausible shape but bad content.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ObjectIdError::InvalidHex(_) | ObjectIdError::InvalidBase64(_)
        )
    }
}

impl From<base64::DecodeError> for ObjectIdError {
    fn from(err: base64::DecodeError) -> Self {
        ObjectIdError::InvalidBase64(err.to_string())
    }
}
