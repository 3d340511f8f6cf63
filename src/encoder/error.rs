//! Encoder error types
//!
//! Defines all errors that can occur while encoding objects for the wire.

use super::profile::Profile;
use thiserror::Error;

/// Errors that can occur while encoding
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The active profile has no converter for this object type
    #[error("Unsupported type: {profile} encoder cannot encode {type_name}")]
    UnsupportedType {
        type_name: &'static str,
        profile: Profile,
    },

    /// NaN and infinities have no JSON representation
    #[error("Non-finite number cannot be encoded: {0}")]
    NonFiniteNumber(f64),

    /// Writing JSON text failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EncodeError {
    pub(crate) fn unsupported(type_name: &'static str, profile: Profile) -> Self {
        EncodeError::UnsupportedType { type_name, profile }
    }
}

/// Result type alias for encoding operations
pub type EncodeResult<T> = Result<T, EncodeError>;
