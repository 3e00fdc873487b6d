use crate::frame::format::ChromaFamily;
use crate::transform::method::{EncodingMethod, PairScheme};

/// Convenience result type used across the crate.
pub type StereoResult<T> = Result<T, StereoError>;

/// Error taxonomy for frame splitting and recombination.
///
/// Every condition is scoped to the frame being processed; none of them is fatal to the caller.
#[derive(thiserror::Error, Debug)]
pub enum StereoError {
    /// The frame's pixel format is not one of the recognized planar YUV layouts.
    #[error("unsupported chroma format: {0}")]
    UnsupportedChromaFormat(String),

    /// The requested transform has no catalogue entry for this chroma family.
    #[error("unsupported method/format combination: {method} on {family}")]
    UnsupportedCombination {
        /// Requested method or pair scheme, in vocabulary form.
        method: String,
        /// Classified chroma family of the frame.
        family: ChromaFamily,
    },

    /// An output frame could not be created.
    #[error("allocation failure: {0}")]
    Allocation(String),

    /// A configuration value was not recognized and a default was substituted.
    #[error("configuration fallback: {key}={value:?} is not recognized, using {fallback}")]
    ConfigFallback {
        /// Configuration key being resolved.
        key: String,
        /// Rejected raw value.
        value: String,
        /// Default that replaces the rejected value.
        fallback: String,
    },

    /// Invalid frame geometry or mismatched frames.
    #[error("validation error: {0}")]
    Validation(String),

    /// File input/output failure.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StereoError {
    /// Build a [`StereoError::UnsupportedChromaFormat`] value.
    pub fn unsupported_chroma(msg: impl Into<String>) -> Self {
        Self::UnsupportedChromaFormat(msg.into())
    }

    /// Build a [`StereoError::UnsupportedCombination`] for a split method.
    pub fn unsupported_method(method: EncodingMethod, family: ChromaFamily) -> Self {
        Self::UnsupportedCombination {
            method: method.as_str().to_owned(),
            family,
        }
    }

    /// Build a [`StereoError::UnsupportedCombination`] for a combine pair scheme.
    pub fn unsupported_scheme(scheme: PairScheme, family: ChromaFamily) -> Self {
        Self::UnsupportedCombination {
            method: scheme.as_str().to_owned(),
            family,
        }
    }

    /// Build a [`StereoError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`StereoError::ConfigFallback`] value.
    pub fn config_fallback(
        key: impl Into<String>,
        value: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self::ConfigFallback {
            key: key.into(),
            value: value.into(),
            fallback: fallback.into(),
        }
    }

    /// Build a [`StereoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StereoError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Return `true` when the error only signals a substituted default.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ConfigFallback { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
