//! Error handling for the SDP media negotiation library
//!
//! Negotiation itself never fails: conflicting or malformed offers degrade to
//! "unchanged" results. The errors defined here come from the surfaces around
//! it, such as configuration loading and logging setup.

use thiserror::Error;

/// Result type alias for SDP media operations
pub type Result<T> = std::result::Result<T, SdpMediaError>;

/// Error type for SDP media operations
#[derive(Error, Debug)]
pub enum SdpMediaError {
    /// Invalid negotiation configuration
    #[error("Invalid negotiation configuration: {details}")]
    InvalidConfig { details: String },

    /// Configuration could not be (de)serialized
    #[error("Configuration serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Logging subsystem could not be initialized
    #[error("Logging setup failed: {reason}")]
    Logging { reason: String },
}

impl SdpMediaError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new logging setup error
    pub fn logging(reason: impl Into<String>) -> Self {
        Self::Logging {
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by the caller's configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. } | Self::Serialization(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SdpMediaError::invalid_config("ice_pwd_len must be at least 22");
        assert_eq!(
            err.to_string(),
            "Invalid negotiation configuration: ice_pwd_len must be at least 22"
        );

        let err = SdpMediaError::logging("subscriber already installed");
        assert_eq!(err.to_string(), "Logging setup failed: subscriber already installed");
    }

    #[test]
    fn test_config_error_classification() {
        assert!(SdpMediaError::invalid_config("x").is_config_error());
        assert!(!SdpMediaError::logging("x").is_config_error());

        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        assert!(SdpMediaError::from(json_err).is_config_error());
    }
}
