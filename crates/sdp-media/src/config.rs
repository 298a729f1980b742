//! Negotiation configuration
//!
//! Holds the policy constants used when negotiating a media stream: the
//! fallback audio formats, the markers stamped on locally generated ICE
//! candidates and the length of the generated ICE credentials.
//!
//! ```rust
//! use rvoip_sdp_media::NegotiationConfig;
//!
//! let config = NegotiationConfig::default()
//!     .with_default_audio_formats(["mulaw", "alaw"])
//!     .with_rfc2833(true);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SdpMediaError};

/// Minimum ICE username fragment length (RFC 8445 section 5.3)
pub const MIN_ICE_UFRAG_LEN: usize = 4;

/// Minimum ICE password length (RFC 8445 section 5.3)
pub const MIN_ICE_PWD_LEN: usize = 22;

/// Policy settings for media stream negotiation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationConfig {
    /// Formats assumed for an audio stream that never negotiated any
    pub default_audio_formats: Vec<String>,

    /// Priority of the locally generated host candidate
    pub candidate_priority: u32,

    /// Generation marker of the locally generated host candidate
    pub candidate_generation: u32,

    /// Transport protocol marker of the local candidate
    pub candidate_protocol: String,

    /// Candidate type marker of the local candidate
    pub candidate_type: String,

    /// Length of the generated ICE username fragment
    pub ice_ufrag_len: usize,

    /// Length of the generated ICE password
    pub ice_pwd_len: usize,

    /// Initial RFC 2833 event support of audio streams
    pub rfc2833_default: bool,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            default_audio_formats: vec!["alaw".to_string(), "mulaw".to_string()],
            candidate_priority: 10,
            candidate_generation: 666,
            candidate_protocol: "udp".to_string(),
            candidate_type: "host".to_string(),
            ice_ufrag_len: 8,
            ice_pwd_len: 24,
            rfc2833_default: false,
        }
    }
}

impl NegotiationConfig {
    /// Load a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the fallback audio formats
    pub fn with_default_audio_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_audio_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Set the local candidate priority
    pub fn with_candidate_priority(mut self, priority: u32) -> Self {
        self.candidate_priority = priority;
        self
    }

    /// Set the local candidate generation marker
    pub fn with_candidate_generation(mut self, generation: u32) -> Self {
        self.candidate_generation = generation;
        self
    }

    /// Set the generated ICE credential lengths
    pub fn with_ice_credential_lengths(mut self, ufrag_len: usize, pwd_len: usize) -> Self {
        self.ice_ufrag_len = ufrag_len;
        self.ice_pwd_len = pwd_len;
        self
    }

    /// Set the initial RFC 2833 support of audio streams
    pub fn with_rfc2833(mut self, enabled: bool) -> Self {
        self.rfc2833_default = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ice_ufrag_len < MIN_ICE_UFRAG_LEN {
            return Err(SdpMediaError::invalid_config(format!(
                "ice_ufrag_len must be at least {}, got {}",
                MIN_ICE_UFRAG_LEN, self.ice_ufrag_len
            )));
        }
        if self.ice_pwd_len < MIN_ICE_PWD_LEN {
            return Err(SdpMediaError::invalid_config(format!(
                "ice_pwd_len must be at least {}, got {}",
                MIN_ICE_PWD_LEN, self.ice_pwd_len
            )));
        }
        if let Some(bad) = self
            .default_audio_formats
            .iter()
            .find(|f| f.is_empty() || f.contains(',') || f.contains(char::is_whitespace))
        {
            return Err(SdpMediaError::invalid_config(format!(
                "invalid default audio format '{}'",
                bad
            )));
        }
        if self.candidate_protocol.is_empty() || self.candidate_type.is_empty() {
            return Err(SdpMediaError::invalid_config(
                "candidate protocol and type markers must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NegotiationConfig::default();
        assert_eq!(config.default_audio_formats, vec!["alaw", "mulaw"]);
        assert_eq!(config.candidate_priority, 10);
        assert_eq!(config.candidate_generation, 666);
        assert_eq!(config.candidate_protocol, "udp");
        assert_eq!(config.candidate_type, "host");
        assert!(!config.rfc2833_default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_short_credentials() {
        let config = NegotiationConfig::default().with_ice_credential_lengths(3, 24);
        assert!(config.validate().is_err());

        let config = NegotiationConfig::default().with_ice_credential_lengths(4, 21);
        assert!(config.validate().is_err());

        let config = NegotiationConfig::default().with_ice_credential_lengths(4, 22);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_formats() {
        let config = NegotiationConfig::default().with_default_audio_formats(["alaw,mulaw"]);
        assert!(config.validate().is_err());

        let config = NegotiationConfig::default().with_default_audio_formats([""]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_partial_override() {
        let config = NegotiationConfig::from_json(r#"{ "candidate_priority": 126 }"#).unwrap();
        assert_eq!(config.candidate_priority, 126);
        assert_eq!(config.candidate_generation, 666);

        let text = config.to_json().unwrap();
        assert_eq!(NegotiationConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn test_json_invalid_values() {
        assert!(NegotiationConfig::from_json(r#"{ "ice_pwd_len": 8 }"#).is_err());
        assert!(NegotiationConfig::from_json("{ not json").is_err());
    }
}
