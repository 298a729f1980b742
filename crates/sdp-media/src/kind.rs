//! Media kinds
//!
//! The kind of an `m=` line decides the suffix appended to exported keys and
//! whether audio-only behaviour (RFC 2833 events, default formats) applies.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a negotiated media line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    /// Audio, the default kind; exported without a suffix
    Audio,
    /// Video, exported with the `_video` suffix
    Video,
    /// Any other media name, exported with `_<name>`
    Other(String),
}

impl MediaKind {
    /// Derive the kind from an `m=` media name
    pub fn from_media(media: &str) -> Self {
        match media {
            "audio" => Self::Audio,
            "video" => Self::Video,
            other => Self::Other(other.to_string()),
        }
    }

    /// The media name as it appears on the `m=` line
    pub fn name(&self) -> &str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Other(name) => name,
        }
    }

    /// Suffix appended to exported parameter names
    pub fn suffix(&self) -> String {
        match self {
            Self::Audio => String::new(),
            other => format!("_{}", other.name()),
        }
    }

    /// Append the kind suffix to a parameter name
    pub fn suffixed(&self, key: &str) -> String {
        let mut out = String::with_capacity(key.len() + 8);
        out.push_str(key);
        out.push_str(&self.suffix());
        out
    }

    /// Key carrying the RTP payload mappings of this kind
    pub fn mapping_key(&self) -> String {
        self.suffixed("rtp_mapping")
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio)
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video)
    }
}

impl Default for MediaKind {
    fn default() -> Self {
        Self::Audio
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MediaKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_media(s))
    }
}

impl From<&str> for MediaKind {
    fn from(media: &str) -> Self {
        Self::from_media(media)
    }
}
