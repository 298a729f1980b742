//! SDP media stream negotiation for the rvoip stack.
//!
//! This crate keeps the per `m=` line state of a call during RFC 3264
//! offer/answer exchanges: the format list, bound ports, attributes,
//! SDES security descriptors and the locally generated ICE candidates.
//! Parsing and writing full session descriptions is left to the signaling
//! layer, which feeds [`MediaStream`] and consumes its exported view.
//!
//! ```rust
//! use rvoip_sdp_media::{MediaStream, TransportEvent};
//!
//! let mut stream = MediaStream::new("audio", "RTP/AVP", "alaw,mulaw,g729", None, None);
//!
//! // The answer narrows the offered formats
//! assert!(stream.negotiate("g729,alaw", Some(40000), None, false));
//! assert_eq!(stream.format(), "g729");
//!
//! // The media engine bound the local side
//! stream.on_transport_event(&TransportEvent::new("rtp-1", "192.168.0.10", 30000), true);
//!
//! let params = stream.export(true);
//! assert_eq!(params.get("formats"), Some("g729,alaw"));
//! assert_eq!(params.get("rtp_port"), Some("40000"));
//! ```

// Error handling
pub mod error;

// Configuration and logging setup
pub mod config;
pub mod logging;

// Leaf components
pub mod candidate;
pub mod crypto;
pub mod formats;
pub mod kind;
pub mod params;

// Transport binding notifications
pub mod event;

// Media stream and its exported view
pub mod export;
pub mod stream;

// Public exports
pub use candidate::{CandidateSet, IceCandidate, IceComponent};
pub use config::NegotiationConfig;
pub use crypto::CryptoState;
pub use error::{Result, SdpMediaError};
pub use event::TransportEvent;
pub use formats::{reconcile, FormatList, Reconciliation};
pub use kind::MediaKind;
pub use logging::{init_negotiation_logging, negotiation_filter};
pub use params::ParamList;
pub use stream::{MediaStream, Rfc2833};

/// Re-export of common types and functions
pub mod prelude {
    pub use super::{
        CandidateSet, FormatList, IceCandidate, IceComponent, MediaKind, MediaStream,
        NegotiationConfig, ParamList, Reconciliation, Result, Rfc2833, SdpMediaError,
        TransportEvent,
    };
}
