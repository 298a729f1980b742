//! ICE candidate sets attached to a media stream
//!
//! The local set is created lazily on the first transport binding and holds
//! a single host candidate for the RTP component. Remote sets are built by
//! the signaling layer and adopted wholesale.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::NegotiationConfig;

/// ICE component of a media stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IceComponent {
    /// RTP media data
    Rtp,
    /// RTCP control channel
    Rtcp,
}

impl IceComponent {
    /// Component ID as used in `a=candidate` lines
    pub fn id(self) -> u32 {
        match self {
            Self::Rtp => 1,
            Self::Rtcp => 2,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Rtp),
            2 => Some(Self::Rtcp),
            _ => None,
        }
    }
}

/// A single ICE candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceCandidate {
    /// Unique candidate identifier
    pub id: String,

    /// Candidate foundation
    pub foundation: String,

    /// Component this candidate applies to
    pub component: IceComponent,

    /// Transport protocol marker (e.g. "udp")
    pub protocol: String,

    /// Candidate priority
    pub priority: u32,

    /// Candidate type marker (e.g. "host")
    pub candidate_type: String,

    /// Candidate generation
    pub generation: u32,

    /// Connection address, empty until bound
    pub address: String,

    /// Connection port, unset until bound
    pub port: Option<u16>,
}

impl IceCandidate {
    /// Create the local host candidate of a freshly bound RTP transport
    pub fn local_rtp<R: Rng + ?Sized>(
        transport_id: &str,
        config: &NegotiationConfig,
        rng: &mut R,
    ) -> Self {
        Self {
            id: format!("{}_candidate_{}", transport_id, rng.gen::<u32>()),
            foundation: "1".to_string(),
            component: IceComponent::Rtp,
            protocol: config.candidate_protocol.clone(),
            priority: config.candidate_priority,
            candidate_type: config.candidate_type.clone(),
            generation: config.candidate_generation,
            address: String::new(),
            port: None,
        }
    }

    /// Value of the `a=candidate` attribute for this candidate
    pub fn to_sdp_value(&self) -> String {
        format!(
            "{} {} {} {} {} {} typ {} generation {}",
            self.foundation,
            self.component.id(),
            self.protocol,
            self.priority,
            self.address,
            self.port.unwrap_or(0),
            self.candidate_type,
            self.generation
        )
    }
}

impl fmt::Display for IceCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "candidate:{}", self.to_sdp_value())
    }
}

/// Candidates of one side of a media stream plus their ICE credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSet {
    ufrag: String,
    pwd: String,
    candidates: Vec<IceCandidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set with known credentials, as received from a peer
    pub fn with_credentials(ufrag: impl Into<String>, pwd: impl Into<String>) -> Self {
        Self {
            ufrag: ufrag.into(),
            pwd: pwd.into(),
            candidates: Vec::new(),
        }
    }

    /// Generate a random ICE username fragment and password
    pub fn generate_ice_auth<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ufrag_len: usize,
        pwd_len: usize,
    ) {
        self.ufrag = random_ice_string(rng, ufrag_len);
        self.pwd = random_ice_string(rng, pwd_len);
    }

    pub fn append(&mut self, candidate: IceCandidate) {
        self.candidates.push(candidate);
    }

    pub fn find_by_component(&self, component: IceComponent) -> Option<&IceCandidate> {
        self.candidates.iter().find(|c| c.component == component)
    }

    pub fn find_by_component_mut(&mut self, component: IceComponent) -> Option<&mut IceCandidate> {
        self.candidates.iter_mut().find(|c| c.component == component)
    }

    pub fn ufrag(&self) -> &str {
        &self.ufrag
    }

    pub fn pwd(&self) -> &str {
        &self.pwd
    }

    pub fn iter(&self) -> impl Iterator<Item = &IceCandidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn random_ice_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
