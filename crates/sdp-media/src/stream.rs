//! Media stream negotiation state
//!
//! A [`MediaStream`] holds everything negotiated for one `m=` line of a call:
//! the format list, ports, attributes, security descriptors and ICE
//! candidates. It is fed every offer and answer for its line, plus the
//! binding notifications of the media transport engine.
//!
//! ```text
//!  offer/answer ──► negotiate() ──► formats::reconcile + ports
//!  transport   ──► on_transport_event() ──► id, local port, candidates
//!  signaling   ◄── export() ◄── attributes, crypto, format parameters
//! ```
//!
//! A stream is not synchronized; each call leg owns its streams and must
//! serialize access to them.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::candidate::{CandidateSet, IceCandidate, IceComponent};
use crate::config::NegotiationConfig;
use crate::crypto::CryptoState;
use crate::event::TransportEvent;
use crate::formats::{self, FormatList, Reconciliation};
use crate::kind::MediaKind;
use crate::params::ParamList;

/// RFC 2833 telephone event support of an audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rfc2833 {
    Disabled,
    Enabled,
    /// Enabled with a negotiated payload type
    Payload(u8),
}

impl Rfc2833 {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl From<bool> for Rfc2833 {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl fmt::Display for Rfc2833 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("false"),
            Self::Enabled => f.write_str("true"),
            Self::Payload(pt) => write!(f, "{}", pt),
        }
    }
}

/// Negotiated state of a single media line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaStream {
    kind: MediaKind,
    transport: String,
    formats: FormatList,
    format: String,
    local_port: Option<u16>,
    remote_port: Option<u16>,
    id: String,
    local_changed: bool,
    modified: bool,
    rfc2833: Rfc2833,
    mappings: String,
    local_attrs: ParamList,
    remote_attrs: ParamList,
    format_params: ParamList,
    crypto: CryptoState,
    local_candidates: Option<CandidateSet>,
    remote_candidates: Option<CandidateSet>,
    config: NegotiationConfig,
}

impl MediaStream {
    /// Create the stream for a media line that just appeared in an offer.
    ///
    /// `formats` is the comma separated format list; its first entry becomes
    /// the selected format.
    pub fn new(
        media: &str,
        transport: &str,
        formats: &str,
        remote_port: Option<u16>,
        local_port: Option<u16>,
    ) -> Self {
        Self::with_config(
            media,
            transport,
            formats,
            remote_port,
            local_port,
            NegotiationConfig::default(),
        )
    }

    /// Create a stream using a specific negotiation configuration
    pub fn with_config(
        media: &str,
        transport: &str,
        formats: &str,
        remote_port: Option<u16>,
        local_port: Option<u16>,
        config: NegotiationConfig,
    ) -> Self {
        let kind = MediaKind::from_media(media);
        let formats = FormatList::parse(formats);
        let format = formats.first().unwrap_or_default().to_string();
        trace!(
            "Creating {} media '{}' formats='{}' rport={:?} lport={:?}",
            kind,
            transport,
            formats,
            remote_port,
            local_port
        );
        Self {
            kind,
            transport: transport.to_string(),
            formats,
            format,
            local_port,
            remote_port,
            id: String::new(),
            local_changed: false,
            modified: false,
            rfc2833: Rfc2833::from(config.rfc2833_default),
            mappings: String::new(),
            local_attrs: ParamList::new(),
            remote_attrs: ParamList::new(),
            format_params: ParamList::new(),
            crypto: CryptoState::new(),
            local_candidates: None,
            remote_candidates: None,
            config,
        }
    }

    /// Apply the format list and ports of a received offer or answer.
    ///
    /// Returns true if anything changed. Rejected format updates leave the
    /// current list in place and still let the ports update.
    pub fn negotiate(
        &mut self,
        offered: &str,
        remote_port: Option<u16>,
        local_port: Option<u16>,
        force: bool,
    ) -> bool {
        let mut changed = false;
        match formats::reconcile(&self.formats, offered, force) {
            Reconciliation::Accepted(list) => {
                self.format = list.first().unwrap_or_default().to_string();
                self.formats = list;
                debug!("Media '{}' now using format '{}'", self.kind, self.format);
                changed = true;
            }
            Reconciliation::RejectedSingle | Reconciliation::RejectedDisjoint => {
                debug!(
                    "Media '{}' kept formats '{}' after policy rejection",
                    self.kind, self.formats
                );
            }
            Reconciliation::Unchanged => {}
        }
        if self.update_ports(remote_port, local_port) {
            changed = true;
        }
        changed
    }

    /// Update the bound ports; `None` leaves a port untouched.
    ///
    /// A different local port also marks the stream as locally changed.
    pub fn update_ports(&mut self, remote_port: Option<u16>, local_port: Option<u16>) -> bool {
        let mut changed = false;
        if let Some(port) = remote_port {
            if self.remote_port != Some(port) {
                self.remote_port = Some(port);
                changed = true;
            }
        }
        if let Some(port) = local_port {
            if self.local_port != Some(port) {
                self.local_port = Some(port);
                self.local_changed = true;
                changed = true;
            }
        }
        changed
    }

    /// Apply a transport binding notification.
    ///
    /// The first notification creates the local candidate set, with fresh
    /// ICE credentials and one host candidate for the RTP component; later
    /// ones only move that candidate to the reported address and port.
    pub fn on_transport_event(&mut self, event: &TransportEvent, pick_format: bool) {
        self.on_transport_event_with_rng(event, pick_format, &mut rand::thread_rng());
    }

    /// [`on_transport_event`](Self::on_transport_event) with an explicit random source
    pub fn on_transport_event_with_rng<R: Rng + ?Sized>(
        &mut self,
        event: &TransportEvent,
        pick_format: bool,
        rng: &mut R,
    ) {
        if let Some(id) = &event.id {
            self.id = id.clone();
        }
        if let Some(port) = event.local_port {
            self.local_port = Some(port);
        }
        if pick_format {
            if let Some(format) = &event.format {
                self.format = format.clone();
                let started = FormatList::parse(format);
                if self.formats != started && event.remote_bound() {
                    debug!("Choosing started '{}' format '{}'", self.kind, format);
                    self.formats = started;
                }
            }
        }

        if self.local_candidates.is_none() {
            let mut set = CandidateSet::new();
            set.generate_ice_auth(rng, self.config.ice_ufrag_len, self.config.ice_pwd_len);
            set.append(IceCandidate::local_rtp(&self.id, &self.config, rng));
            trace!("Created local candidates for '{}' media id '{}'", self.kind, self.id);
            self.local_candidates = Some(set);
        }

        if let Some(set) = self.local_candidates.as_mut() {
            if set.find_by_component(IceComponent::Rtp).is_none() {
                warn!(
                    "Local candidates of '{}' media lost their RTP candidate, recreating it",
                    self.kind
                );
                set.append(IceCandidate::local_rtp(&self.id, &self.config, rng));
            }
            if let Some(candidate) = set.find_by_component_mut(IceComponent::Rtp) {
                candidate.address = event.local_ip.clone().unwrap_or_default();
                candidate.port = self.local_port;
            }
        }
    }

    /// Apply a transport binding notification given as raw engine fields
    pub fn on_transport_params(&mut self, params: &ParamList, pick_format: bool) {
        self.on_transport_event(&TransportEvent::from_params(params), pick_format);
    }

    /// Add or replace a local or remote attribute.
    ///
    /// `append` keeps existing values under the same name; otherwise they
    /// are all replaced by the new one. Empty names are ignored.
    pub fn set_attribute(&mut self, remote: bool, name: &str, value: &str, append: bool) {
        if name.is_empty() {
            return;
        }
        let attrs = if remote {
            &mut self.remote_attrs
        } else {
            &mut self.local_attrs
        };
        self.modified = true;
        if append {
            attrs.add(name, value);
        } else {
            attrs.set(name, value);
        }
    }

    /// Set the parameters of a format, or clear them when `value` is `None`
    pub fn set_format_param(&mut self, format: &str, value: Option<&str>) {
        if format.is_empty() {
            return;
        }
        match value {
            Some(value) => self.format_params.set(format, value),
            None => {
                self.format_params.clear(format);
            }
        }
        self.modified = true;
    }

    /// Store the local or remote security descriptor.
    ///
    /// A missing remote descriptor makes the stream permanently unsecurable.
    pub fn set_crypto(&mut self, remote: bool, descriptor: Option<&str>) {
        if self.crypto.set(remote, descriptor) {
            self.modified = true;
        }
    }

    /// Install a new local or remote candidate set, dropping the previous one
    pub fn replace_candidates(&mut self, remote: bool, candidates: Option<CandidateSet>) {
        let slot = if remote {
            &mut self.remote_candidates
        } else {
            &mut self.local_candidates
        };
        if let Some(old) = std::mem::replace(slot, candidates) {
            trace!(
                "Released {} {} candidate(s) of '{}' media",
                old.len(),
                if remote { "remote" } else { "local" },
                self.kind
            );
        }
    }

    pub fn set_mappings(&mut self, mappings: impl Into<String>) {
        self.mappings = mappings.into();
    }

    pub fn set_rfc2833(&mut self, rfc2833: impl Into<Rfc2833>) {
        self.rfc2833 = rfc2833.into();
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn set_local_changed(&mut self, changed: bool) {
        self.local_changed = changed;
    }

    pub fn kind(&self) -> &MediaKind {
        &self.kind
    }

    pub fn is_audio(&self) -> bool {
        self.kind.is_audio()
    }

    pub fn is_video(&self) -> bool {
        self.kind.is_video()
    }

    /// Suffix appended to exported parameter names
    pub fn suffix(&self) -> String {
        self.kind.suffix()
    }

    pub fn transport(&self) -> &str {
        &self.transport
    }

    pub fn format_list(&self) -> &FormatList {
        &self.formats
    }

    /// Comma joined format list
    pub fn formats(&self) -> String {
        self.formats.join()
    }

    /// Currently selected format, empty if none
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn local_port(&self) -> Option<u16> {
        self.local_port
    }

    pub fn remote_port(&self) -> Option<u16> {
        self.remote_port
    }

    /// Identifier assigned by the transport engine, empty until bound
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn local_changed(&self) -> bool {
        self.local_changed
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn securable(&self) -> bool {
        self.crypto.securable()
    }

    pub fn rfc2833(&self) -> Rfc2833 {
        self.rfc2833
    }

    pub fn mappings(&self) -> &str {
        &self.mappings
    }

    pub fn local_attrs(&self) -> &ParamList {
        &self.local_attrs
    }

    pub fn remote_attrs(&self) -> &ParamList {
        &self.remote_attrs
    }

    pub fn format_params(&self) -> &ParamList {
        &self.format_params
    }

    pub fn local_crypto(&self) -> Option<&str> {
        self.crypto.local()
    }

    pub fn remote_crypto(&self) -> Option<&str> {
        self.crypto.remote()
    }

    pub fn local_candidates(&self) -> Option<&CandidateSet> {
        self.local_candidates.as_ref()
    }

    pub fn remote_candidates(&self) -> Option<&CandidateSet> {
        self.remote_candidates.as_ref()
    }

    pub fn config(&self) -> &NegotiationConfig {
        &self.config
    }
}
