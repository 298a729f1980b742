//! Transport binding notifications
//!
//! The media transport engine reports a local binding as a flat parameter
//! list. [`TransportEvent`] is the typed view of the fields the negotiator
//! understands; unknown fields are ignored.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::params::ParamList;

/// A local transport binding reported by the media engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportEvent {
    /// Identifier assigned by the transport engine (`id` or `rtpid`)
    pub id: Option<String>,

    /// Locally bound port (`localport`)
    pub local_port: Option<u16>,

    /// Locally bound address (`localip`)
    pub local_ip: Option<String>,

    /// Format the engine started with (`format`)
    pub format: Option<String>,

    /// Remote port, when the remote side is already bound (`remoteport`)
    pub remote_port: Option<u16>,
}

impl TransportEvent {
    pub fn new(id: impl Into<String>, local_ip: impl Into<String>, local_port: u16) -> Self {
        Self {
            id: Some(id.into()),
            local_port: Some(local_port),
            local_ip: Some(local_ip.into()),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_remote_port(mut self, port: u16) -> Self {
        self.remote_port = Some(port);
        self
    }

    /// Build the event from the engine's parameter list.
    ///
    /// Numeric fields that fail to parse are treated as absent.
    pub fn from_params(params: &ParamList) -> Self {
        let text = |name: &str| params.get(name).filter(|v| !v.is_empty()).map(str::to_string);
        Self {
            id: text("id").or_else(|| text("rtpid")),
            local_port: parse_field(params, "localport"),
            local_ip: text("localip"),
            format: text("format"),
            remote_port: parse_field(params, "remoteport"),
        }
    }

    /// True if the event shows the remote side already bound
    pub fn remote_bound(&self) -> bool {
        self.remote_port.map_or(false, |p| p > 0)
    }
}

fn parse_field<T: FromStr>(params: &ParamList, name: &str) -> Option<T> {
    let raw = params.get(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("Ignoring unparsable transport field {}='{}'", name, raw);
            None
        }
    }
}
