//! Flat parameter view of a media stream for the signaling layer
//!
//! Every key is suffixed with the media kind suffix (nothing for audio,
//! `_video` for video, `_<name>` otherwise), except the RFC 2833 flag, which
//! only exists for audio, and the `fmtp_` format parameters.
//!
//! | Key                      | Present when                            |
//! |--------------------------|-----------------------------------------|
//! | `media<sfx>`             | always, value `yes`                     |
//! | `formats<sfx>`           | always, see [`MediaStream::fmt_list`]   |
//! | `transport<sfx>`         | always                                  |
//! | `rtp_mapping<sfx>`       | payload mappings were negotiated        |
//! | `rtp_rfc2833`            | audio streams                           |
//! | `rtp_port<sfx>`          | requested, empty if the port is unknown |
//! | `crypto<sfx>`            | a remote descriptor is present          |
//! | `encryption<sfx>`        | the remote sent an `encryption` attr    |
//! | `sdp<sfx>_<attr>`        | one per remote attribute                |
//! | `fmtp_<format>`          | one per format parameter                |

use crate::params::ParamList;
use crate::stream::MediaStream;

impl MediaStream {
    /// Formats to advertise for this stream.
    ///
    /// Falls back to the selected format, then for audio to the configured
    /// default formats.
    pub fn fmt_list(&self) -> Option<String> {
        if !self.format_list().is_empty() {
            return Some(self.formats());
        }
        if !self.format().is_empty() {
            return Some(self.format().to_string());
        }
        if self.is_audio() && !self.config().default_audio_formats.is_empty() {
            return Some(self.config().default_audio_formats.join(","));
        }
        None
    }

    /// Export the negotiated state as an ordered parameter list.
    ///
    /// `put_port` adds the remote RTP port.
    pub fn export(&self, put_port: bool) -> ParamList {
        let kind = self.kind();
        let mut out = ParamList::new();

        out.add(kind.suffixed("media"), "yes");
        out.add(kind.suffixed("formats"), self.fmt_list().unwrap_or_default());
        out.add(kind.suffixed("transport"), self.transport());
        if !self.mappings().is_empty() {
            out.add(kind.mapping_key(), self.mappings());
        }
        if kind.is_audio() {
            out.add("rtp_rfc2833", self.rfc2833().to_string());
        }
        if put_port {
            let port = self.remote_port().map(|p| p.to_string()).unwrap_or_default();
            out.add(kind.suffixed("rtp_port"), port);
        }
        if let Some(crypto) = self.remote_crypto() {
            out.add(kind.suffixed("crypto"), crypto);
        }
        if let Some(encryption) = self.remote_attrs().get("encryption") {
            out.add(kind.suffixed("encryption"), encryption);
        }
        out.extend_prefixed(self.remote_attrs(), &format!("sdp{}_", kind.suffix()));
        out.extend_prefixed(self.format_params(), "fmtp_");
        out
    }
}
