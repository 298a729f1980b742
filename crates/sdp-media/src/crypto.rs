//! Media level security descriptor negotiation (`a=crypto`, RFC 4568)
//!
//! Descriptors are opaque here; only their presence and equality matter.
//! Once the remote side withdraws its descriptor the stream can no longer be
//! secured, and nothing in this crate turns that back on.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Local and remote security descriptors of one media stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoState {
    local: Option<String>,
    remote: Option<String>,
    securable: bool,
}

impl Default for CryptoState {
    fn default() -> Self {
        Self {
            local: None,
            remote: None,
            securable: true,
        }
    }
}

impl CryptoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor in the local or remote slot.
    ///
    /// Returns true if the stored value changed. A missing remote descriptor
    /// always clears `securable`, whether or not the slot changed.
    pub fn set(&mut self, remote: bool, descriptor: Option<&str>) -> bool {
        let slot = if remote { &mut self.remote } else { &mut self.local };
        let changed = slot.as_deref() != descriptor;
        if changed {
            *slot = descriptor.map(str::to_string);
        }
        if remote && descriptor.is_none() {
            if self.securable {
                debug!("Remote withdrew crypto, media can no longer be secured");
            }
            self.securable = false;
        }
        changed
    }

    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    pub fn remote(&self) -> Option<&str> {
        self.remote.as_deref()
    }

    /// False once a remote descriptor has been withdrawn
    pub fn securable(&self) -> bool {
        self.securable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDES: &str = "1 AES_CM_128_HMAC_SHA1_80 inline:PS1uQCVeeCFCanVmcjkpPywjNWhcYD0mXXtxaVBR";

    #[test]
    fn test_set_reports_changes() {
        let mut crypto = CryptoState::new();
        assert!(crypto.set(false, Some(SDES)));
        assert!(!crypto.set(false, Some(SDES)));
        assert_eq!(crypto.local(), Some(SDES));
        assert_eq!(crypto.remote(), None);

        assert!(crypto.set(true, Some(SDES)));
        assert_eq!(crypto.remote(), Some(SDES));
        assert!(crypto.securable());
    }

    #[test]
    fn test_remote_withdrawal_is_sticky() {
        let mut crypto = CryptoState::new();
        crypto.set(true, Some(SDES));
        assert!(crypto.set(true, None));
        assert!(!crypto.securable());

        // A new remote descriptor does not make the stream securable again
        crypto.set(true, Some(SDES));
        assert!(!crypto.securable());
    }

    #[test]
    fn test_absent_remote_clears_securable_without_change() {
        let mut crypto = CryptoState::new();
        assert!(!crypto.set(true, None));
        assert!(!crypto.securable());
    }

    #[test]
    fn test_local_withdrawal_keeps_securable() {
        let mut crypto = CryptoState::new();
        crypto.set(false, Some(SDES));
        assert!(crypto.set(false, None));
        assert!(crypto.securable());
        assert_eq!(crypto.local(), None);
    }
}
