//! Run configuration for the prober.
//!
//! An explicit immutable value passed into `ConfigurationProber::detect`
//! instead of globals: server endpoint, the operator's credentials, and
//! the pacing delay between failed candidates.

use std::time::Duration;

use crate::types::{SignonInfo, ANONYMOUS};

/// Primary credentials at the financial institution.
///
/// Read-only inputs to the prober; never mutated. `org` and `fid` identify
/// the institution itself and are kept even on the anonymous retry.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub org: String,
    pub fid: String,
}

impl Credentials {
    /// Signon block for the primary-credential attempt.
    pub fn signon(&self) -> SignonInfo {
        SignonInfo {
            user_id: self.username.clone(),
            user_pass: self.password.clone(),
            org: self.org.clone(),
            fid: self.fid.clone(),
        }
    }

    /// Signon block for the unauthenticated retry: the anonymous sentinel
    /// replaces user ID and password, institution identifiers stay.
    pub fn anonymous_signon(&self) -> SignonInfo {
        SignonInfo {
            user_id: ANONYMOUS.to_string(),
            user_pass: ANONYMOUS.to_string(),
            org: self.org.clone(),
            fid: self.fid.clone(),
        }
    }
}

/// Everything one probing run needs, assembled by the CLI boundary.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// OFX server endpoint (non-empty; validated at the boundary).
    pub server_url: String,
    pub credentials: Credentials,
    /// Pause between two consecutive failed candidates.
    pub delay: Duration,
}
