//! Shared types for ofx-probe.
//!
//! These types form the data model used across all modules: the candidate
//! configurations the prober enumerates, the terminal outcomes of a run,
//! and the error taxonomy separating fatal configuration problems from
//! per-candidate request failures.

use std::fmt;

use crate::ofx::uid::UidError;
use crate::ofx::version::{OfxVersion, VersionParseError};

/// Sentinel user ID / password used for the unauthenticated retry.
///
/// A well-known constant from the OFX world: the same 32-character string
/// is sent as both user ID and password.
pub const ANONYMOUS: &str = "anonymous00000000000000000000000";

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// One client-identification combination to try against the server.
///
/// Immutable once generated; only the winning candidate outlives the
/// probing loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Application identity string (e.g. "QWIN" for Quicken Windows).
    pub app_id: String,
    /// Application version string (e.g. "2600" for Quicken 2017).
    pub app_version: String,
    /// OFX protocol version to speak on the wire.
    pub spec_version: OfxVersion,
    /// Whether the request body is pretty-printed. Some servers' parsers
    /// only accept one of the two forms.
    pub indent: bool,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.app_id, self.app_version, self.spec_version)?;
        if !self.indent {
            write!(f, " noindent")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Signon
// ---------------------------------------------------------------------------

/// The signon block sent with a single profile request.
///
/// Built from [`crate::config::Credentials`] — either the primary pair or
/// the [`ANONYMOUS`] sentinel substituted for user ID and password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignonInfo {
    pub user_id: String,
    pub user_pass: String,
    pub org: String,
    pub fid: String,
}

impl SignonInfo {
    /// Whether this signon uses the anonymous sentinel pair.
    pub fn is_anonymous(&self) -> bool {
        self.user_id == ANONYMOUS && self.user_pass == ANONYMOUS
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Terminal result of a probing run.
///
/// `Found` and `Exhausted` are distinct on purpose: exhaustion is a
/// legitimate outcome of the algorithm, never a success with empty data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The first candidate the server accepted.
    Found(Candidate),
    /// Every candidate was tried and none worked.
    Exhausted {
        /// Number of candidates that failed both signon attempts.
        attempts: u32,
    },
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Fatal errors that abort an entire probing run.
///
/// These indicate a broken catalog or environment, not server behavior, so
/// continuing to other candidates would be pointless.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("invalid OFX spec version in catalog: {value}")]
    InvalidSpecVersion {
        value: String,
        #[source]
        source: VersionParseError,
    },

    #[error("failed to generate transaction UID")]
    UidGeneration(#[from] UidError),
}

/// Per-candidate request failures.
///
/// Always recoverable from the prober's point of view: they drive the
/// anonymous retry, then advancement to the next candidate.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    #[error("response is not an OFX document: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_descriptor_with_indent() {
        let c = Candidate {
            app_id: "QWIN".to_string(),
            app_version: "2600".to_string(),
            spec_version: OfxVersion::V203,
            indent: true,
        };
        assert_eq!(c.to_string(), "QWIN 2600 203");
    }

    #[test]
    fn test_candidate_descriptor_noindent_marker() {
        let c = Candidate {
            app_id: "Money".to_string(),
            app_version: "1600".to_string(),
            spec_version: OfxVersion::V102,
            indent: false,
        };
        assert_eq!(c.to_string(), "Money 1600 102 noindent");
    }

    #[test]
    fn test_anonymous_sentinel_shape() {
        assert_eq!(ANONYMOUS.len(), 32);
        assert!(ANONYMOUS.starts_with("anonymous"));
    }

    #[test]
    fn test_signon_is_anonymous() {
        let anon = SignonInfo {
            user_id: ANONYMOUS.to_string(),
            user_pass: ANONYMOUS.to_string(),
            org: "BANK".to_string(),
            fid: "1234".to_string(),
        };
        assert!(anon.is_anonymous());

        let primary = SignonInfo {
            user_id: "alice".to_string(),
            user_pass: "hunter2".to_string(),
            org: "BANK".to_string(),
            fid: "1234".to_string(),
        };
        assert!(!primary.is_anonymous());
    }

    #[test]
    fn test_outcomes_are_distinct() {
        let found = ProbeOutcome::Found(Candidate {
            app_id: "OFXGO".to_string(),
            app_version: "0001".to_string(),
            spec_version: OfxVersion::V203,
            indent: false,
        });
        let exhausted = ProbeOutcome::Exhausted { attempts: 0 };
        assert_ne!(found, exhausted);
    }
}
