//! OFX protocol client.
//!
//! Defines the `OfxGateway` trait — the seam between the prober and the
//! request/response engine — and provides:
//! - `version` — spec-version parsing
//! - `uid` — transaction UID generation
//! - `request` — profile-request document construction (SGML and XML)
//! - `http` — the reqwest-backed gateway used by the binary

pub mod http;
pub mod request;
pub mod uid;
pub mod version;

pub use http::HttpGateway;
pub use uid::Uid;
pub use version::OfxVersion;

use async_trait::async_trait;

use crate::types::{Candidate, RequestError, SignonInfo};

/// Abstraction over the OFX request/response engine.
///
/// One call issues one profile request for one candidate configuration.
/// The prober only distinguishes `Ok` from `Err`; response content is
/// never inspected at this seam.
#[async_trait]
pub trait OfxGateway: Send + Sync {
    /// Send a profile request to `server_url`, presenting the candidate's
    /// identity strings and the given signon block.
    async fn profile(
        &self,
        server_url: &str,
        candidate: &Candidate,
        signon: &SignonInfo,
        trn_uid: &Uid,
    ) -> Result<(), RequestError>;
}
