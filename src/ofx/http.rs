//! HTTP transport for the OFX gateway.
//!
//! One reqwest client is built up front and reused for every probe. The
//! prober layers no timeout of its own, so the request timeout here is the
//! only bound on a hung server.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use super::request::ProfileRequest;
use super::uid::Uid;
use super::OfxGateway;
use crate::types::{Candidate, RequestError, SignonInfo};

const OFX_CONTENT_TYPE: &str = "application/x-ofx";

/// Upper bound on a single profile request, connect included.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

/// reqwest-backed implementation of [`OfxGateway`].
pub struct HttpGateway {
    http: Client,
}

impl HttpGateway {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("ofx-probe/0.1.0")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http })
    }
}

#[async_trait]
impl OfxGateway for HttpGateway {
    async fn profile(
        &self,
        server_url: &str,
        candidate: &Candidate,
        signon: &SignonInfo,
        trn_uid: &Uid,
    ) -> Result<(), RequestError> {
        let body = ProfileRequest {
            candidate,
            signon,
            trn_uid,
            dt_client: Utc::now(),
        }
        .render();

        debug!(
            candidate = %candidate,
            anonymous = signon.is_anonymous(),
            "Sending OFX profile request"
        );

        let resp = self
            .http
            .post(server_url)
            .header(CONTENT_TYPE, OFX_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RequestError::Http {
                status: status.as_u16(),
            });
        }

        // We never interpret the profile contents; a present OFX envelope
        // is all "the server accepted this candidate" means here.
        let text = resp.text().await?;
        if !text.contains("<OFX>") {
            return Err(RequestError::Malformed(
                "missing <OFX> envelope".to_string(),
            ));
        }

        Ok(())
    }
}
