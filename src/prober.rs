//! The configuration prober — the core of the tool.
//!
//! Walks the candidate catalog in priority order, issuing one profile
//! request per candidate (plus one anonymous retry), and stops at the
//! first candidate the server accepts. Strictly sequential with a pacing
//! delay between failed candidates: concurrent probes against an
//! unfamiliar institution risk lockouts and rate limiting.

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::ProbeConfig;
use crate::ofx::{OfxGateway, Uid};
use crate::types::{ProbeError, ProbeOutcome};

/// Drives an [`OfxGateway`] through the candidate catalog.
pub struct ConfigurationProber<G> {
    gateway: G,
    catalog: Catalog,
}

impl<G: OfxGateway> ConfigurationProber<G> {
    /// Prober over the default well-known catalog.
    pub fn new(gateway: G) -> Self {
        Self::with_catalog(gateway, Catalog::default())
    }

    /// Prober over a caller-supplied catalog.
    pub fn with_catalog(gateway: G, catalog: Catalog) -> Self {
        Self { gateway, catalog }
    }

    /// Probe candidates in catalog order until one works.
    ///
    /// Returns `Found` with the first accepted candidate, or `Exhausted`
    /// once the whole cross product has failed. Request errors never
    /// escape this loop; a bad catalog entry or a UID-generation failure
    /// aborts the run with an `Err`.
    pub async fn detect(&self, config: &ProbeConfig) -> Result<ProbeOutcome, ProbeError> {
        let candidates = self.catalog.candidates()?;
        info!(
            candidates = candidates.len(),
            delay_ms = config.delay.as_millis() as u64,
            "Starting settings detection"
        );

        let primary = config.credentials.signon();
        let anonymous = config.credentials.anonymous_signon();

        let mut attempts: u32 = 0;
        for candidate in candidates {
            let trn_uid = Uid::random()?;

            match self
                .gateway
                .profile(&config.server_url, &candidate, &primary, &trn_uid)
                .await
            {
                Ok(()) => {
                    info!(candidate = %candidate, "Server accepted candidate");
                    return Ok(ProbeOutcome::Found(candidate));
                }
                Err(err) => {
                    debug!(
                        candidate = %candidate,
                        error = %err,
                        "Primary signon rejected, retrying anonymously"
                    );
                }
            }

            match self
                .gateway
                .profile(&config.server_url, &candidate, &anonymous, &trn_uid)
                .await
            {
                Ok(()) => {
                    info!(candidate = %candidate, "Server accepted candidate (anonymous signon)");
                    return Ok(ProbeOutcome::Found(candidate));
                }
                Err(err) => {
                    attempts += 1;
                    info!(
                        attempt = attempts,
                        candidate = %candidate,
                        error = %err,
                        delay_ms = config.delay.as_millis() as u64,
                        "Attempt failed, pacing before next candidate"
                    );
                    tokio::time::sleep(config.delay).await;
                }
            }
        }

        Ok(ProbeOutcome::Exhausted { attempts })
    }
}
