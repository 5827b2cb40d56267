//! Candidate priority catalog.
//!
//! Ordered tables of application IDs, per-ID application versions, and OFX
//! spec versions. Order is a priority ranking — most likely to work first —
//! and must be reproducible run to run, which is why everything here is a
//! sequence and never a set or map.

use crate::ofx::version::OfxVersion;
use crate::types::{Candidate, ProbeError};

/// The priority tables a probing run enumerates.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Application identities, best first.
    pub apps: Vec<AppEntry>,
    /// OFX spec versions, crossed with every (app ID, app version) pair.
    /// No recency ordering, but fixed and deterministic.
    pub spec_versions: Vec<String>,
}

/// One application identity with its version history, newest first.
#[derive(Debug, Clone)]
pub struct AppEntry {
    pub id: String,
    pub versions: Vec<String>,
}

impl AppEntry {
    fn new(id: &str, versions: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            versions: versions.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl Default for Catalog {
    /// The well-known tables: real-world client lineages servers tend to
    /// recognize, with version strings tracking release years.
    fn default() -> Self {
        Catalog {
            apps: vec![
                // the ofxgo client library
                AppEntry::new("OFXGO", &["0001"]),
                // Intuit Quicken Windows, 2017 back to 2005
                AppEntry::new(
                    "QWIN",
                    &[
                        "2600", "2500", "2400", "2300", "2200", "2100", "2000", "1900", "1800",
                        "1700", "1600", "1500", "1400",
                    ],
                ),
                // Intuit Quicken Mac, 2008 back to 2005
                AppEntry::new("QMOFX", &["1700", "1600", "1500", "1400"]),
                // Intuit QuickBooks Windows, 2008 back to 2005
                AppEntry::new("QB", &["1800", "1700", "1600", "1500"]),
                // Microsoft Money, 2007 back to 2003
                AppEntry::new("Money", &["1600", "1500", "1400", "1200", "1100"]),
            ],
            spec_versions: [
                "203", "103", "200", "201", "202", "210", "211", "102", "151", "160", "220",
            ]
            .iter()
            .map(|v| v.to_string())
            .collect(),
        }
    }
}

impl Catalog {
    /// Materialize the full candidate enumeration in priority order:
    /// app ID (outer), then that ID's versions, then spec versions, then
    /// indent `false` before `true`.
    ///
    /// Every spec-version string is parsed before the first candidate is
    /// produced, so a bad catalog entry fails here — before any network
    /// call — no matter where it sits in the list.
    pub fn candidates(&self) -> Result<Vec<Candidate>, ProbeError> {
        let mut specs: Vec<OfxVersion> = Vec::with_capacity(self.spec_versions.len());
        for raw in &self.spec_versions {
            let version = raw
                .parse()
                .map_err(|source| ProbeError::InvalidSpecVersion {
                    value: raw.clone(),
                    source,
                })?;
            specs.push(version);
        }

        let mut candidates = Vec::with_capacity(self.candidate_count());
        for app in &self.apps {
            for app_version in &app.versions {
                for &spec_version in &specs {
                    for indent in [false, true] {
                        candidates.push(Candidate {
                            app_id: app.id.clone(),
                            app_version: app_version.clone(),
                            spec_version,
                            indent,
                        });
                    }
                }
            }
        }
        Ok(candidates)
    }

    /// Size of the full cross product.
    pub fn candidate_count(&self) -> usize {
        let pairs: usize = self.apps.iter().map(|a| a.versions.len()).sum();
        pairs * self.spec_versions.len() * 2
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_ordering() {
        let catalog = Catalog::default();
        let ids: Vec<&str> = catalog.apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["OFXGO", "QWIN", "QMOFX", "QB", "Money"]);
        assert_eq!(catalog.apps[1].versions.first().unwrap(), "2600");
        assert_eq!(catalog.apps[1].versions.last().unwrap(), "1400");
        assert_eq!(catalog.spec_versions.first().unwrap(), "203");
    }

    #[test]
    fn test_candidate_count_matches_cross_product() {
        let catalog = Catalog::default();
        // (1 + 13 + 4 + 4 + 5) pairs × 11 spec versions × 2 indent states
        assert_eq!(catalog.candidate_count(), 27 * 11 * 2);
        assert_eq!(catalog.candidates().unwrap().len(), 27 * 11 * 2);
    }

    #[test]
    fn test_enumeration_order_is_nested() {
        let catalog = Catalog::default();
        let candidates = catalog.candidates().unwrap();

        // First pair is OFXGO/0001; spec versions cycle fastest after indent.
        assert_eq!(candidates[0].app_id, "OFXGO");
        assert_eq!(candidates[0].app_version, "0001");
        assert_eq!(candidates[0].spec_version, OfxVersion::V203);
        assert!(!candidates[0].indent);

        assert_eq!(candidates[1].spec_version, OfxVersion::V203);
        assert!(candidates[1].indent);

        assert_eq!(candidates[2].spec_version, OfxVersion::V103);
        assert!(!candidates[2].indent);

        // OFXGO has one version and 22 candidates; QWIN 2600 follows.
        assert_eq!(candidates[22].app_id, "QWIN");
        assert_eq!(candidates[22].app_version, "2600");
        assert_eq!(candidates[22].spec_version, OfxVersion::V203);
    }

    #[test]
    fn test_enumeration_is_reproducible() {
        let catalog = Catalog::default();
        assert_eq!(catalog.candidates().unwrap(), catalog.candidates().unwrap());
    }

    #[test]
    fn test_bad_spec_version_fails_before_any_candidate() {
        let mut catalog = Catalog::default();
        catalog.spec_versions.push("999".to_string());

        match catalog.candidates() {
            Err(ProbeError::InvalidSpecVersion { value, .. }) => assert_eq!(value, "999"),
            other => panic!("expected InvalidSpecVersion, got {other:?}"),
        }
    }
}
