//! HTTP client and match policy for the character search endpoint.
//!
//! One sighting becomes one GET request carrying `name` and `server` query
//! parameters. The endpoint answers with a JSON array of candidates; the
//! match policy picks the winning candidate locally. No retry, no backoff --
//! the resolution loop's fixed cadence is the only rate limiting.

use std::time::Duration;

use retrace_types::StableId;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ResolverError;

/// One candidate row from the character search response.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Candidate display name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Candidate server label, possibly data-center qualified
    /// (e.g. `"Gilgamesh (Crystal)"`).
    #[serde(rename = "Server")]
    pub server: String,
    /// The candidate's stable identity.
    #[serde(rename = "ID")]
    pub id: u64,
}

/// Client for the external character search endpoint.
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl SearchClient {
    /// Create a client for the search endpoint at `base_url`.
    pub fn new(base_url: &str, request_timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            request_timeout,
        }
    }

    /// Resolve a sighting to a stable identity.
    ///
    /// Every failure mode (network, malformed response, no match) is logged
    /// and collapsed to [`StableId::UNRESOLVED`]; callers treat the sighting
    /// as dropped. The request future is cancel-safe: dropping it (as the
    /// resolution loop does on shutdown) aborts the in-flight call.
    ///
    /// `name` must already be capitalized per part; matching against
    /// candidates is exact and case-sensitive.
    pub async fn resolve(&self, name: &str, world: &str) -> StableId {
        match self.resolve_checked(name, world).await {
            Ok(id) => {
                debug!(name, world, stable_id = %id, "sighting resolved");
                id
            }
            Err(ResolverError::NotFound { .. }) => {
                debug!(name, world, "no matching candidate");
                StableId::UNRESOLVED
            }
            Err(e) => {
                warn!(name, world, error = %e, "resolution failed");
                StableId::UNRESOLVED
            }
        }
    }

    /// Resolve with typed errors instead of the sentinel.
    pub async fn resolve_checked(
        &self,
        name: &str,
        world: &str,
    ) -> Result<StableId, ResolverError> {
        let url = format!("{}/character/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("name", name), ("server", world)])
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ResolverError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolverError::Network(format!(
                "search endpoint returned {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ResolverError::Network(e.to_string()))?;

        let candidates: Vec<Candidate> = serde_json::from_str(&body)
            .map_err(|e| ResolverError::MalformedResponse(e.to_string()))?;

        select_candidate(&candidates, name, world).ok_or_else(|| ResolverError::NotFound {
            name: name.to_owned(),
            world: world.to_owned(),
        })
    }
}

/// Apply the match policy to a candidate list.
///
/// A candidate matches when its name equals `name` exactly and its server
/// label starts with `world` (data-center-qualified labels match their bare
/// world). When several candidates match, later matches overwrite earlier
/// ones -- the last match in response order wins. The first result is not
/// always the right one.
pub fn select_candidate(candidates: &[Candidate], name: &str, world: &str) -> Option<StableId> {
    let mut selected = None;
    for candidate in candidates {
        if candidate.name == name && candidate.server.starts_with(world) {
            selected = Some(StableId(candidate.id));
        }
    }
    selected
}
