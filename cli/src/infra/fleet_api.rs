//! Infrastructure implementations of the `AgentPolicyLookup` port.
//!
//! `FleetApiClient` talks to the Fleet HTTP API (feature `fleet-api`);
//! `UnavailableLookup` stands in when no Fleet URL is configured.

use std::sync::Arc;

use async_trait::async_trait;
use fleet_common::AgentPolicyItem;

use crate::application::ports::AgentPolicyLookup;
use crate::domain::config::FleetApiConfig;
use crate::domain::error::LookupError;

/// Lookup used when Fleet cannot be reached; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLookup;

#[async_trait]
impl AgentPolicyLookup for UnavailableLookup {
    async fn get_one_agent_policy(&self, _id: &str) -> Result<AgentPolicyItem, LookupError> {
        Err(LookupError::Unavailable)
    }
}

/// Build the lookup for the configured Fleet endpoint.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn lookup_for(
    fleet: &FleetApiConfig,
    api_key: Option<String>,
) -> anyhow::Result<Arc<dyn AgentPolicyLookup>> {
    match fleet.url.as_deref() {
        #[cfg(feature = "fleet-api")]
        Some(url) => Ok(Arc::new(client::FleetApiClient::new(url, api_key)?)),
        #[cfg(not(feature = "fleet-api"))]
        Some(_) => {
            let _ = api_key;
            tracing::warn!("built without the fleet-api feature; agent policy lookup disabled");
            Ok(Arc::new(UnavailableLookup))
        }
        None => Ok(Arc::new(UnavailableLookup)),
    }
}

#[cfg(feature = "fleet-api")]
pub use client::FleetApiClient;

#[cfg(feature = "fleet-api")]
mod client {
    use anyhow::Context;
    use async_trait::async_trait;
    use fleet_common::AgentPolicyItem;
    use serde::Deserialize;

    use crate::application::ports::AgentPolicyLookup;
    use crate::domain::error::LookupError;

    /// `GET /api/fleet/agent_policies/{id}` response envelope.
    #[derive(Deserialize)]
    struct GetOneAgentPolicyResponse {
        item: AgentPolicyItem,
    }

    /// Fleet HTTP API client for agent policy lookups.
    pub struct FleetApiClient {
        http: reqwest::Client,
        base_url: String,
        api_key: Option<String>,
    }

    impl FleetApiClient {
        /// Create a client for the Kibana instance at `base_url`.
        ///
        /// # Errors
        ///
        /// Returns an error if the HTTP client cannot be built.
        pub fn new(base_url: &str, api_key: Option<String>) -> anyhow::Result<Self> {
            let http = reqwest::Client::builder()
                .user_agent(concat!("fleet-setup/", env!("CARGO_PKG_VERSION")))
                .build()
                .context("Failed to build HTTP client")?;
            Ok(Self {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key,
            })
        }

        /// URL of the agent policy with the given id.
        #[must_use]
        pub fn agent_policy_url(&self, id: &str) -> String {
            format!("{}/api/fleet/agent_policies/{id}", self.base_url)
        }
    }

    #[async_trait]
    impl AgentPolicyLookup for FleetApiClient {
        async fn get_one_agent_policy(&self, id: &str) -> Result<AgentPolicyItem, LookupError> {
            let url = self.agent_policy_url(id);
            let mut request = self.http.get(&url).header("kbn-xsrf", "true");
            if let Some(key) = &self.api_key {
                request = request.header(reqwest::header::AUTHORIZATION, format!("ApiKey {key}"));
            }

            let response = request
                .send()
                .await
                .map_err(|e| LookupError::Transport(e.to_string()))?;

            let status = response.status();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(LookupError::NotFound(id.to_string()));
            }
            if !status.is_success() {
                return Err(LookupError::Transport(format!("HTTP {status} from {url}")));
            }

            let body: GetOneAgentPolicyResponse = response
                .json()
                .await
                .map_err(|e| LookupError::Decode(e.to_string()))?;
            Ok(body.item)
        }
    }

}
