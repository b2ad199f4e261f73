//! Graph client boundary and the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use topo_log::{debug, Logger};

use crate::entity::{Endpoint, EntityId};
use crate::error::{GraphError, GraphResult};

/// Request timeout for the HTTP client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations the discovery graph exposes to config ingestion.
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Inserts endpoint entities, returning them with assigned identities.
    async fn insert_endpoints(&self, endpoints: &[Endpoint]) -> GraphResult<Vec<Endpoint>>;

    /// Attaches one interface to the endpoint identified by `owner`.
    /// Unset addresses are passed as empty strings.
    async fn insert_interface(
        &self,
        owner: EntityId,
        description: &str,
        ipv4: &str,
        ipv6: &str,
    ) -> GraphResult<()>;
}

/// Wire form of one interface insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceInsert {
    pub owner: EntityId,
    pub description: String,
    pub ipv4: String,
    pub ipv6: String,
}

/// [`GraphClient`] over the graph server's HTTP/JSON API.
///
/// `POST {base}/endpoints` inserts an entity array and echoes it back with
/// ids assigned; `POST {base}/interfaces` attaches one interface.
pub struct HttpGraphClient {
    base: String,
    http: reqwest::Client,
    logger: Logger,
}

impl HttpGraphClient {
    /// Builds a client for the server at `base` (scheme + authority,
    /// trailing slash tolerated).
    pub fn new(base: &str, logger: Logger) -> GraphResult<Self> {
        let base = base.trim_end_matches('/');
        if base.is_empty() || !base.contains("://") {
            return Err(GraphError::InvalidUrl(base.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(GraphError::Transport)?;

        Ok(Self {
            base: base.to_string(),
            http,
            logger,
        })
    }

    /// Base URL requests are issued against.
    pub fn base(&self) -> &str {
        &self.base
    }
}

#[async_trait]
impl GraphClient for HttpGraphClient {
    async fn insert_endpoints(&self, endpoints: &[Endpoint]) -> GraphResult<Vec<Endpoint>> {
        let url = format!("{}/endpoints", self.base);
        debug!(self.logger, "inserting {} endpoint(s) via {}", endpoints.len(), url);

        let response = self.http.post(&url).json(endpoints).send().await?;
        if !response.status().is_success() {
            return Err(GraphError::status(
                "insert endpoints",
                response.status().as_u16(),
            ));
        }

        let inserted: Vec<Endpoint> = response.json().await?;
        Ok(inserted)
    }

    async fn insert_interface(
        &self,
        owner: EntityId,
        description: &str,
        ipv4: &str,
        ipv6: &str,
    ) -> GraphResult<()> {
        let url = format!("{}/interfaces", self.base);
        let insert = InterfaceInsert {
            owner,
            description: description.to_string(),
            ipv4: ipv4.to_string(),
            ipv6: ipv6.to_string(),
        };
        debug!(
            self.logger,
            "inserting interface '{}' for endpoint {}", insert.description, owner
        );

        let response = self.http.post(&url).json(&insert).send().await?;
        if !response.status().is_success() {
            return Err(GraphError::status(
                "insert interface",
                response.status().as_u16(),
            ));
        }
        Ok(())
    }
}
