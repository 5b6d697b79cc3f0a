//! Provider instance operations.

use crate::error::Outcome;
use crate::store::Store;
use crate::transport::Transport;
use crate::types::{InstanceRequest, ProviderInstance};
use reqwest::Method;
use tracing::{debug, info};

/// Provider instance client.
pub struct InstanceOps<'a> {
    transport: &'a Transport,
    store: &'a Store<Vec<ProviderInstance>>,
}

impl<'a> InstanceOps<'a> {
    pub(crate) fn new(transport: &'a Transport, store: &'a Store<Vec<ProviderInstance>>) -> Self {
        Self { transport, store }
    }

    /// Fetch configured instances with their latest ping, ordered by id.
    pub async fn list(&self) -> Outcome {
        let mut instances: Vec<ProviderInstance> = self
            .transport
            .get("/instances")
            .await
            .map_err(|e| e.into_message("Failed to reload instances"))?;

        instances.sort_by_key(|i| i.id);
        debug!(
            instances = instances.len(),
            reachable = instances.iter().filter(|i| i.is_reachable()).count(),
            "Fetched instances"
        );
        self.store.replace(instances);
        Ok(())
    }

    /// Register an instance; the server detects which provider serves `url`.
    pub async fn add(&self, url: &str) -> Outcome {
        let request = InstanceRequest {
            url: url.to_string(),
        };

        self.transport
            .acknowledge_with_body("/instances", Method::POST, &request)
            .await
            .map(|()| info!(url = %url, "Instance added"))
            .map_err(|e| e.into_message("Failed to add instance"))
    }

    pub async fn remove(&self, id: u64) -> Outcome {
        self.transport
            .acknowledge(&format!("/instances/{}", id), Method::DELETE)
            .await
            .map(|()| info!(id = id, "Instance removed"))
            .map_err(|e| e.into_message("Failed to remove instance"))
    }
}
