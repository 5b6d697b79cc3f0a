//! Account management through the admin API.

use crate::error::Outcome;
use crate::store::Store;
use crate::transport::Transport;
use crate::types::{CreateUserRequest, User};
use reqwest::Method;
use tracing::{debug, info};

/// Admin user client. Bound to the admin transport, so a 401 here sends the
/// UI to the admin login.
pub struct UserOps<'a> {
    transport: &'a Transport,
    store: &'a Store<Vec<User>>,
}

impl<'a> UserOps<'a> {
    pub(crate) fn new(transport: &'a Transport, store: &'a Store<Vec<User>>) -> Self {
        Self { transport, store }
    }

    pub async fn list(&self) -> Outcome {
        let mut users: Vec<User> = self
            .transport
            .get("/users")
            .await
            .map_err(|e| e.into_message("Failed to reload users"))?;

        users.sort_by_key(|u| u.id);
        debug!(users = users.len(), "Fetched users");
        self.store.replace(users);
        Ok(())
    }

    pub async fn create(&self, username: &str, password: &str, best_quality: bool) -> Outcome {
        let request = CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            best_quality,
        };

        self.transport
            .acknowledge_with_body("/users", Method::POST, &request)
            .await
            .map(|()| info!(username = %username, "User created"))
            .map_err(|e| e.into_message("Failed to create user"))
    }

    pub async fn remove(&self, id: u64) -> Outcome {
        self.transport
            .acknowledge(&format!("/users/{}", id), Method::DELETE)
            .await
            .map(|()| info!(id = id, "User removed"))
            .map_err(|e| e.into_message("Failed to delete user"))
    }
}
