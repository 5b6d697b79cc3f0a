//! Logged-in account operations.

use crate::error::Outcome;
use crate::store::Store;
use crate::transport::Transport;
use crate::types::{ProfileUpdate, User};
use reqwest::Method;
use tracing::{debug, info};

/// Profile client for the account the session belongs to.
pub struct MeOps<'a> {
    transport: &'a Transport,
    store: &'a Store<User>,
}

impl<'a> MeOps<'a> {
    pub(crate) fn new(transport: &'a Transport, store: &'a Store<User>) -> Self {
        Self { transport, store }
    }

    /// Fetch the current account and publish it to the profile store.
    pub async fn get(&self) -> Outcome {
        let user: User = self
            .transport
            .get("/me")
            .await
            .map_err(|e| e.into_message("Failed to load profile"))?;

        debug!(username = %user.username, "Fetched profile");
        self.store.replace(user);
        Ok(())
    }

    /// Change username, password or quality preference.
    ///
    /// The server answers with the updated account, which replaces the
    /// profile snapshot and is returned.
    pub async fn update(&self, update: &ProfileUpdate) -> Outcome<User> {
        let user: User = self
            .transport
            .request_with_body("/me", Method::PUT, update)
            .await
            .map_err(|e| e.into_message("Failed to update profile"))?;

        info!(username = %user.username, "Profile updated");
        self.store.replace(user.clone());
        Ok(user)
    }
}
