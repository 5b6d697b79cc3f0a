//! Main MusicShack client.

use crate::config::ClientConfig;
use crate::downloads::DownloadOps;
use crate::error::Result;
use crate::follows::FollowOps;
use crate::instances::InstanceOps;
use crate::library::LibraryOps;
use crate::me::MeOps;
use crate::session::LoginRedirect;
use crate::store::Stores;
use crate::transport::Transport;
use crate::users::UserOps;
use std::sync::Arc;
use tracing::info;

/// Entry point for the UI.
///
/// Owns the user and admin transports and the stores they feed. Operation
/// handles borrow from it, so concurrent calls are independent and the last
/// response to land wins the store.
///
/// # Example
///
/// ```ignore
/// use shack_client::{ClientConfig, RecordingRedirect, ShackClient};
/// use std::sync::Arc;
///
/// let config = ClientConfig::new("https://music.example.com").with_session_cookie("session=abc");
/// let client = ShackClient::new(config, Arc::new(RecordingRedirect::new()))?;
///
/// if let Err(message) = client.downloads().list().await {
///     eprintln!("{}", message);
/// }
/// let queue = client.stores().downloads.get();
/// ```
#[derive(Debug, Clone)]
pub struct ShackClient {
    user: Transport,
    admin: Transport,
    stores: Stores,
}

impl ShackClient {
    /// Create a client; both transports report 401s to `redirect`.
    pub fn new(config: ClientConfig, redirect: Arc<dyn LoginRedirect>) -> Result<Self> {
        let user = Transport::user(&config, Arc::clone(&redirect))?;
        let admin = Transport::admin(&config, redirect)?;

        info!(root = %user.root(), "MusicShack client ready");

        Ok(Self {
            user,
            admin,
            stores: Stores::new(),
        })
    }

    /// Stores the UI renders from.
    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn user_transport(&self) -> &Transport {
        &self.user
    }

    pub fn admin_transport(&self) -> &Transport {
        &self.admin
    }

    pub fn downloads(&self) -> DownloadOps<'_> {
        DownloadOps::new(&self.user, &self.stores.downloads)
    }

    pub fn follows(&self) -> FollowOps<'_> {
        FollowOps::new(&self.user, &self.stores.follows)
    }

    pub fn library(&self) -> LibraryOps<'_> {
        LibraryOps::new(&self.user, &self.stores.library)
    }

    pub fn instances(&self) -> InstanceOps<'_> {
        InstanceOps::new(&self.user, &self.stores.instances)
    }

    /// The logged-in account.
    pub fn me(&self) -> MeOps<'_> {
        MeOps::new(&self.user, &self.stores.profile)
    }

    /// Admin-only account management.
    pub fn users(&self) -> UserOps<'_> {
        UserOps::new(&self.admin, &self.stores.users)
    }
}
