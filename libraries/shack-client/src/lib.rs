//! MusicShack Client
//!
//! Data-access layer between a MusicShack UI and its server.
//!
//! # Features
//!
//! - **Transport**: one request contract for the user and admin APIs, with
//!   `{error}` envelopes and 401s decoded into typed errors
//! - **Download queue**: enqueue, retry, cancel, and a stable queue ordering
//! - **Follows, library, instances, users, profile**: list and manage each resource
//! - **Stores**: observable snapshots the UI renders from
//!
//! Domain operations never return transport errors; a failure comes back as
//! the message to show the user, and the matching store keeps its previous
//! snapshot.
//!
//! # Example
//!
//! ```ignore
//! use shack_client::{ClientConfig, NoRedirect, ShackClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load(None)?;
//!     let client = ShackClient::new(config, Arc::new(NoRedirect))?;
//!
//!     let mut queue = client.stores().downloads.subscribe();
//!     client.downloads().list().await?;
//!     println!("{:?}", queue.borrow_and_update());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod downloads;
mod error;
mod follows;
mod instances;
mod library;
mod me;
mod session;
mod store;
mod transport;
mod types;
mod users;

// Re-export main types
pub use client::ShackClient;
pub use config::ClientConfig;
pub use error::{ApiError, Outcome, Result};
pub use session::{LoginRedirect, NoRedirect, RecordingRedirect, Session};
pub use store::{Store, Stores};
pub use transport::Transport;
pub use types::{
    AlbumRef, ArtistRef, ContentType, CreateUserRequest, DownloadStatus, DownloadTask,
    EnqueueRequest, FollowRequest, FollowedArtist, InstanceRequest, LibraryEntry, LibraryPage,
    ProfileUpdate, ProviderInstance, SongMetadata, StatusResponse, User,
};

// Re-export operation handles and ordering helpers
pub use downloads::{compare_tasks, sort_tasks, DownloadOps};
pub use follows::{sort_follows, FollowOps};
pub use instances::InstanceOps;
pub use library::LibraryOps;
pub use me::MeOps;
pub use users::UserOps;
