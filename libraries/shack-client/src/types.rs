//! Types for MusicShack API requests and responses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Acknowledgement body of side-effect-only endpoints (`{"status": "ok"}`).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

// =============================================================================
// Download Types
// =============================================================================

/// Server-side state of a download task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Pending,
    Running,
    Done,
    Failed,
    Cancel,
}

impl DownloadStatus {
    /// Position in the queue display order: running, pending, done, failed, cancel.
    pub const fn priority(self) -> u8 {
        match self {
            DownloadStatus::Running => 0,
            DownloadStatus::Pending => 1,
            DownloadStatus::Done => 2,
            DownloadStatus::Failed => 3,
            DownloadStatus::Cancel => 4,
        }
    }

    /// Whether the server is still working on the task.
    pub const fn is_active(self) -> bool {
        matches!(self, DownloadStatus::Running | DownloadStatus::Pending)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DownloadStatus::Pending => "pending",
            DownloadStatus::Running => "running",
            DownloadStatus::Done => "done",
            DownloadStatus::Failed => "failed",
            DownloadStatus::Cancel => "cancel",
        }
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artist reference inside song metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

/// Album reference inside song metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumRef {
    pub id: String,
    pub title: String,
    pub cover_url: String,
}

/// Provider metadata of the song a task downloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SongMetadata {
    pub id: String,
    pub title: String,
    pub duration: u32,
    pub release_date: String,
    pub track_number: u32,
    pub volume_number: u32,
    pub maximal_audio_quality: String,
    pub popularity: u32,
    pub isrc: String,
    pub cover_url: String,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
}

/// A queued download job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadTask {
    /// Server-assigned, increasing in creation order
    pub id: u64,
    pub provider_id: String,
    #[serde(default)]
    pub song_metadata: SongMetadata,
    pub status: DownloadStatus,
}

/// Kind of content an enqueue request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Song,
    Album,
    Artist,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentType::Song => "song",
            ContentType::Album => "album",
            ContentType::Artist => "artist",
        })
    }
}

/// Body of `POST /downloads`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnqueueRequest {
    pub provider_id: String,
    pub content_type: ContentType,
    pub content_id: String,
    pub quality: String,
}

// =============================================================================
// Follow Types
// =============================================================================

/// An artist the user follows on some provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowedArtist {
    pub id: u64,
    pub provider_id: String,
    pub artist_id: String,
    pub artist_name: String,
    #[serde(default)]
    pub artist_picture_url: String,
}

/// Body of `POST /follows`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub provider_id: String,
    pub artist_id: String,
}

// =============================================================================
// Library Types
// =============================================================================

/// A song stored in the user's library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LibraryEntry {
    pub id: u64,
    pub title: String,
    pub duration: u32,
    pub album: String,
    pub album_artists: Vec<String>,
    pub artists: Vec<String>,
    pub release_date: String,
    pub track_number: u32,
    pub volume_number: u32,
    pub explicit: bool,
    pub isrc: String,
    pub album_gain: f64,
    pub album_peak: f64,
    pub track_gain: f64,
    pub track_peak: f64,
}

/// One offset/limit page of the library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryPage {
    /// Size of the whole result set
    pub total: u64,
    /// Number of items in this page
    pub count: u64,
    pub limit: u64,
    pub offset: u64,
    pub items: Vec<LibraryEntry>,
}

impl LibraryPage {
    /// Whether more items exist past this page.
    pub fn has_next(&self) -> bool {
        self.offset + self.count < self.total
    }
}

// =============================================================================
// Instance Types
// =============================================================================

/// A configured upstream content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInstance {
    pub id: u64,
    pub provider_id: String,
    pub url: String,
    /// Round-trip time of the last status check in milliseconds, 0 when unreachable
    #[serde(default)]
    pub ping_latency: u64,
}

impl ProviderInstance {
    pub fn is_reachable(&self) -> bool {
        self.ping_latency > 0
    }
}

/// Body of `POST /instances`.
#[derive(Debug, Clone, Serialize)]
pub struct InstanceRequest {
    pub url: String,
}

// =============================================================================
// User Types
// =============================================================================

/// An account as listed by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub best_quality: bool,
}

/// Body of `POST /users` on the admin API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub best_quality: bool,
}

/// Body of `PUT /me`. Empty `username` or `password` leave that field as it is.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: String,
    pub password: String,
    pub best_quality: bool,
}
