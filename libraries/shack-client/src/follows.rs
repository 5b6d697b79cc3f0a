//! Followed artist operations.

use crate::error::Outcome;
use crate::store::Store;
use crate::transport::Transport;
use crate::types::{FollowRequest, FollowedArtist};
use reqwest::Method;
use tracing::{debug, info};

/// Sort follows newest first.
pub fn sort_follows(follows: &mut [FollowedArtist]) {
    follows.sort_by(|a, b| b.id.cmp(&a.id));
}

fn with_follow(current: &[FollowedArtist], follow: &FollowedArtist) -> Vec<FollowedArtist> {
    let mut follows: Vec<FollowedArtist> = current
        .iter()
        .filter(|f| f.id != follow.id)
        .cloned()
        .collect();
    follows.push(follow.clone());
    sort_follows(&mut follows);
    follows
}

/// Follow list client.
pub struct FollowOps<'a> {
    transport: &'a Transport,
    store: &'a Store<Vec<FollowedArtist>>,
}

impl<'a> FollowOps<'a> {
    pub(crate) fn new(transport: &'a Transport, store: &'a Store<Vec<FollowedArtist>>) -> Self {
        Self { transport, store }
    }

    /// Fetch follows and publish them newest first.
    pub async fn list(&self) -> Outcome {
        let mut follows: Vec<FollowedArtist> = self
            .transport
            .get("/follows")
            .await
            .map_err(|e| e.into_message("Failed to reload follows list"))?;

        sort_follows(&mut follows);
        debug!(follows = follows.len(), "Fetched follows");
        self.store.replace(follows);
        Ok(())
    }

    /// Follow an artist and return the created record.
    ///
    /// When the store already holds a list, a new snapshot with the record
    /// added is published so the UI does not need a full reload. The merge is
    /// applied to whatever snapshot is current at that moment, so a `list()`
    /// that completed in the meantime is kept. An uninitialized store stays
    /// uninitialized.
    pub async fn add(&self, provider_id: &str, artist_id: &str) -> Outcome<FollowedArtist> {
        let request = FollowRequest {
            provider_id: provider_id.to_string(),
            artist_id: artist_id.to_string(),
        };

        let follow: FollowedArtist = self
            .transport
            .request_with_body("/follows", Method::POST, &request)
            .await
            .map_err(|e| e.into_message("Failed to add new follow"))?;

        info!(id = follow.id, artist = %follow.artist_name, "Artist followed");

        self.store.replace_with(|current| with_follow(current, &follow));

        Ok(follow)
    }

    /// Unfollow by follow id.
    pub async fn remove(&self, id: u64) -> Outcome {
        self.transport
            .acknowledge(&format!("/follows/{}", id), Method::DELETE)
            .await
            .map(|()| info!(id = id, "Follow removed"))
            .map_err(|e| e.into_message("Failed to remove follow"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follow(id: u64) -> FollowedArtist {
        FollowedArtist {
            id,
            provider_id: "hifi".into(),
            artist_id: format!("artist-{}", id),
            artist_name: format!("Artist {}", id),
            artist_picture_url: String::new(),
        }
    }

    #[test]
    fn test_newest_first() {
        let mut follows = vec![follow(3), follow(1), follow(4)];
        sort_follows(&mut follows);

        let ids: Vec<u64> = follows.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![4, 3, 1]);
    }

    #[test]
    fn test_with_follow_replaces_same_id() {
        let mut updated = follow(3);
        updated.artist_name = "Renamed".into();

        let follows = with_follow(&[follow(3), follow(1)], &updated);

        assert_eq!(follows.len(), 2);
        assert_eq!(follows[0].artist_name, "Renamed");
        assert_eq!(follows[1].id, 1);
    }
}
