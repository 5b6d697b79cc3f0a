//! Download queue operations.

use crate::error::Outcome;
use crate::store::Store;
use crate::transport::Transport;
use crate::types::{DownloadTask, EnqueueRequest};
use reqwest::Method;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Queue display order: status bucket first, then newest task first.
pub fn compare_tasks(a: &DownloadTask, b: &DownloadTask) -> Ordering {
    a.status
        .priority()
        .cmp(&b.status.priority())
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort tasks into queue display order.
pub fn sort_tasks(tasks: &mut [DownloadTask]) {
    tasks.sort_by(compare_tasks);
}

/// Download queue client.
///
/// Only [`list`](Self::list) writes to the download store; the mutating
/// calls leave refreshing to the caller.
pub struct DownloadOps<'a> {
    transport: &'a Transport,
    store: &'a Store<Vec<DownloadTask>>,
}

impl<'a> DownloadOps<'a> {
    pub(crate) fn new(transport: &'a Transport, store: &'a Store<Vec<DownloadTask>>) -> Self {
        Self { transport, store }
    }

    /// Queue a song, album or artist for download.
    pub async fn enqueue(&self, request: &EnqueueRequest) -> Outcome {
        debug!(
            provider = %request.provider_id,
            content_type = %request.content_type,
            content_id = %request.content_id,
            "Enqueueing download"
        );

        self.transport
            .acknowledge_with_body("/downloads", Method::POST, request)
            .await
            .map(|()| info!(content_type = %request.content_type, content_id = %request.content_id, "Download queued"))
            .map_err(|e| e.into_message(format!("Failed to download {}", request.content_type)))
    }

    /// Fetch the queue and publish it, sorted, to the download store.
    pub async fn list(&self) -> Outcome {
        let mut tasks: Vec<DownloadTask> = self
            .transport
            .get("/downloads")
            .await
            .map_err(|e| e.into_message("Failed to reload download queue"))?;

        sort_tasks(&mut tasks);
        debug!(tasks = tasks.len(), "Fetched download queue");
        self.store.replace(tasks);
        Ok(())
    }

    /// Retry one failed or cancelled task.
    pub async fn retry(&self, id: u64) -> Outcome {
        self.acknowledge(&format!("/downloads/{}/retry", id), Method::POST, "Failed to retry download")
            .await
    }

    /// Retry every failed task.
    pub async fn retry_all(&self) -> Outcome {
        self.acknowledge("/downloads/retry", Method::POST, "Failed to retry downloads")
            .await
    }

    /// Clear completed tasks from the queue.
    pub async fn mark_done(&self) -> Outcome {
        self.acknowledge("/downloads/done", Method::POST, "Failed to clear finished downloads")
            .await
    }

    /// Cancel a running or pending task.
    pub async fn cancel(&self, id: u64) -> Outcome {
        self.acknowledge(&format!("/downloads/{}/cancel", id), Method::POST, "Failed to cancel download")
            .await
    }

    /// Remove a task from the queue.
    pub async fn delete(&self, id: u64) -> Outcome {
        self.acknowledge(&format!("/downloads/{}", id), Method::DELETE, "Failed to delete download")
            .await
    }

    async fn acknowledge(&self, path: &str, method: Method, fallback: &str) -> Outcome {
        self.transport
            .acknowledge(path, method)
            .await
            .map(|()| debug!(path = %path, "Download queue updated"))
            .map_err(|e| e.into_message(fallback))
    }
}
