//! Library catalog operations.

use crate::error::{ApiError, Outcome};
use crate::store::Store;
use crate::transport::Transport;
use crate::types::LibraryPage;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::path::Path;
use tracing::{debug, info};

/// Library client.
///
/// Pages are published exactly as the server ordered them.
pub struct LibraryOps<'a> {
    transport: &'a Transport,
    store: &'a Store<LibraryPage>,
}

impl<'a> LibraryOps<'a> {
    pub(crate) fn new(transport: &'a Transport, store: &'a Store<LibraryPage>) -> Self {
        Self { transport, store }
    }

    /// Load one page of the library matching `search_term`.
    pub async fn load(&self, search_term: &str, limit: u32, offset: u32) -> Outcome {
        let path = format!("/library?{}", page_query(search_term, limit, offset));

        let page: LibraryPage = self
            .transport
            .get(&path)
            .await
            .map_err(|e| e.into_message("Failed to load songs"))?;

        debug!(
            total = page.total,
            count = page.count,
            offset = page.offset,
            "Fetched library page"
        );
        self.store.replace(page);
        Ok(())
    }

    /// Ask the server to rescan the library on disk.
    pub async fn sync(&self) -> Outcome {
        self.transport
            .acknowledge("/library", Method::PUT)
            .await
            .map(|()| info!("Library sync started"))
            .map_err(|e| e.into_message("Failed to sync library"))
    }

    /// Remove a song from the library.
    pub async fn delete_entry(&self, id: u64) -> Outcome {
        self.transport
            .acknowledge(&format!("/library/{}", id), Method::DELETE)
            .await
            .map(|()| info!(id = id, "Song deleted"))
            .map_err(|e| e.into_message("Failed to delete song"))
    }

    /// Upload an audio file, optionally with cover art.
    pub async fn upload(&self, file_path: &Path, cover_path: Option<&Path>) -> Outcome {
        let form = upload_form(file_path, cover_path)
            .await
            .map_err(|e| format!("Failed to upload song: {}", e))?;

        self.transport
            .request_form::<crate::types::StatusResponse>("/library", Method::POST, form)
            .await
            .map(|_| info!(file = %file_path.display(), "Song uploaded"))
            .map_err(|e| e.into_message("Failed to upload song"))
    }
}

fn page_query(search_term: &str, limit: u32, offset: u32) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("q", search_term)
        .append_pair("limit", &limit.to_string())
        .append_pair("offset", &offset.to_string())
        .finish()
}

async fn upload_form(file_path: &Path, cover_path: Option<&Path>) -> Result<Form, ApiError> {
    let mut form = Form::new().part("file", file_part(file_path).await?);
    if let Some(cover) = cover_path {
        form = form.part("cover", file_part(cover).await?);
    }
    Ok(form)
}

async fn file_part(path: &Path) -> Result<Part, ApiError> {
    let contents = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    Ok(Part::bytes(contents)
        .file_name(file_name)
        .mime_str(mime_type_for_file(path))?)
}

/// Get MIME type for an audio or image file.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("wav") => "audio/wav",
        Some("m4a" | "aac") => "audio/mp4",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
