//! Resolves candidate file references (attachment URLs) to text.
//!
//! One request per file, strictly sequential. PDFs are text-extracted,
//! everything else is decoded as UTF-8 (lossy). Decoding is CPU-bound and
//! runs on the blocking pool.

use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{debug, warn};

use crate::models::candidate::{Candidate, FileText};
use crate::store::StoreError;

#[derive(Clone)]
pub struct FileResolver {
    client: Client,
}

impl FileResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn resolve(&self, url: Option<&str>) -> FileText {
        let Some(url) = url else {
            return FileText::NotPresent;
        };
        match self.download(url).await {
            Ok(text) => FileText::Resolved(text),
            Err(e) => {
                warn!("Could not resolve file {url}: {e}");
                FileText::Failed(e.to_string())
            }
        }
    }

    /// Resume then interview, candidate by candidate.
    pub async fn resolve_candidates(&self, candidates: &mut [Candidate]) {
        for candidate in candidates.iter_mut() {
            candidate.resume = self.resolve(candidate.resume_file.as_deref()).await;
            candidate.interview = self.resolve(candidate.interview_file.as_deref()).await;
        }
    }

    async fn download(&self, url: &str) -> Result<String, StoreError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Download(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body: Bytes = response.bytes().await?;
        debug!("Downloaded {} bytes ({content_type}) from {url}", body.len());

        decode_in_background(url.to_string(), content_type, body).await
    }
}

/// A panic inside the decoder surfaces as `StoreError::Pdf`.
async fn decode_in_background(
    url: String,
    content_type: String,
    body: Bytes,
) -> Result<String, StoreError> {
    tokio::task::spawn_blocking(move || decode_file(&url, &content_type, &body))
        .await
        .map_err(|e| StoreError::Pdf(format!("decoder task failed: {e}")))?
}

fn is_pdf(url: &str, content_type: &str) -> bool {
    content_type.contains("application/pdf") || url.to_lowercase().contains(".pdf")
}

pub fn decode_file(url: &str, content_type: &str, body: &[u8]) -> Result<String, StoreError> {
    if is_pdf(url, content_type) {
        return pdf_extract::extract_text_from_mem(body)
            .map(|text| text.trim().to_string())
            .map_err(|e| StoreError::Pdf(e.to_string()));
    }
    Ok(String::from_utf8_lossy(body).into_owned())
}
