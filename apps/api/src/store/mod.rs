//! Tabular-data store. `AirtableClient` is the production backend; screens
//! only see the `HrStore` trait, carried in `AppState` as `Arc<dyn HrStore>`.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::candidate::Candidate;
use crate::models::job_description::JobDescription;

pub mod airtable;
pub mod files;
#[cfg(test)]
pub mod memory;

pub use airtable::AirtableClient;
pub use files::FileResolver;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Airtable API error: {status} {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to download file: {0}")]
    Download(u16),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait HrStore: Send + Sync {
    async fn list_job_descriptions(&self) -> Result<Vec<JobDescription>, StoreError>;

    /// Partial update of the `Description` field of one row.
    async fn update_job_description(&self, id: &str, description: &str)
        -> Result<(), StoreError>;

    /// Rows whose `Position` equals `position` exactly, with files resolved.
    async fn list_candidates_by_position(
        &self,
        position: &str,
    ) -> Result<Vec<Candidate>, StoreError>;
}
