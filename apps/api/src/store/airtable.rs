//! Airtable REST client.
//!
//! Tables: `JobDescriptions` (`Position`, `Description`) and `Candidates`
//! (`Name`, `Position`, `Resume File`, `Interview File`). Attachments are
//! arrays; only the first attachment's `url` is used.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};

use crate::models::candidate::{Candidate, FileText};
use crate::models::job_description::JobDescription;
use crate::store::{FileResolver, HrStore, StoreError};

pub const JOB_DESCRIPTIONS_TABLE: &str = "JobDescriptions";
/// Spelling some bases use for the same table.
pub const JOB_DESCRIPTIONS_TABLE_ALT: &str = "Job Descriptions";
pub const CANDIDATES_TABLE: &str = "Candidates";

pub const RESUME_FILE_FIELD: &str = "Resume File";
pub const INTERVIEW_FILE_FIELD: &str = "Interview File";

#[derive(Debug, Deserialize)]
struct RecordList {
    #[serde(default)]
    records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    id: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Clone)]
pub struct AirtableClient {
    client: Client,
    api_url: String,
    base_id: String,
    api_key: String,
    files: FileResolver,
}

impl AirtableClient {
    pub fn new(client: Client, api_url: &str, base_id: &str, api_key: &str) -> Self {
        Self {
            files: FileResolver::new(client.clone()),
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            base_id: base_id.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn files(&self) -> &FileResolver {
        &self.files
    }

    fn table_url(&self, table: &str, record_id: Option<&str>) -> Result<Url, StoreError> {
        let mut url = Url::parse(&format!("{}/{}", self.api_url, self.base_id))
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidUrl(self.api_url.clone()))?;
            segments.push(table);
            if let Some(id) = record_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Lists `table`, optionally filtered by an Airtable formula. Returns the
    /// provider JSON untouched.
    pub async fn list_records(
        &self,
        table: &str,
        filter_formula: Option<&str>,
    ) -> Result<Value, StoreError> {
        let url = self.table_url(table, None)?;
        let mut request = self.client.get(url);
        if let Some(formula) = filter_formula {
            request = request.query(&[("filterByFormula", formula)]);
        }
        debug!("Listing Airtable table '{table}' (filter: {filter_formula:?})");
        self.send(request).await
    }

    /// `PATCH`es one record with `body` (`{"fields": {...}}`).
    pub async fn patch_record(
        &self,
        table: &str,
        record_id: &str,
        body: &Value,
    ) -> Result<Value, StoreError> {
        let url = self.table_url(table, Some(record_id))?;
        debug!("Patching Airtable record {table}/{record_id}");
        self.send(self.client.patch(url).json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, StoreError> {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Airtable API error: {} {}", status.as_u16(), body);
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    async fn list_jobs_from(&self, table: &str) -> Result<Vec<JobDescription>, StoreError> {
        let data = self.list_records(table, None).await?;
        parse_job_descriptions(data)
    }
}

#[async_trait]
impl HrStore for AirtableClient {
    async fn list_job_descriptions(&self) -> Result<Vec<JobDescription>, StoreError> {
        match self.list_jobs_from(JOB_DESCRIPTIONS_TABLE).await {
            Ok(jobs) => Ok(jobs),
            Err(primary) => {
                warn!(
                    "Failed to fetch job descriptions ({primary}); trying table '{JOB_DESCRIPTIONS_TABLE_ALT}'"
                );
                match self.list_jobs_from(JOB_DESCRIPTIONS_TABLE_ALT).await {
                    Ok(jobs) => Ok(jobs),
                    Err(alt) => {
                        error!("Alternative table name also failed: {alt}");
                        Err(primary)
                    }
                }
            }
        }
    }

    async fn update_job_description(
        &self,
        id: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        let body = json!({ "fields": { "Description": description } });
        self.patch_record(JOB_DESCRIPTIONS_TABLE, id, &body).await?;
        Ok(())
    }

    async fn list_candidates_by_position(
        &self,
        position: &str,
    ) -> Result<Vec<Candidate>, StoreError> {
        let filter = position_filter(position);
        let data = self.list_records(CANDIDATES_TABLE, Some(&filter)).await?;
        let mut candidates = parse_candidates(data)?;
        self.files.resolve_candidates(&mut candidates).await;
        Ok(candidates)
    }
}

/// `{Position} = "<position>"`, with quotes and backslashes escaped.
pub fn position_filter(position: &str) -> String {
    let escaped = position.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{{Position}} = \"{escaped}\"")
}

/// URL of the first attachment in `field`, if any.
pub fn attachment_url<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    fields
        .get(field)?
        .as_array()?
        .first()?
        .get("url")?
        .as_str()
}

fn string_field(fields: &Map<String, Value>, field: &str) -> Option<String> {
    fields.get(field).and_then(Value::as_str).map(str::to_string)
}

fn parse_job_descriptions(data: Value) -> Result<Vec<JobDescription>, StoreError> {
    let list: RecordList = serde_json::from_value(data)?;
    Ok(list
        .records
        .into_iter()
        .map(|record| JobDescription {
            position: string_field(&record.fields, "Position").unwrap_or_default(),
            description: string_field(&record.fields, "Description"),
            id: record.id,
        })
        .collect())
}

/// Candidates with file references but nothing resolved yet.
fn parse_candidates(data: Value) -> Result<Vec<Candidate>, StoreError> {
    let list: RecordList = serde_json::from_value(data)?;
    Ok(list
        .records
        .into_iter()
        .map(|record| Candidate {
            name: string_field(&record.fields, "Name").unwrap_or_default(),
            position: string_field(&record.fields, "Position").unwrap_or_default(),
            resume_file: attachment_url(&record.fields, RESUME_FILE_FIELD).map(str::to_string),
            interview_file: attachment_url(&record.fields, INTERVIEW_FILE_FIELD)
                .map(str::to_string),
            resume: FileText::NotPresent,
            interview: FileText::NotPresent,
            id: record.id,
        })
        .collect())
}
