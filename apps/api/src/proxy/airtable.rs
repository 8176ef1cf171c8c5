//! `airtable-proxy`: path-discriminated Airtable forwarder.
//!
//! * `GET /job-descriptions`: raw table listing
//! * `GET /candidates?position=`: raw listing plus `ResumeText` / `InterviewText`
//! * `PATCH /update-job/{id}`: body forwarded as the PATCH body

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::models::candidate::FileText;
use crate::proxy::{not_found, preflight, proxy_error};
use crate::state::AppState;
use crate::store::airtable::{
    attachment_url, position_filter, CANDIDATES_TABLE, INTERVIEW_FILE_FIELD,
    JOB_DESCRIPTIONS_TABLE, RESUME_FILE_FIELD,
};
use crate::store::FileResolver;

const UNPROCESSABLE_FILE: &str = "Could not process file";

/// ANY /functions/v1/airtable-proxy
pub async fn handle_airtable_root(method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight().await.into_response();
    }
    not_found()
}

/// ANY /functions/v1/airtable-proxy/*path
pub async fn handle_airtable_proxy(
    State(state): State<AppState>,
    method: Method,
    Path(path): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return preflight().await.into_response();
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let outcome = match segments.as_slice() {
        ["job-descriptions"] => state
            .airtable
            .list_records(JOB_DESCRIPTIONS_TABLE, None)
            .await,
        ["candidates"] => {
            let filter = params
                .get("position")
                .filter(|p| !p.is_empty())
                .map(|p| position_filter(p));
            match state
                .airtable
                .list_records(CANDIDATES_TABLE, filter.as_deref())
                .await
            {
                Ok(mut data) => {
                    attach_file_texts(state.airtable.files(), &mut data).await;
                    Ok(data)
                }
                Err(e) => Err(e),
            }
        }
        ["update-job", record_id] if !record_id.is_empty() => {
            let patch: Value = match serde_json::from_slice(&body) {
                Ok(patch) => patch,
                Err(e) => {
                    return proxy_error(StatusCode::BAD_REQUEST, format!("Invalid request: {e}"))
                }
            };
            state
                .airtable
                .patch_record(JOB_DESCRIPTIONS_TABLE, record_id, &patch)
                .await
        }
        _ => return not_found(),
    };

    match outcome {
        Ok(data) => Json(data).into_response(),
        Err(e) => proxy_error(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

fn proxy_text(text: FileText) -> String {
    match text {
        FileText::Resolved(text) => text,
        FileText::NotPresent => String::new(),
        FileText::Failed(_) => UNPROCESSABLE_FILE.to_string(),
    }
}

/// Adds `ResumeText` and `InterviewText` to every record's fields.
/// Files are fetched one at a time.
async fn attach_file_texts(files: &FileResolver, data: &mut Value) {
    let Some(records) = data.get_mut("records").and_then(Value::as_array_mut) else {
        return;
    };

    for record in records.iter_mut() {
        let Some(fields) = record.get_mut("fields").and_then(Value::as_object_mut) else {
            continue;
        };
        let resume_url = attachment_url(fields, RESUME_FILE_FIELD).map(str::to_string);
        let interview_url = attachment_url(fields, INTERVIEW_FILE_FIELD).map(str::to_string);

        let resume = files.resolve(resume_url.as_deref()).await;
        let interview = files.resolve(interview_url.as_deref()).await;

        fields.insert("ResumeText".to_string(), Value::String(proxy_text(resume)));
        fields.insert(
            "InterviewText".to_string(),
            Value::String(proxy_text(interview)),
        );
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Client;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_records_without_files_get_empty_texts() {
        let mut data = json!({
            "records": [
                {"id": "rec1", "fields": {"Name": "Anna", "Position": "QA"}}
            ],
            "offset": "itr1"
        });
        attach_file_texts(&FileResolver::new(Client::new()), &mut data).await;

        let fields = &data["records"][0]["fields"];
        assert_eq!(fields["ResumeText"], "");
        assert_eq!(fields["InterviewText"], "");
        assert_eq!(fields["Name"], "Anna");
        assert_eq!(data["offset"], "itr1");
    }

    #[tokio::test]
    async fn test_unreachable_file_gets_placeholder() {
        let mut data = json!({
            "records": [{
                "id": "rec1",
                "fields": {"Resume File": [{"url": "http://127.0.0.1:9/cv.txt"}]}
            }]
        });
        attach_file_texts(&FileResolver::new(Client::new()), &mut data).await;

        let fields = &data["records"][0]["fields"];
        assert_eq!(fields["ResumeText"], UNPROCESSABLE_FILE);
        assert_eq!(fields["InterviewText"], "");
    }

    #[test]
    fn test_failure_and_absence_differ_in_proxy_text() {
        assert_eq!(proxy_text(FileText::NotPresent), "");
        assert_eq!(proxy_text(FileText::Failed("x".to_string())), UNPROCESSABLE_FILE);
    }
}
