//! Job-description editor: select a position, optionally generate a draft,
//! optionally edit it, save.

use crate::ai::AiService;
use crate::errors::AppError;
use crate::models::job_description::JobDescription;
use crate::store::HrStore;

pub async fn find_job(store: &dyn HrStore, id: &str) -> Result<JobDescription, AppError> {
    store
        .list_job_descriptions()
        .await
        .map_err(AppError::action("Не вдалося завантажити список позицій"))?
        .into_iter()
        .find(|job| job.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Job description {id} not found")))
}

/// Generates a draft for the job's position. Nothing is saved.
pub async fn generate_draft(
    store: &dyn HrStore,
    ai: &dyn AiService,
    id: &str,
) -> Result<(JobDescription, String), AppError> {
    let job = find_job(store, id).await?;
    let draft = ai
        .generate_job_description(&job.position)
        .await
        .map_err(AppError::action("Не вдалося згенерувати опис"))?;
    Ok((job, draft))
}

/// Saves `description` and returns the reloaded list.
pub async fn save_description(
    store: &dyn HrStore,
    id: &str,
    description: &str,
) -> Result<Vec<JobDescription>, AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "Опис вакансії не може бути порожнім".to_string(),
        ));
    }

    store
        .update_job_description(id, description)
        .await
        .map_err(AppError::action("Не вдалося зберегти опис"))?;
    tracing::info!("Job description {id} saved");

    store
        .list_job_descriptions()
        .await
        .map_err(AppError::action("Не вдалося завантажити список позицій"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ai::testing::RecordingAi;
    use crate::store::memory::InMemoryStore;

    fn store() -> InMemoryStore {
        InMemoryStore::with(
            vec![
                JobDescription {
                    id: "rec1".to_string(),
                    position: "QA Engineer".to_string(),
                    description: None,
                },
                JobDescription {
                    id: "rec2".to_string(),
                    position: "Designer".to_string(),
                    description: Some("Old text".to_string()),
                },
            ],
            vec![],
        )
    }

    #[tokio::test]
    async fn test_saved_text_visible_on_reload() {
        let store = store();
        let jobs = save_description(&store, "rec1", "New description")
            .await
            .unwrap();
        let saved = jobs.iter().find(|j| j.id == "rec1").unwrap();
        assert_eq!(saved.description.as_deref(), Some("New description"));

        let reloaded = find_job(&store, "rec1").await.unwrap();
        assert_eq!(reloaded.draft(), "New description");
    }

    #[tokio::test]
    async fn test_blank_description_rejected_without_write() {
        let store = store();
        let err = save_description(&store, "rec2", "   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let job = find_job(&store, "rec2").await.unwrap();
        assert_eq!(job.description.as_deref(), Some("Old text"));
    }

    #[tokio::test]
    async fn test_generate_uses_job_position() {
        let store = store();
        let ai = Arc::new(RecordingAi::default());
        let (job, draft) = generate_draft(&store, &*ai, "rec1").await.unwrap();
        assert_eq!(job.position, "QA Engineer");
        assert!(draft.contains("QA Engineer"));
        assert_eq!(*ai.generated.lock().unwrap(), vec!["QA Engineer".to_string()]);
        // Generation alone never writes.
        assert_eq!(find_job(&store, "rec1").await.unwrap().description, None);
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let err = find_job(&store(), "missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
