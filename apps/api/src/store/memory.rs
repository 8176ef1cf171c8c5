//! In-memory `HrStore` for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::candidate::Candidate;
use crate::models::job_description::JobDescription;
use crate::store::{HrStore, StoreError};

#[derive(Default)]
pub struct InMemoryStore {
    pub jobs: Mutex<Vec<JobDescription>>,
    pub candidates: Mutex<Vec<Candidate>>,
    pub candidate_queries: Mutex<Vec<String>>,
}

impl InMemoryStore {
    pub fn with(jobs: Vec<JobDescription>, candidates: Vec<Candidate>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            candidates: Mutex::new(candidates),
            candidate_queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HrStore for InMemoryStore {
    async fn list_job_descriptions(&self) -> Result<Vec<JobDescription>, StoreError> {
        Ok(self.jobs.lock().unwrap().clone())
    }

    async fn update_job_description(
        &self,
        id: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        let mut jobs = self.jobs.lock().unwrap();
        match jobs.iter_mut().find(|j| j.id == id) {
            Some(job) => {
                job.description = Some(description.to_string());
                Ok(())
            }
            None => Err(StoreError::Api {
                status: 404,
                body: format!("{{\"error\":\"NOT_FOUND\",\"id\":\"{id}\"}}"),
            }),
        }
    }

    async fn list_candidates_by_position(
        &self,
        position: &str,
    ) -> Result<Vec<Candidate>, StoreError> {
        self.candidate_queries
            .lock()
            .unwrap()
            .push(position.to_string());
        Ok(self
            .candidates
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.position == position)
            .cloned()
            .collect())
    }
}
