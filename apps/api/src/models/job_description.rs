use serde::{Deserialize, Serialize};

/// A row of the `JobDescriptions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: String,
    pub position: String,
    pub description: Option<String>,
}

impl JobDescription {
    /// Text the editor starts from: the stored description, or empty.
    pub fn draft(&self) -> String {
        self.description.clone().unwrap_or_default()
    }
}
