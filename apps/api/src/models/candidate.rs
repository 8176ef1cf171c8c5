use serde::{Deserialize, Serialize};

const RESUME_MISSING: &str = "Резюме недоступне";
const INTERVIEW_MISSING: &str = "Інтерв'ю недоступне";
const RESUME_FAILED: &str = "Не вдалося отримати резюме";
const INTERVIEW_FAILED: &str = "Не вдалося отримати інтерв'ю";

/// Outcome of resolving a candidate's file reference to text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum FileText {
    Resolved(String),
    #[default]
    NotPresent,
    /// Download or decoding failed. Carries the reason.
    Failed(String),
}

impl FileText {
    /// Blank resolved text (e.g. a scanned PDF) reads as missing.
    fn display_or(&self, missing: &str, failed: &str) -> String {
        match self {
            FileText::Resolved(text) if !text.trim().is_empty() => text.clone(),
            FileText::Resolved(_) | FileText::NotPresent => missing.to_string(),
            FileText::Failed(_) => failed.to_string(),
        }
    }
}

/// A row of the `Candidates` table with its files resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub position: String,
    pub resume_file: Option<String>,
    pub interview_file: Option<String>,
    #[serde(default)]
    pub resume: FileText,
    #[serde(default)]
    pub interview: FileText,
}

/// What the comparison prompt sees of one candidate.
///
/// Resume and interview are independent: one failing never hides the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub interview: String,
}

impl From<&Candidate> for CandidateProfile {
    fn from(candidate: &Candidate) -> Self {
        CandidateProfile {
            name: candidate.name.clone(),
            resume: candidate.resume.display_or(RESUME_MISSING, RESUME_FAILED),
            interview: candidate
                .interview
                .display_or(INTERVIEW_MISSING, INTERVIEW_FAILED),
        }
    }
}

impl CandidateProfile {
    /// Shortened view for cards: at most `max_chars` characters, then `...`.
    pub fn preview(&self, max_chars: usize) -> CandidatePreview {
        CandidatePreview {
            name: self.name.clone(),
            resume: truncate_chars(&self.resume, max_chars),
            interview: truncate_chars(&self.interview, max_chars),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidatePreview {
    pub name: String,
    pub resume: String,
    pub interview: String,
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
