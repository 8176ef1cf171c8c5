//! Localized notices returned with screen actions (the "toast").

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Info,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub description: String,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Успіх",
            description: description.into(),
        }
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: "Інформація",
            description: description.into(),
        }
    }
}
