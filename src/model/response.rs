use crate::model::session::Identity;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One-shot message shown above the page content.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

/// Data payload handed to the renderer for every view.
#[derive(Debug, Serialize)]
pub struct PageContext<T: Serialize> {
    pub title: String,
    pub username: Option<String>,
    pub is_guest: bool,
    pub notice: Option<Notice>,
    pub rows: Vec<T>,
}

impl<T: Serialize> PageContext<T> {
    pub fn new(title: &str, identity: Option<&Identity>) -> Self {
        PageContext {
            title: title.to_string(),
            username: identity.map(|i| i.username().to_string()),
            is_guest: identity.map_or(false, Identity::is_guest),
            notice: None,
            rows: Vec::new(),
        }
    }

    pub fn with_notice(mut self, notice: Option<Notice>) -> Self {
        self.notice = notice;
        self
    }

    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.rows = rows;
        self
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
