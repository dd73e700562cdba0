use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// One question/answer exchange recorded by the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub user_id: Option<i64>,
    pub username: String,
    pub question: String,
    pub answer: String,
    pub created_at: Option<String>,
}

/// A page of log entries plus the totals needed for the pager.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogPage {
    pub items: Vec<LogEntry>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

/// Free-text search plus the per-column filters of the logs panel.
/// Empty fields are left out of the outgoing query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogFilter {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub question: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub answer: String,
}

impl LogFilter {
    pub fn new(
        search: Option<&str>,
        username: Option<&str>,
        question: Option<&str>,
        answer: Option<&str>,
    ) -> Self {
        let clean = |v: Option<&str>| v.map(str::trim).unwrap_or_default().to_string();
        Self {
            search: clean(search),
            username: clean(username),
            question: clean(question),
            answer: clean(answer),
        }
    }

    pub fn is_active(&self) -> bool {
        !(self.search.is_empty()
            && self.username.is_empty()
            && self.question.is_empty()
            && self.answer.is_empty())
    }
}

/// Query sent to `GET /logs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(flatten)]
    pub filter: LogFilter,
}

impl LogQuery {
    pub fn new(page: Option<u32>, limit: Option<u32>, filter: LogFilter) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            filter,
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self { page, ..self.clone() }
    }
}

/// Query sent to `GET /logs/export`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportQuery<'a> {
    pub format: &'a str,
    #[serde(flatten)]
    pub filter: &'a LogFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Anything other than `json` exports CSV.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

/// A downloaded export, passed through to the browser unchanged.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub content_type: String,
    pub filename: String,
    pub body: Vec<u8>,
}
