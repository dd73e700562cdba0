//! Wire formats of the bot API and their mapping onto domain types.
//!
//! Every field is optional on the wire. Conversion fills absent text with
//! fixed placeholders and drops records that cannot be addressed (no
//! positive id), logging each one.

use serde::{Deserialize, Serialize};

use crate::models::{
    AnswerOverride, Complaint, ComplaintStatus, LogEntry, LogPage, PriorityDoc, StatsSnapshot,
    Synonym, TopQuestion, UserRole,
};
use crate::models::pagination::total_pages;

pub const UNKNOWN_USER: &str = "Unknown";
pub const NO_QUESTION: &str = "No question";
pub const NO_ANSWER: &str = "No answer";
pub const NO_COMPLAINT_TEXT: &str = "No complaint text";

fn text_or(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

fn valid_id(id: Option<i64>, kind: &str) -> Option<i64> {
    match id {
        Some(id) if id > 0 => Some(id),
        other => {
            log::warn!("Dropping {kind} record with unusable id {other:?}");
            None
        }
    }
}

fn collect_valid<W, T>(rows: Vec<W>, convert: impl Fn(W) -> Option<T>) -> Vec<T> {
    rows.into_iter().filter_map(convert).collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireLog {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub created_at: Option<String>,
}

impl WireLog {
    pub fn into_entry(self) -> Option<LogEntry> {
        Some(LogEntry {
            id: valid_id(self.id, "log")?,
            user_id: self.user_id,
            username: text_or(self.username, UNKNOWN_USER),
            question: text_or(self.question, NO_QUESTION),
            answer: text_or(self.answer, NO_ANSWER),
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireLogPage {
    pub items: Vec<WireLog>,
    pub total: u64,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub pages: Option<u32>,
}

impl WireLogPage {
    /// `requested_page`/`requested_limit` fill in whatever the reply omits.
    pub fn into_page(self, requested_page: u32, requested_limit: u32) -> LogPage {
        let limit = self.limit.filter(|l| *l > 0).unwrap_or(requested_limit);
        LogPage {
            items: collect_valid(self.items, WireLog::into_entry),
            total: self.total,
            page: self.page.filter(|p| *p > 0).unwrap_or(requested_page),
            limit,
            pages: self.pages.unwrap_or_else(|| total_pages(self.total, limit)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireComplaint {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub complaint: Option<String>,
    pub status: Option<String>,
}

impl WireComplaint {
    pub fn into_complaint(self) -> Option<Complaint> {
        Some(Complaint {
            id: valid_id(self.id, "complaint")?,
            user_id: self.user_id,
            username: text_or(self.username, UNKNOWN_USER),
            question: text_or(self.question, NO_QUESTION),
            answer: text_or(self.answer, NO_ANSWER),
            complaint: text_or(self.complaint, NO_COMPLAINT_TEXT),
            status: ComplaintStatus::from_wire(self.status.as_deref()),
        })
    }
}

pub fn complaints_from_wire(rows: Vec<WireComplaint>) -> Vec<Complaint> {
    collect_valid(rows, WireComplaint::into_complaint)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireOverride {
    pub id: Option<i64>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub created_at: Option<String>,
}

pub fn overrides_from_wire(rows: Vec<WireOverride>) -> Vec<AnswerOverride> {
    collect_valid(rows, |w| {
        Some(AnswerOverride {
            id: valid_id(w.id, "override")?,
            question: w.question.unwrap_or_default(),
            answer: w.answer.unwrap_or_default(),
            created_at: w.created_at,
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireSynonym {
    pub id: Option<i64>,
    pub keyword: Option<String>,
    pub synonym: Option<String>,
}

pub fn synonyms_from_wire(rows: Vec<WireSynonym>) -> Vec<Synonym> {
    collect_valid(rows, |w| {
        Some(Synonym {
            id: valid_id(w.id, "synonym")?,
            keyword: w.keyword.unwrap_or_default(),
            synonym: w.synonym.unwrap_or_default(),
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WirePriority {
    pub id: Option<i64>,
    pub keyword: Option<String>,
    pub document_name: Option<String>,
}

pub fn priorities_from_wire(rows: Vec<WirePriority>) -> Vec<PriorityDoc> {
    collect_valid(rows, |w| {
        Some(PriorityDoc {
            id: valid_id(w.id, "priority")?,
            keyword: w.keyword.unwrap_or_default(),
            document_name: w.document_name.unwrap_or_default(),
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireRole {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub role: Option<String>,
}

pub fn roles_from_wire(rows: Vec<WireRole>) -> Vec<UserRole> {
    collect_valid(rows, |w| {
        Some(UserRole {
            user_id: valid_id(w.user_id, "role")?,
            username: text_or(w.username, UNKNOWN_USER),
            role: w.role.unwrap_or_default(),
        })
    })
}

/// Top-question rows come either as `{name, count}` or, from older
/// backends, as `{question, "запросы"}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireTopQuestion {
    #[serde(alias = "question")]
    pub name: Option<String>,
    #[serde(alias = "запросы")]
    pub count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireStats {
    pub total_logs: u64,
    pub total_complaints: u64,
    pub total_overrides: u64,
    pub complaints_ratio: f64,
    pub stats_today: u64,
    pub stats_week: u64,
    pub stats_month: u64,
    pub top_questions: Vec<WireTopQuestion>,
    pub top_user: Option<String>,
    pub top_count: Option<u64>,
}

impl From<WireStats> for StatsSnapshot {
    fn from(w: WireStats) -> Self {
        StatsSnapshot {
            total_logs: w.total_logs,
            total_complaints: w.total_complaints,
            total_overrides: w.total_overrides,
            complaints_ratio: w.complaints_ratio,
            stats_today: w.stats_today,
            stats_week: w.stats_week,
            stats_month: w.stats_month,
            top_questions: w
                .top_questions
                .into_iter()
                .map(|q| TopQuestion {
                    name: text_or(q.name, "Untitled"),
                    count: q.count.unwrap_or(0),
                })
                .collect(),
            top_user: w.top_user,
            top_count: w.top_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ManualResponseRequest<'a> {
    pub manual_response: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ManualResponseReply {
    pub success: bool,
    pub detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireHealth {
    pub status: Option<String>,
    pub log_count: Option<u64>,
    pub error: Option<String>,
}

/// Upstream health as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamHealth {
    pub healthy: bool,
    pub log_count: Option<u64>,
    pub error: Option<String>,
}

impl From<WireHealth> for UpstreamHealth {
    fn from(w: WireHealth) -> Self {
        UpstreamHealth {
            healthy: w.status.as_deref() == Some("healthy"),
            log_count: w.log_count,
            error: w.error,
        }
    }
}
