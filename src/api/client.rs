//! HTTP client for the bot backend.

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::*;
use crate::config::ApiSettings;
use crate::models::{
    AnswerOverride, Complaint, ExportFile, ExportFormat, LogFilter, LogPage, LogQuery,
    PriorityDoc, StatsSnapshot, Synonym, UserRole,
};
use crate::models::log_entry::ExportQuery;

/// Errors that can occur when talking to the bot API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot connect to {0}")]
    Connection(String),
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("unexpected response shape: {0}")]
    Shape(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Short text safe to show to an operator.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Connection(_) => "the bot API is unreachable".to_string(),
            ApiError::Transport(e) if e.is_timeout() => "the bot API did not respond in time".to_string(),
            ApiError::Transport(_) => "the request to the bot API failed".to_string(),
            ApiError::Status { status, detail } => format!("{detail} (HTTP {status})"),
            ApiError::Shape(_) => "the bot API returned an unexpected response".to_string(),
            ApiError::Rejected(detail) => detail.clone(),
        }
    }
}

/// Pull a readable message out of an error body.
///
/// Accepts `{"detail": "..."}`, validation-style `{"detail": [{"msg": ...}]}`
/// and `{"error": "..."}`.
pub fn extract_detail(body: &str) -> Option<String> {
    use serde_json::Value;

    let value: Value = serde_json::from_str(body).ok()?;
    let detail = value.get("detail").or_else(|| value.get("error"))?;
    match detail {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

/// `filename=` value of a Content-Disposition header.
fn disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Client for the bot API. Cheap to clone.
#[derive(Clone)]
pub struct BotApiClient {
    client: Client,
    base_url: String,
}

impl BotApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.timeout.min(std::time::Duration::from_secs(5)))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request; non-2xx replies become `ApiError::Status`.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Connection(self.base_url.clone())
            } else {
                ApiError::Transport(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body).unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("request failed").to_string()
        });
        Err(ApiError::Status { status: status.as_u16(), detail })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Shape(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.client.get(self.url(path))).await?;
        Self::decode(response).await
    }

    async fn get_json_with<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.execute(self.client.get(self.url(path)).query(query)).await?;
        Self::decode(response).await
    }

    /// Fire a write whose reply body carries nothing we need.
    async fn write(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    // ---------- Logs ----------

    pub async fn list_logs(&self, query: &LogQuery) -> Result<LogPage, ApiError> {
        let wire: WireLogPage = self.get_json_with("/logs", query).await?;
        Ok(wire.into_page(query.page, query.limit))
    }

    pub async fn export_logs(&self, filter: &LogFilter, format: ExportFormat) -> Result<ExportFile, ApiError> {
        let query = ExportQuery { format: format.as_str(), filter };
        let response = self
            .execute(self.client.get(self.url("/logs/export")).query(&query))
            .await?;

        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(reqwest::header::CONTENT_TYPE)
            .unwrap_or_else(|| format.content_type().to_string());
        let filename = header(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|h| disposition_filename(&h))
            .unwrap_or_else(|| {
                format!(
                    "logs_export_{}.{}",
                    chrono::Utc::now().format("%Y%m%d_%H%M%S"),
                    format.as_str()
                )
            });

        let body = response.bytes().await?.to_vec();
        Ok(ExportFile { content_type, filename, body })
    }

    // ---------- Complaints ----------

    pub async fn list_complaints(&self) -> Result<Vec<Complaint>, ApiError> {
        let rows: Vec<WireComplaint> = self.get_json("/complaints").await?;
        Ok(complaints_from_wire(rows))
    }

    pub async fn get_complaint(&self, id: i64) -> Result<Complaint, ApiError> {
        let wire: WireComplaint = self.get_json(&format!("/complaints/{id}")).await?;
        wire.into_complaint()
            .ok_or_else(|| ApiError::Shape(format!("complaint {id} came back without an id")))
    }

    /// Send an operator answer for a complaint; the backend marks it resolved.
    pub async fn resolve_complaint(&self, id: i64, manual_response: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/complaints/{id}/override")))
            .json(&ManualResponseRequest { manual_response });
        let reply: ManualResponseReply = Self::decode(self.execute(request).await?).await?;
        if reply.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                reply.detail.unwrap_or_else(|| "the bot API did not confirm the answer".to_string()),
            ))
        }
    }

    // ---------- Overrides ----------

    pub async fn list_overrides(&self) -> Result<Vec<AnswerOverride>, ApiError> {
        let rows: Vec<WireOverride> = self.get_json("/overrides").await?;
        Ok(overrides_from_wire(rows))
    }

    pub async fn create_override(&self, question: &str, answer: &str) -> Result<(), ApiError> {
        self.write(
            self.client
                .post(self.url("/overrides"))
                .query(&[("question", question), ("answer", answer)]),
        )
        .await
    }

    pub async fn update_override(&self, id: i64, question: &str, answer: &str) -> Result<(), ApiError> {
        self.write(
            self.client
                .put(self.url(&format!("/overrides/{id}")))
                .query(&[("question", question), ("answer", answer)]),
        )
        .await
    }

    pub async fn delete_override(&self, id: i64) -> Result<(), ApiError> {
        self.write(self.client.delete(self.url(&format!("/overrides/{id}")))).await
    }

    // ---------- Synonyms ----------

    pub async fn list_synonyms(&self) -> Result<Vec<Synonym>, ApiError> {
        let rows: Vec<WireSynonym> = self.get_json("/synonyms_from_db").await?;
        Ok(synonyms_from_wire(rows))
    }

    pub async fn create_synonym(&self, keyword: &str, synonym: &str) -> Result<(), ApiError> {
        self.write(
            self.client
                .post(self.url("/synonyms"))
                .query(&[("keyword", keyword), ("synonym", synonym)]),
        )
        .await
    }

    pub async fn delete_synonym(&self, id: i64) -> Result<(), ApiError> {
        self.write(self.client.delete(self.url(&format!("/synonyms/{id}")))).await
    }

    // ---------- Priorities ----------

    pub async fn list_priorities(&self) -> Result<Vec<PriorityDoc>, ApiError> {
        let rows: Vec<WirePriority> = self.get_json("/priorities").await?;
        Ok(priorities_from_wire(rows))
    }

    /// Create a priority, or replace the document of an existing keyword.
    pub async fn save_priority(&self, keyword: &str, document_name: &str) -> Result<(), ApiError> {
        self.write(
            self.client
                .post(self.url("/priorities"))
                .query(&[("keyword", keyword), ("document_name", document_name)]),
        )
        .await
    }

    pub async fn delete_priority(&self, id: i64) -> Result<(), ApiError> {
        self.write(self.client.delete(self.url(&format!("/priorities/{id}")))).await
    }

    // ---------- Roles ----------

    pub async fn list_roles(&self) -> Result<Vec<UserRole>, ApiError> {
        let rows: Vec<WireRole> = self.get_json("/roles").await?;
        Ok(roles_from_wire(rows))
    }

    /// Create a role, or update it when `user_id` already has one.
    pub async fn save_role(&self, role: &UserRole) -> Result<(), ApiError> {
        let user_id = role.user_id.to_string();
        self.write(self.client.post(self.url("/roles")).query(&[
            ("user_id", user_id.as_str()),
            ("username", role.username.as_str()),
            ("role", role.role.as_str()),
        ]))
        .await
    }

    pub async fn delete_role(&self, user_id: i64) -> Result<(), ApiError> {
        self.write(self.client.delete(self.url(&format!("/roles/{user_id}")))).await
    }

    // ---------- Stats & health ----------

    pub async fn stats(&self) -> Result<StatsSnapshot, ApiError> {
        let wire: WireStats = self.get_json("/stats").await?;
        Ok(wire.into())
    }

    pub async fn health(&self) -> Result<UpstreamHealth, ApiError> {
        let wire: WireHealth = self.get_json("/health").await?;
        Ok(wire.into())
    }
}
