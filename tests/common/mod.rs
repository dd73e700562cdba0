//! Shared test infrastructure: an in-process fake bot API and a tiny
//! cookie-carrying "browser" for driving the dashboard.
//!
//! # Fake bot API
//! - `start_fake_bot()` - seeded backend with every endpoint the dashboard uses
//! - `start_server(routes)` - any ad-hoc backend (malformed bodies, failures)
//! - `UNREACHABLE_URL` - nothing listens there

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{ServerHandle, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, test, web};
use regex::Regex;
use serde_json::{Value, json};

use qabot_admin::config::AppConfig;
use qabot_admin::state::AppState;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Port 1 is reserved; connecting there is refused immediately.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";
pub const SEEDED_LOGS: usize = 45;
pub const EXPORT_FILENAME: &str = "logs_export_20240501_120000.csv";

// ============================================================================
// SERVER SETUP
// ============================================================================

pub struct RunningServer {
    pub base_url: String,
    handle: ServerHandle,
}

impl RunningServer {
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Start an actix server on an ephemeral port with the given routes.
pub async fn start_server<F>(routes: F) -> RunningServer
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(routes.clone()))
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind test server");
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    RunningServer { base_url: format!("http://{addr}"), handle }
}

/// Dashboard state pointing at `base_url`.
pub fn dashboard_state(base_url: &str) -> web::Data<AppState> {
    let base_url = base_url.to_string();
    let config = AppConfig::from_lookup(|name| match name {
        "QABOT_API_URL" => Some(base_url.clone()),
        "QABOT_API_TIMEOUT_SECS" => Some("5".to_string()),
        "APP_NAME" => Some("Test Admin".to_string()),
        _ => None,
    })
    .expect("Failed to build test config");
    web::Data::new(AppState::new(config).expect("Failed to build API client"))
}

// ============================================================================
// FAKE BOT API
// ============================================================================

#[derive(Default)]
pub struct FakeData {
    pub logs: Vec<Value>,
    pub complaints: Vec<Value>,
    pub overrides: Vec<Value>,
    pub synonyms: Vec<Value>,
    pub priorities: Vec<Value>,
    pub roles: Vec<Value>,
    next_id: i64,
}

impl FakeData {
    fn seeded() -> Self {
        let logs = (1..=SEEDED_LOGS as i64)
            .map(|i| {
                json!({
                    "id": i,
                    "user_id": 100 + i % 3,
                    "username": if i % 3 == 0 { "bob" } else { "ann" },
                    "question": format!("question {i}"),
                    "answer": format!("answer {i}"),
                    "created_at": "2024-05-01T10:00:00",
                })
            })
            .collect();

        Self {
            logs,
            complaints: vec![
                json!({"id": 1, "user_id": 101, "username": "ann", "question": "Opening hours",
                       "answer": "We open at 9", "complaint": "It opens at 10", "status": "PENDING"}),
                json!({"id": 2, "user_id": 102, "username": "bob", "question": "Parking",
                       "answer": "Level 1", "complaint": "No spaces", "status": "RESOLVED"}),
                json!({"id": 3, "user_id": null, "username": null, "question": null,
                       "answer": null, "complaint": null, "status": null}),
                json!({"id": 0, "complaint": "unaddressable"}),
            ],
            overrides: vec![
                json!({"id": 1, "question": "Parking", "answer": "Use level 2", "created_at": "2024-05-01T10:00:00"}),
            ],
            synonyms: vec![
                json!({"id": 1, "keyword": "car", "synonym": "auto"}),
                json!({"id": 2, "keyword": "bus", "synonym": "coach"}),
                json!({"id": 3, "keyword": "car", "synonym": "vehicle"}),
            ],
            priorities: vec![
                json!({"id": 1, "keyword": "refund", "document_name": "refund_policy.pdf"}),
            ],
            roles: vec![json!({"user_id": 42, "username": "ann", "role": "admin"})],
            next_id: 100,
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Seeded data plus a record of every request received.
pub struct FakeState {
    pub data: Mutex<FakeData>,
    pub hits: Mutex<Vec<String>>,
}

impl FakeState {
    fn record(&self, req: &HttpRequest) {
        self.hits.lock().unwrap().push(format!("{} {}", req.method(), req.uri()));
    }

    /// Requests seen so far, as `"METHOD /path?query"`.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hits_starting_with(&self, prefix: &str) -> Vec<String> {
        self.hits().into_iter().filter(|h| h.starts_with(prefix)).collect()
    }

    pub fn clear_hits(&self) {
        self.hits.lock().unwrap().clear();
    }
}

pub struct FakeBot {
    pub server: RunningServer,
    pub state: web::Data<FakeState>,
}

impl FakeBot {
    pub fn base_url(&self) -> &str {
        &self.server.base_url
    }
}

pub async fn start_fake_bot() -> FakeBot {
    let state = web::Data::new(FakeState {
        data: Mutex::new(FakeData::seeded()),
        hits: Mutex::new(Vec::new()),
    });
    let shared = state.clone();
    let server = start_server(move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(shared.clone());
        fake_routes(cfg);
    })
    .await;
    FakeBot { server, state }
}

type Query = web::Query<HashMap<String, String>>;

fn detail(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "detail": message }))
}

fn param<'a>(q: &'a Query, name: &str) -> &'a str {
    q.get(name).map(String::as_str).unwrap_or_default()
}

fn fake_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/logs", web::get().to(list_logs))
        .route("/logs/export", web::get().to(export_logs))
        .route("/complaints", web::get().to(list_complaints))
        .route("/complaints/{id}", web::get().to(get_complaint))
        .route("/complaints/{id}/override", web::post().to(resolve_complaint))
        .route("/overrides", web::get().to(list_overrides))
        .route("/overrides", web::post().to(create_override))
        .route("/overrides/{id}", web::put().to(update_override))
        .route("/overrides/{id}", web::delete().to(delete_override))
        .route("/synonyms_from_db", web::get().to(list_synonyms))
        .route("/synonyms", web::post().to(create_synonym))
        .route("/synonyms/{id}", web::delete().to(delete_synonym))
        .route("/priorities", web::get().to(list_priorities))
        .route("/priorities", web::post().to(save_priority))
        .route("/priorities/{id}", web::delete().to(delete_priority))
        .route("/roles", web::get().to(list_roles))
        .route("/roles", web::post().to(save_role))
        .route("/roles/{user_id}", web::delete().to(delete_role))
        .route("/stats", web::get().to(stats))
        .route("/health", web::get().to(health));
}

fn matches_filters(log: &Value, q: &Query) -> bool {
    let field = |name: &str| log[name].as_str().unwrap_or_default().to_string();
    let search = param(q, "search");
    let username = param(q, "username");
    (username.is_empty() || field("username") == username)
        && (search.is_empty() || field("question").contains(search) || field("answer").contains(search))
}

async fn list_logs(state: web::Data<FakeState>, req: HttpRequest, q: Query) -> HttpResponse {
    state.record(&req);
    let page = param(&q, "page").parse::<usize>().unwrap_or(1).max(1);
    let limit = param(&q, "limit").parse::<usize>().unwrap_or(20).max(1);

    let data = state.data.lock().unwrap();
    let matching: Vec<&Value> = data.logs.iter().filter(|l| matches_filters(l, &q)).collect();
    let total = matching.len();
    let items: Vec<&Value> = matching.into_iter().skip((page - 1) * limit).take(limit).collect();

    HttpResponse::Ok().json(json!({
        "items": items,
        "total": total,
        "page": page,
        "limit": limit,
        "pages": total.div_ceil(limit),
    }))
}

async fn export_logs(state: web::Data<FakeState>, req: HttpRequest, q: Query) -> HttpResponse {
    state.record(&req);
    let data = state.data.lock().unwrap();
    let rows: Vec<String> = data
        .logs
        .iter()
        .filter(|l| matches_filters(l, &q))
        .map(|l| format!("{},{}", l["id"], l["username"].as_str().unwrap_or_default()))
        .collect();

    if param(&q, "format") == "json" {
        return HttpResponse::Ok()
            .content_type("application/json")
            .insert_header(("Content-Disposition", "attachment; filename=logs_export_20240501_120000.json"))
            .body(json!(rows).to_string());
    }
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", format!("attachment; filename={EXPORT_FILENAME}")))
        .body(format!("id,username\n{}\n", rows.join("\n")))
}

async fn list_complaints(state: web::Data<FakeState>, req: HttpRequest) -> HttpResponse {
    state.record(&req);
    HttpResponse::Ok().json(&state.data.lock().unwrap().complaints)
}

async fn get_complaint(state: web::Data<FakeState>, req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
    state.record(&req);
    let id = path.into_inner();
    let data = state.data.lock().unwrap();
    match data.complaints.iter().find(|c| c["id"] == id) {
        Some(c) => HttpResponse::Ok().json(c),
        None => detail(StatusCode::NOT_FOUND, "Complaint not found"),
    }
}

async fn resolve_complaint(
    state: web::Data<FakeState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> HttpResponse {
    state.record(&req);
    let id = path.into_inner();
    let response = body["manual_response"].as_str().unwrap_or_default().trim().to_string();
    if response.is_empty() {
        return detail(StatusCode::BAD_REQUEST, "Manual response is required");
    }

    let mut data = state.data.lock().unwrap();
    match data.complaints.iter_mut().find(|c| c["id"] == id) {
        Some(c) => {
            c["status"] = json!("RESOLVED");
            c["answer"] = json!(response);
            HttpResponse::Ok().json(json!({
                "success": true,
                "user_id": c["user_id"],
                "complaint_id": id,
                "manual_response": response,
            }))
        }
        None => detail(StatusCode::NOT_FOUND, "Complaint not found"),
    }
}

async fn list_overrides(state: web::Data<FakeState>, req: HttpRequest) -> HttpResponse {
    state.record(&req);
    HttpResponse::Ok().json(&state.data.lock().unwrap().overrides)
}

async fn create_override(state: web::Data<FakeState>, req: HttpRequest, q: Query) -> HttpResponse {
    state.record(&req);
    let mut data = state.data.lock().unwrap();
    let (question, answer) = (param(&q, "question"), param(&q, "answer"));
    if let Some(i) = data.overrides.iter().position(|o| o["question"] == question) {
        data.overrides[i]["answer"] = json!(answer);
        return HttpResponse::Ok().json(json!({"status": "ok", "id": data.overrides[i]["id"]}));
    }
    let id = data.next_id();
    data.overrides.push(json!({"id": id, "question": question, "answer": answer, "created_at": "2024-05-02T09:00:00"}));
    HttpResponse::Ok().json(json!({"status": "ok", "id": id}))
}

async fn update_override(state: web::Data<FakeState>, req: HttpRequest, path: web::Path<i64>, q: Query) -> HttpResponse {
    state.record(&req);
    let id = path.into_inner();
    let mut data = state.data.lock().unwrap();
    match data.overrides.iter_mut().find(|o| o["id"] == id) {
        Some(o) => {
            o["question"] = json!(param(&q, "question"));
            o["answer"] = json!(param(&q, "answer"));
            HttpResponse::Ok().json(json!({"status": "ok"}))
        }
        None => detail(StatusCode::NOT_FOUND, "Override not found"),
    }
}

fn remove_by(rows: &mut Vec<Value>, key: &str, id: i64) -> bool {
    let before = rows.len();
    rows.retain(|r| r[key] != id);
    rows.len() != before
}

async fn delete_override(state: web::Data<FakeState>, req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
    state.record(&req);
    if remove_by(&mut state.data.lock().unwrap().overrides, "id", path.into_inner()) {
        HttpResponse::Ok().json(json!({"status": "deleted"}))
    } else {
        detail(StatusCode::NOT_FOUND, "Override not found")
    }
}

async fn list_synonyms(state: web::Data<FakeState>, req: HttpRequest) -> HttpResponse {
    state.record(&req);
    HttpResponse::Ok().json(&state.data.lock().unwrap().synonyms)
}

async fn create_synonym(state: web::Data<FakeState>, req: HttpRequest, q: Query) -> HttpResponse {
    state.record(&req);
    let mut data = state.data.lock().unwrap();
    let id = data.next_id();
    let row = json!({"id": id, "keyword": param(&q, "keyword"), "synonym": param(&q, "synonym")});
    data.synonyms.push(row);
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

async fn delete_synonym(state: web::Data<FakeState>, req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
    state.record(&req);
    if remove_by(&mut state.data.lock().unwrap().synonyms, "id", path.into_inner()) {
        HttpResponse::Ok().json(json!({"status": "deleted"}))
    } else {
        detail(StatusCode::NOT_FOUND, "Synonym not found")
    }
}

async fn list_priorities(state: web::Data<FakeState>, req: HttpRequest) -> HttpResponse {
    state.record(&req);
    HttpResponse::Ok().json(&state.data.lock().unwrap().priorities)
}

async fn save_priority(state: web::Data<FakeState>, req: HttpRequest, q: Query) -> HttpResponse {
    state.record(&req);
    let mut data = state.data.lock().unwrap();
    let (keyword, document) = (param(&q, "keyword"), param(&q, "document_name"));
    match data.priorities.iter().position(|p| p["keyword"] == keyword) {
        Some(i) => data.priorities[i]["document_name"] = json!(document),
        None => {
            let id = data.next_id();
            data.priorities.push(json!({"id": id, "keyword": keyword, "document_name": document}));
        }
    }
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

async fn delete_priority(state: web::Data<FakeState>, req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
    state.record(&req);
    if remove_by(&mut state.data.lock().unwrap().priorities, "id", path.into_inner()) {
        HttpResponse::Ok().json(json!({"status": "deleted"}))
    } else {
        detail(StatusCode::NOT_FOUND, "Priority not found")
    }
}

async fn list_roles(state: web::Data<FakeState>, req: HttpRequest) -> HttpResponse {
    state.record(&req);
    HttpResponse::Ok().json(&state.data.lock().unwrap().roles)
}

async fn save_role(state: web::Data<FakeState>, req: HttpRequest, q: Query) -> HttpResponse {
    state.record(&req);
    let Ok(user_id) = param(&q, "user_id").parse::<i64>() else {
        return HttpResponse::UnprocessableEntity().json(json!({
            "detail": [{"loc": ["query", "user_id"], "msg": "value is not a valid integer"}]
        }));
    };
    let mut data = state.data.lock().unwrap();
    let row = json!({"user_id": user_id, "username": param(&q, "username"), "role": param(&q, "role")});
    match data.roles.iter().position(|r| r["user_id"] == user_id) {
        Some(i) => data.roles[i] = row,
        None => data.roles.push(row),
    }
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

async fn delete_role(state: web::Data<FakeState>, req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
    state.record(&req);
    remove_by(&mut state.data.lock().unwrap().roles, "user_id", path.into_inner());
    HttpResponse::Ok().json(json!({"status": "deleted"}))
}

async fn stats(state: web::Data<FakeState>, req: HttpRequest) -> HttpResponse {
    state.record(&req);
    let data = state.data.lock().unwrap();
    let total_logs = data.logs.len();
    let total_complaints = data.complaints.len();
    HttpResponse::Ok().json(json!({
        "total_logs": total_logs,
        "total_complaints": total_complaints,
        "total_overrides": data.overrides.len(),
        "top_user": "ann",
        "top_count": 30,
        "stats_today": 5,
        "stats_week": 20,
        "stats_month": total_logs,
        "top_questions": [
            {"name": "question 1", "запросы": 7},
            {"name": "question 2", "запросы": 3},
        ],
        "complaints_ratio": 8.89,
    }))
}

async fn health(state: web::Data<FakeState>, req: HttpRequest) -> HttpResponse {
    state.record(&req);
    HttpResponse::Ok().json(json!({"status": "healthy", "log_count": state.data.lock().unwrap().logs.len()}))
}

// ============================================================================
// BROWSER
// ============================================================================

/// A rendered dashboard response.
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: String,
}

/// Carries the session cookie between requests, like a browser would.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_cookie(&self, req: test::TestRequest) -> test::TestRequest {
        match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        }
    }

    pub fn get(&self, uri: &str) -> test::TestRequest {
        self.with_cookie(test::TestRequest::get().uri(uri))
    }

    pub fn post(&self, uri: &str, form: &[(&str, &str)]) -> test::TestRequest {
        let body = serde_urlencoded::to_string(form).expect("Failed to encode form");
        self.with_cookie(
            test::TestRequest::post()
                .uri(uri)
                .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
                .set_payload(body),
        )
    }

    /// Read a response, keeping any refreshed session cookie.
    pub async fn read<B: MessageBody>(&mut self, resp: ServiceResponse<B>) -> Page {
        if let Some(cookie) = resp.response().cookies().find(|c| c.name() == "id") {
            self.cookie = Some(cookie.into_owned());
        }
        let header = |name: &str| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let status = resp.status();
        let location = header("Location");
        let content_type = header("Content-Type");
        let content_disposition = header("Content-Disposition");
        let body = test::read_body(resp).await;

        Page {
            status,
            location,
            content_type,
            content_disposition,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }
}

// ============================================================================
// CSRF TOKEN EXTRACTION
// ============================================================================

pub fn extract_csrf_token(html: &str) -> String {
    // <input type="hidden" name="csrf_token" value="...">
    let re = Regex::new(r#"name="csrf_token"\s+value="([^"]+)""#)
        .expect("Failed to compile regex");

    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| {
            eprintln!("CSRF token not found in HTML");
            "invalid_token".to_string()
        })
}
