use actix_web::{HttpResponse, web};
use serde::Deserialize;

pub mod complaint_handlers;
pub mod health_handlers;
pub mod log_handlers;
pub mod override_handlers;
pub mod priority_handlers;
pub mod stats_handlers;
pub mod synonym_handlers;
pub mod training_handlers;
pub mod user_handlers;

/// Body of forms that carry nothing but the CSRF token (delete buttons).
#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Register every dashboard route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async { redirect("/logs") }))
        .route("/health", web::get().to(health_handlers::health))
        // Logs
        .route("/logs", web::get().to(log_handlers::list))
        .route("/logs/export", web::get().to(log_handlers::export))
        // Complaints
        .route("/complaints", web::get().to(complaint_handlers::list))
        .route("/complaints/{id}/respond", web::get().to(complaint_handlers::respond_form))
        .route("/complaints/{id}/respond", web::post().to(complaint_handlers::respond))
        // Manual answers
        .route("/overrides", web::get().to(override_handlers::list))
        .route("/overrides", web::post().to(override_handlers::create))
        .route("/overrides/{id}/edit", web::get().to(override_handlers::edit_form))
        .route("/overrides/{id}", web::post().to(override_handlers::update))
        .route("/overrides/{id}/delete", web::post().to(override_handlers::delete))
        // Synonyms
        .route("/synonyms", web::get().to(synonym_handlers::list))
        .route("/synonyms", web::post().to(synonym_handlers::create))
        .route("/synonyms/{id}/delete", web::post().to(synonym_handlers::delete))
        // Priorities
        .route("/priorities", web::get().to(priority_handlers::list))
        .route("/priorities", web::post().to(priority_handlers::create))
        .route("/priorities/{id}/edit", web::get().to(priority_handlers::edit_form))
        .route("/priorities/{id}", web::post().to(priority_handlers::update))
        .route("/priorities/{id}/delete", web::post().to(priority_handlers::delete))
        // Users
        .route("/users", web::get().to(user_handlers::list))
        .route("/users", web::post().to(user_handlers::save))
        .route("/users/{user_id}/delete", web::post().to(user_handlers::delete))
        // Read-only views
        .route("/stats", web::get().to(stats_handlers::index))
        .route("/training", web::get().to(training_handlers::index));
}
