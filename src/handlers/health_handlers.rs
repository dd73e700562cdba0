use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::state::AppState;

/// Liveness of the dashboard plus what the bot API reports about itself.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let upstream = match state.api.health().await {
        Ok(health) => json!(health),
        Err(e) => {
            log::warn!("Bot API health check failed: {e}");
            json!({ "healthy": false, "error": e.user_message() })
        }
    };

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "api_url": state.api.base_url(),
        "upstream": upstream,
    }))
}
