use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

pub mod api;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod templates_structs;
pub mod web;

/// Session encryption key from `SESSION_KEY`, or a random one (sessions
/// are then lost on restart).
pub fn session_key(configured: Option<&str>) -> Key {
    match configured {
        Some(val) => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        None => {
            log::warn!("No usable SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    }
}

/// Cookie session carrying the CSRF token and flash messages.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}
