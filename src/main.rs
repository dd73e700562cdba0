use actix_web::{App, HttpServer, middleware, web};

use qabot_admin::config::AppConfig;
use qabot_admin::state::AppState;
use qabot_admin::{handlers, session_key, session_middleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let secret_key = session_key(config.session_key.as_deref());
    let bind_addr = config.bind_addr.clone();

    let state = AppState::new(config).map_err(|e| {
        log::error!("Could not build the bot API client: {e}");
        std::io::Error::other(e.to_string())
    })?;
    log::info!("Forwarding to bot API at {}", state.api.base_url());
    let state = web::Data::new(state);

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(include_str!("../templates/errors/404.html"))
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
