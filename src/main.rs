use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use taskboard_server::{health_check, AppError, AppState, Settings};
use taskboard_server::auth::handlers::{login, logout, refresh, register};
use taskboard_server::tasks::handlers::{
    create_task, delete_task, get_task, list_tasks, toggle_task, update_task,
};
use dotenv::dotenv;
use std::net::TcpListener;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

const EXPIRED_TOKEN_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

#[actix_web::main]
async fn main() -> taskboard_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    info!("Starting server at {}:{}", config.server.host, config.server.port);

    // Initialize application state
    let state = AppState::new(config.clone()).await?;
    let state = web::Data::new(state);

    // Sweep expired refresh tokens so revocation rows don't pile up; an
    // expired record is also deleted the moment a refresh call trips on it
    let sweep_state = state.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(EXPIRED_TOKEN_SWEEP_INTERVAL).await;

            match sweep_state.db.delete_expired_refresh_records().await {
                Ok(0) => {}
                Ok(removed) => info!("Removed {} expired refresh tokens", removed),
                Err(e) => error!("Expired refresh token sweep failed: {}", e),
            }
        }
    });

    // Create and bind TCP listener
    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;

    // Start HTTP server
    HttpServer::new(move || {
        // The frontend sends the refresh cookie cross-origin, so credentials
        // must be allowed for its origin
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
            .allowed_headers(vec!["Authorization", "Content-Type"])
            .supports_credentials();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .route("/health", web::get().to(health_check))
            .route("/auth/register", web::post().to(register))
            .route("/auth/login", web::post().to(login))
            .route("/auth/refresh", web::post().to(refresh))
            .route("/auth/logout", web::post().to(logout))
            .service(
                web::scope("/tasks")
                    .route("", web::post().to(create_task))
                    .route("", web::get().to(list_tasks))
                    .route("/{id}", web::get().to(get_task))
                    .route("/{id}", web::patch().to(update_task))
                    .route("/{id}", web::delete().to(delete_task))
                    .route("/{id}/toggle", web::patch().to(toggle_task)),
            )
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
