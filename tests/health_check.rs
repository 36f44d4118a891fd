use actix_web::{test, web, App};
use chrono::DateTime;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use taskboard_server::{AppState, AuthService, DbOperations, Settings, TokenCodec};

#[actix_web::test]
async fn test_health_check() {
    // Health never touches the database, so a lazy pool is enough
    let config = Settings::new().expect("Failed to load config");
    let pool = Arc::new(
        PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .expect("Failed to create lazy pool"),
    );
    let db = DbOperations::new(pool);
    let auth = AuthService::new(
        db.clone(),
        TokenCodec::new(&config.auth),
        config.auth.password_min_length,
    );
    let state = web::Data::new(AppState {
        config: Arc::new(config),
        db,
        auth: Arc::new(auth),
    });

    // Create test app
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .route("/health", web::get().to(taskboard_server::health_check))
    ).await;

    // Send request
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    // Assert response
    assert!(resp.status().is_success());

    // Parse response body
    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Verify response format
    assert_eq!(json["status"], "healthy");
    assert!(DateTime::parse_from_rfc3339(
        json["timestamp"].as_str().unwrap()
    ).is_ok());
}
