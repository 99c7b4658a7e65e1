mod api;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment; a missing connection string halts startup
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let mongo_uri = env::var("MONGO_URI").expect("MONGO_URI must be set");

    log::info!("🚀 Starting Comedores Service...");

    // A failed initial connection is logged, not fatal: the server comes up
    // and every handler answers 500 until a restart with a reachable store.
    let db = match database::MongoDb::connect(&mongo_uri).await {
        Ok(db) => {
            log::info!("✅ MongoDB connected successfully");
            Some(db)
        }
        Err(e) => {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            None
        }
    };

    let state = web::Data::new(database::AppState::new(db));

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        // The mobile client calls from app webviews and dev tooling; CORS
        // stays open to any origin.
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health
            .route("/", web::get().to(api::health::index))
            .route("/health", web::get().to(api::health::health_check))
            // Auth
            .route("/register", web::post().to(api::auth::register))
            .route("/login", web::post().to(api::auth::login))
            // Reservations
            .route("/reservations", web::post().to(api::reservations::save_reservation))
            .route(
                "/reservations/history/{user_id}",
                web::get().to(api::reservations::get_reservation_history),
            )
            .route(
                "/reservations/{user_id}",
                web::get().to(api::reservations::get_active_reservation),
            )
            .route(
                "/reservations/{user_id}/{tipo_reserva}",
                web::delete().to(api::reservations::delete_reservation),
            )
            // Users
            .route("/users/{user_id}", web::put().to(api::users::update_user))
            .route(
                "/users/{user_id}/password",
                web::put().to(api::users::update_password),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
