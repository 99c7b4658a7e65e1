use actix_web::{web, HttpResponse};

use crate::database::AppState;
use crate::services::auth_service::{self, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing required field"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /register - email: {}", email);

    let db = match state.mongo() {
        Ok(db) => db,
        Err(e) => return e.to_response(),
    };

    match auth_service::register(db, &request).await {
        Ok(response) => {
            log::info!("✅ Registration successful: {}", email);
            HttpResponse::Created().json(response)
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", email, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /login - email: {}", email);

    let db = match state.mongo() {
        Ok(db) => db,
        Err(e) => return e.to_response(),
    };

    match auth_service::login(db, &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", email, e);
            e.to_response()
        }
    }
}
