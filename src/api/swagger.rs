use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Smart UIS Comedores API",
        version = "1.0.0",
        description = "REST API for the campus dining reservation app: user registration/login and per-user cafeteria reservation management backed by MongoDB."
    ),
    paths(
        crate::api::health::index,
        crate::api::health::health_check,
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::users::update_user,
        crate::api::users::update_password,
        crate::api::reservations::get_active_reservation,
        crate::api::reservations::save_reservation,
        crate::api::reservations::delete_reservation,
        crate::api::reservations::get_reservation_history,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::RegisterResponse,
            crate::services::auth_service::LoginResponse,
            crate::services::auth_service::UserInfo,
            crate::services::user_service::UpdateUserRequest,
            crate::services::user_service::UpdatePasswordRequest,
            crate::services::user_service::UpdateOutcome,
            crate::services::reservation_service::SaveReservationRequest,
            crate::services::reservation_service::UpsertOutcome,
            crate::models::Reservation,
        )
    ),
    tags(
        (name = "Health", description = "Liveness endpoints."),
        (name = "Auth", description = "User registration and login."),
        (name = "Users", description = "Profile and password updates."),
        (name = "Reservations", description = "Cafeteria reservation management: one active reservation per user and meal type, plus full history."),
    )
)]
pub struct ApiDoc;
