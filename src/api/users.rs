use actix_web::{web, HttpResponse};

use crate::database::AppState;
use crate::services::user_service::{self, UpdatePasswordRequest, UpdateUserRequest};

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User fields updated"),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("👤 PUT /users/{}", user_id);

    let db = match state.mongo() {
        Ok(db) => db,
        Err(e) => return e.to_response(),
    };

    match user_service::update_user(db, &user_id, &request).await {
        Ok(result) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Datos de usuario actualizados con éxito!",
            "result": result,
        })),
        Err(e) => {
            log::warn!("❌ Failed to update user {}: {}", user_id, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/users/{user_id}/password",
    tag = "Users",
    params(("user_id" = String, Path, description = "User identifier")),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Missing new password"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn update_password(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<UpdatePasswordRequest>,
) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("🔑 PUT /users/{}/password", user_id);

    let db = match state.mongo() {
        Ok(db) => db,
        Err(e) => return e.to_response(),
    };

    match user_service::update_password(db, &user_id, &request).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Contraseña actualizada con éxito!",
        })),
        Err(e) => {
            log::warn!("❌ Failed to update password for {}: {}", user_id, e);
            e.to_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_update_user_without_storage_returns_500() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(None)))
                .route("/users/{user_id}", web::put().to(update_user)),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/users/665f1a2b3c4d5e6f77889900")
            .set_json(serde_json::json!({ "nombre": "X" }))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "Base de datos no conectada.");
    }
}
