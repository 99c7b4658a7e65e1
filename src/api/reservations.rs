use actix_web::{web, HttpResponse};

use crate::database::AppState;
use crate::models::Reservation;
use crate::services::reservation_service::{self, SaveReservationRequest};

#[utoipa::path(
    get,
    path = "/reservations/{user_id}",
    tag = "Reservations",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Active reservation", body = Reservation),
        (status = 404, description = "No active reservation for this user"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn get_active_reservation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("🍽️ GET /reservations/{}", user_id);

    let db = match state.mongo() {
        Ok(db) => db,
        Err(e) => return e.to_response(),
    };

    match reservation_service::active_reservation(db, &user_id).await {
        Ok(reservation) => HttpResponse::Ok().json(reservation),
        Err(e) => {
            log::warn!("❌ Reservation lookup failed for {}: {}", user_id, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/reservations",
    tag = "Reservations",
    request_body = SaveReservationRequest,
    responses(
        (status = 200, description = "Reservation created or replaced"),
        (status = 400, description = "Missing required field"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn save_reservation(
    state: web::Data<AppState>,
    request: web::Json<SaveReservationRequest>,
) -> HttpResponse {
    log::info!(
        "🍽️ POST /reservations - user: {}, tipo: {}",
        request.user_id.as_deref().unwrap_or("N/A"),
        request.tipo.as_deref().unwrap_or("N/A")
    );

    let db = match state.mongo() {
        Ok(db) => db,
        Err(e) => return e.to_response(),
    };

    match reservation_service::save_reservation(db, &request).await {
        Ok(result) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Reserva actualizada/creada con éxito!",
            "result": result,
        })),
        Err(e) => {
            log::warn!("❌ Failed to save reservation: {}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/reservations/{user_id}/{tipo_reserva}",
    tag = "Reservations",
    params(
        ("user_id" = String, Path, description = "User identifier"),
        ("tipo_reserva" = String, Path, description = "Meal type of the reservation")
    ),
    responses(
        (status = 200, description = "Reservation deleted"),
        (status = 404, description = "Reservation not found"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn delete_reservation(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (user_id, tipo) = path.into_inner();
    log::info!("🗑️ DELETE /reservations/{}/{}", user_id, tipo);

    let db = match state.mongo() {
        Ok(db) => db,
        Err(e) => return e.to_response(),
    };

    match reservation_service::delete_reservation(db, &user_id, &tipo).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Reserva eliminada con éxito!",
        })),
        Err(e) => {
            log::warn!("❌ Failed to delete reservation {}/{}: {}", user_id, tipo, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/reservations/history/{user_id}",
    tag = "Reservations",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "All reservations for the user", body = [Reservation]),
        (status = 500, description = "Internal error")
    )
)]
pub async fn get_reservation_history(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("📜 GET /reservations/history/{}", user_id);

    let db = match state.mongo() {
        Ok(db) => db,
        Err(e) => return e.to_response(),
    };

    match reservation_service::reservation_history(db, &user_id).await {
        Ok(history) => HttpResponse::Ok().json(history),
        Err(e) => {
            log::warn!("❌ Failed to fetch history for {}: {}", user_id, e);
            e.to_response()
        }
    }
}
