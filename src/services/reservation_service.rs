use crate::{
    database::MongoDb,
    models::Reservation,
    utils::{error::AppError, required},
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson};
use serde::{Deserialize, Serialize};

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SaveReservationRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub tipo: Option<String>,
    pub fecha: Option<String>,
    pub hora: Option<String>,
}

/// Outcome of the replace-upsert, mirrored back to the client.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpsertOutcome {
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
    #[serde(rename = "upsertedId", skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

impl SaveReservationRequest {
    fn to_reservation(&self) -> Result<Reservation, AppError> {
        const MISSING: &str = "Todos los campos de la reserva son requeridos.";

        Ok(Reservation {
            id: None,
            user_id: required(&self.user_id, MISSING)?.to_string(),
            tipo: required(&self.tipo, MISSING)?.to_string(),
            fecha: required(&self.fecha, MISSING)?.to_string(),
            hora: required(&self.hora, MISSING)?.to_string(),
        })
    }
}

// ==================== SERVICE FUNCTIONS ====================

/// First reservation found for the user, regardless of meal type.
pub async fn active_reservation(db: &MongoDb, user_id: &str) -> Result<Reservation, AppError> {
    let collection = db.collection::<Reservation>("reservas");

    collection
        .find_one(doc! { "userId": user_id })
        .await
        .map_err(|e| {
            log::error!("❌ Database error fetching reservation: {}", e);
            AppError::Internal("Error interno del servidor al obtener reserva.".to_string())
        })?
        .ok_or_else(|| {
            AppError::NotFound("No se encontró reserva activa para este usuario.".to_string())
        })
}

/// Replaces the reservation keyed on `(userId, tipo)` wholesale, inserting
/// it when none exists. One active reservation per user and meal type.
pub async fn save_reservation(
    db: &MongoDb,
    request: &SaveReservationRequest,
) -> Result<UpsertOutcome, AppError> {
    let reservation = request.to_reservation()?;
    let collection = db.collection::<Reservation>("reservas");

    let result = collection
        .replace_one(
            doc! { "userId": &reservation.user_id, "tipo": &reservation.tipo },
            &reservation,
        )
        .upsert(true)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to save reservation: {}", e);
            AppError::Internal("Error interno del servidor al guardar reserva.".to_string())
        })?;

    Ok(UpsertOutcome {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
        upserted_id: result
            .upserted_id
            .as_ref()
            .and_then(Bson::as_object_id)
            .map(|id| id.to_hex()),
    })
}

pub async fn delete_reservation(db: &MongoDb, user_id: &str, tipo: &str) -> Result<(), AppError> {
    let collection = db.collection::<Reservation>("reservas");

    let result = collection
        .delete_one(doc! { "userId": user_id, "tipo": tipo })
        .await
        .map_err(|e| {
            log::error!("❌ Failed to delete reservation: {}", e);
            AppError::Internal("Error interno del servidor al eliminar reserva.".to_string())
        })?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound("Reserva no encontrada.".to_string()));
    }

    Ok(())
}

/// Every reservation recorded for the user, unordered and unfiltered.
pub async fn reservation_history(db: &MongoDb, user_id: &str) -> Result<Vec<Reservation>, AppError> {
    const INTERNAL: &str = "Error interno del servidor al obtener historial.";

    let collection = db.collection::<Reservation>("reservas");

    let mut cursor = collection.find(doc! { "userId": user_id }).await.map_err(|e| {
        log::error!("❌ Database error fetching history: {}", e);
        AppError::Internal(INTERNAL.to_string())
    })?;

    let mut history = Vec::new();
    while let Some(reservation) = cursor.try_next().await.map_err(|e| {
        log::error!("❌ Cursor error fetching history: {}", e);
        AppError::Internal(INTERNAL.to_string())
    })? {
        history.push(reservation);
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_builds_reservation() {
        let request = SaveReservationRequest {
            user_id: Some("u1".to_string()),
            tipo: Some("almuerzo".to_string()),
            fecha: Some("2024-01-01".to_string()),
            hora: Some("12:00".to_string()),
        };

        let reservation = request.to_reservation().unwrap();
        assert_eq!(reservation.user_id, "u1");
        assert_eq!(reservation.tipo, "almuerzo");
        assert!(reservation.id.is_none());
    }

    #[test]
    fn test_save_request_rejects_missing_field() {
        let request = SaveReservationRequest {
            user_id: Some("u1".to_string()),
            tipo: Some("almuerzo".to_string()),
            fecha: Some("2024-01-01".to_string()),
            hora: None,
        };

        let err = request.to_reservation().unwrap_err();
        assert_eq!(err.to_string(), "Todos los campos de la reserva son requeridos.");
    }

    #[test]
    fn test_upsert_outcome_wire_names() {
        let outcome = UpsertOutcome {
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some("665f1a2b3c4d5e6f77889900".to_string()),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["matchedCount"], 0);
        assert_eq!(json["modifiedCount"], 0);
        assert_eq!(json["upsertedId"], "665f1a2b3c4d5e6f77889900");
    }
}
