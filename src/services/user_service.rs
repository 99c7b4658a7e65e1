use crate::{
    database::{is_duplicate_key, MongoDb},
    models::User,
    utils::{error::AppError, required},
};
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};

const USER_NOT_FOUND: &str = "Usuario no encontrado.";

// ==================== REQUEST/RESPONSE MODELS ====================

/// Partial profile update: every user-editable field is individually
/// optional, and only the fields present in the body are written. Unknown
/// keys in the payload are dropped by deserialization.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    #[serde(rename = "codigoEstudiantil")]
    pub codigo_estudiantil: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub services: Option<Bson>,
    #[serde(rename = "streakCount")]
    pub streak_count: Option<i32>,
    pub points: Option<i32>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdatePasswordRequest {
    #[serde(rename = "newPassword")]
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpdateOutcome {
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

impl UpdateUserRequest {
    fn set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(email) = &self.email {
            set.insert("email", email);
        }
        if let Some(nombre) = &self.nombre {
            set.insert("nombre", nombre);
        }
        if let Some(apellido) = &self.apellido {
            set.insert("apellido", apellido);
        }
        if let Some(codigo) = &self.codigo_estudiantil {
            set.insert("codigoEstudiantil", codigo);
        }
        if let Some(services) = &self.services {
            set.insert("services", services.clone());
        }
        if let Some(streak) = self.streak_count {
            set.insert("streakCount", streak);
        }
        if let Some(points) = self.points {
            set.insert("points", points);
        }
        set
    }
}

// ==================== SERVICE FUNCTIONS ====================

pub async fn update_user(
    db: &MongoDb,
    user_id: &str,
    request: &UpdateUserRequest,
) -> Result<UpdateOutcome, AppError> {
    // An unparseable id can match nothing.
    let object_id = ObjectId::parse_str(user_id)
        .map_err(|_| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    let set = request.set_document();
    if set.is_empty() {
        return Err(AppError::BadRequest("No hay campos para actualizar.".to_string()));
    }

    let collection = db.collection::<User>("users");

    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await
        .map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::Conflict("El email ya está registrado.".to_string())
            } else {
                log::error!("❌ Failed to update user {}: {}", user_id, e);
                AppError::Internal(
                    "Error interno del servidor al actualizar datos de usuario.".to_string(),
                )
            }
        })?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
    }

    Ok(UpdateOutcome {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    })
}

pub async fn update_password(
    db: &MongoDb,
    user_id: &str,
    request: &UpdatePasswordRequest,
) -> Result<(), AppError> {
    let new_password = required(&request.new_password, "Nueva contraseña es requerida.")?;

    let object_id = ObjectId::parse_str(user_id)
        .map_err(|_| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    let collection = db.collection::<User>("users");

    let result = collection
        .update_one(
            doc! { "_id": object_id },
            doc! { "$set": { "password": new_password } },
        )
        .await
        .map_err(|e| {
            log::error!("❌ Failed to update password for {}: {}", user_id, e);
            AppError::Internal("Error interno del servidor al actualizar contraseña.".to_string())
        })?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_document_only_present_fields() {
        let request = UpdateUserRequest {
            nombre: Some("Laura".to_string()),
            points: Some(55),
            ..Default::default()
        };

        let set = request.set_document();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("nombre").unwrap(), "Laura");
        assert_eq!(set.get_i32("points").unwrap(), 55);
        assert!(set.get("streakCount").is_none());
        assert!(set.get("email").is_none());
    }

    #[test]
    fn test_set_document_uses_wire_names() {
        let request = UpdateUserRequest {
            codigo_estudiantil: Some("2190015".to_string()),
            streak_count: Some(7),
            ..Default::default()
        };

        let set = request.set_document();
        assert_eq!(set.get_str("codigoEstudiantil").unwrap(), "2190015");
        assert_eq!(set.get_i32("streakCount").unwrap(), 7);
    }

    #[test]
    fn test_set_document_empty_request() {
        assert!(UpdateUserRequest::default().set_document().is_empty());
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let request: UpdateUserRequest =
            serde_json::from_value(serde_json::json!({ "nombre": "X", "isAdmin": true })).unwrap();
        let set = request.set_document();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("nombre").unwrap(), "X");
    }
}
