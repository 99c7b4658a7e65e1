use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};

/// User document stored in the `users` collection. Field names on the wire
/// match the mobile client payloads (camelCase, Spanish).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    // NOTE: stored in plain text, matching the existing user base.
    pub password: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(rename = "codigoEstudiantil")]
    pub codigo_estudiantil: String,
    /// Opaque block supplied by the client (meal-plan selection), stored as-is.
    pub services: Bson,
    #[serde(rename = "streakCount")]
    pub streak_count: i32,
    pub points: i32,
}
