use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};

/// Reservation document stored in the `reservas` collection. At most one
/// document exists per `(userId, tipo)` pair; saving replaces the whole
/// document rather than merging fields.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Reservation {
    /// Serialized as a plain hex string so clients see `"_id": "<hex>"`
    /// rather than the extended-JSON `{"$oid": ...}` form. Saved documents
    /// carry `id: None`, so the store still assigns the `_id` itself.
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_as_hex"
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Meal sitting this reservation belongs to ("desayuno", "almuerzo", ...).
    pub tipo: String,
    pub fecha: String,
    pub hora: String,
}

fn serialize_object_id_as_hex<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(id) => serializer.serialize_str(&id.to_hex()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_wire_field_names() {
        let reservation = Reservation {
            id: None,
            user_id: "665f1a2b3c4d5e6f77889900".to_string(),
            tipo: "almuerzo".to_string(),
            fecha: "2024-01-01".to_string(),
            hora: "12:00".to_string(),
        };

        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(json["userId"], "665f1a2b3c4d5e6f77889900");
        assert_eq!(json["tipo"], "almuerzo");
        assert_eq!(json["fecha"], "2024-01-01");
        assert_eq!(json["hora"], "12:00");
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn test_stored_id_serializes_as_hex_string() {
        let oid = ObjectId::new();
        let document = mongodb::bson::doc! {
            "_id": oid,
            "userId": "u1",
            "tipo": "almuerzo",
            "fecha": "2024-01-01",
            "hora": "12:00",
        };

        let reservation: Reservation = mongodb::bson::from_document(document).unwrap();
        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(json["_id"], serde_json::Value::String(oid.to_hex()));
    }
}
