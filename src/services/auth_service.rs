use crate::{
    database::{is_duplicate_key, MongoDb},
    models::User,
    utils::{error::AppError, required},
};
use mongodb::bson::{doc, Bson};
use serde::{Deserialize, Serialize};

const EMAIL_TAKEN: &str = "El email ya está registrado.";

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    #[serde(rename = "codigoEstudiantil")]
    pub codigo_estudiantil: Option<String>,
    /// Meal-plan selection from the mobile client, kept opaque.
    #[schema(value_type = Option<Object>)]
    pub services: Option<Bson>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserInfo,
}

/// Profile returned on login: the stored document minus the password, with
/// the identifier flattened to a hex string.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(rename = "codigoEstudiantil")]
    pub codigo_estudiantil: String,
    #[schema(value_type = Object)]
    pub services: Bson,
    #[serde(rename = "streakCount")]
    pub streak_count: i32,
    pub points: i32,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        UserInfo {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email,
            nombre: user.nombre,
            apellido: user.apellido,
            codigo_estudiantil: user.codigo_estudiantil,
            services: user.services,
            streak_count: user.streak_count,
            points: user.points,
        }
    }
}

impl RegisterRequest {
    /// Validates field presence and builds the document to insert, with the
    /// gamification counters zeroed.
    fn to_user(&self) -> Result<User, AppError> {
        const MISSING: &str = "Todos los campos son requeridos.";

        let services = match &self.services {
            Some(value) if !is_falsy(value) => value.clone(),
            _ => return Err(AppError::BadRequest(MISSING.to_string())),
        };

        Ok(User {
            id: None,
            email: required(&self.email, MISSING)?.to_string(),
            password: required(&self.password, MISSING)?.to_string(),
            nombre: required(&self.nombre, MISSING)?.to_string(),
            apellido: required(&self.apellido, MISSING)?.to_string(),
            codigo_estudiantil: required(&self.codigo_estudiantil, MISSING)?.to_string(),
            services,
            streak_count: 0,
            points: 0,
        })
    }
}

/// The mobile client's contract treats JS-falsy values as missing, so an
/// empty string, zero, or `false` does not count as a `services` block.
fn is_falsy(value: &Bson) -> bool {
    match value {
        Bson::Null => true,
        Bson::String(s) => s.is_empty(),
        Bson::Boolean(b) => !b,
        Bson::Int32(n) => *n == 0,
        Bson::Int64(n) => *n == 0,
        Bson::Double(n) => *n == 0.0,
        _ => false,
    }
}

// ==================== SERVICE FUNCTIONS ====================

pub async fn register(db: &MongoDb, request: &RegisterRequest) -> Result<RegisterResponse, AppError> {
    const INTERNAL: &str = "Error interno del servidor al registrar usuario.";

    let new_user = request.to_user()?;
    let collection = db.collection::<User>("users");

    let existing = collection
        .find_one(doc! { "email": &new_user.email })
        .await
        .map_err(|e| {
            log::error!("❌ Database error checking email: {}", e);
            AppError::Internal(INTERNAL.to_string())
        })?;

    if existing.is_some() {
        return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let result = collection.insert_one(&new_user).await.map_err(|e| {
        if is_duplicate_key(&e) {
            // the unique email index caught a concurrent registration
            AppError::Conflict(EMAIL_TAKEN.to_string())
        } else {
            log::error!("❌ Failed to insert user: {}", e);
            AppError::Internal(INTERNAL.to_string())
        }
    })?;

    let user_id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_else(|| result.inserted_id.to_string());

    Ok(RegisterResponse {
        message: "Usuario registrado con éxito!".to_string(),
        user_id,
    })
}

pub async fn login(db: &MongoDb, request: &LoginRequest) -> Result<LoginResponse, AppError> {
    const MISSING: &str = "Email y contraseña son requeridos.";

    let email = required(&request.email, MISSING)?;
    let password = required(&request.password, MISSING)?;

    let collection = db.collection::<User>("users");

    // NOTE: exact plain-text match against the stored password.
    let user = collection
        .find_one(doc! { "email": email, "password": password })
        .await
        .map_err(|e| {
            log::error!("❌ Database error on login: {}", e);
            AppError::Internal("Error interno del servidor al iniciar sesión.".to_string())
        })?
        .ok_or_else(|| AppError::Unauthorized("Credenciales incorrectas.".to_string()))?;

    Ok(LoginResponse {
        message: "Inicio de sesión exitoso!".to_string(),
        user: UserInfo::from(user),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn full_request() -> RegisterRequest {
        RegisterRequest {
            email: Some("ana@uis.edu.co".to_string()),
            password: Some("secret".to_string()),
            nombre: Some("Ana".to_string()),
            apellido: Some("Rojas".to_string()),
            codigo_estudiantil: Some("2190015".to_string()),
            services: Some(Bson::Document(doc! { "plan": "completo" })),
        }
    }

    #[test]
    fn test_register_request_builds_zeroed_user() {
        let user = full_request().to_user().unwrap();
        assert_eq!(user.streak_count, 0);
        assert_eq!(user.points, 0);
        assert!(user.id.is_none());
        assert_eq!(user.email, "ana@uis.edu.co");
    }

    #[test]
    fn test_register_request_rejects_missing_field() {
        let mut request = full_request();
        request.apellido = None;
        let err = request.to_user().unwrap_err();
        assert_eq!(err.to_string(), "Todos los campos son requeridos.");
    }

    #[test]
    fn test_register_request_rejects_null_services() {
        let mut request = full_request();
        request.services = Some(Bson::Null);
        assert!(request.to_user().is_err());

        request.services = None;
        assert!(request.to_user().is_err());
    }

    #[test]
    fn test_register_request_rejects_falsy_services() {
        for falsy in [
            Bson::String(String::new()),
            Bson::Boolean(false),
            Bson::Int32(0),
            Bson::Int64(0),
            Bson::Double(0.0),
        ] {
            let mut request = full_request();
            request.services = Some(falsy);
            assert!(request.to_user().is_err());
        }

        // non-empty values of the same types pass
        let mut request = full_request();
        request.services = Some(Bson::String("almuerzo".to_string()));
        assert!(request.to_user().is_ok());
    }

    #[test]
    fn test_user_info_strips_password_and_adds_id() {
        let oid = ObjectId::new();
        let user = User {
            id: Some(oid),
            email: "ana@uis.edu.co".to_string(),
            password: "secret".to_string(),
            nombre: "Ana".to_string(),
            apellido: "Rojas".to_string(),
            codigo_estudiantil: "2190015".to_string(),
            services: Bson::String("almuerzo".to_string()),
            streak_count: 2,
            points: 40,
        };

        let info = UserInfo::from(user);
        assert_eq!(info.id, oid.to_hex());

        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["id"], oid.to_hex());
        assert_eq!(json["streakCount"], 2);
    }
}
