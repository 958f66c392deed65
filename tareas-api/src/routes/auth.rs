/// Registration and login endpoints
///
/// - `POST /registro` - Register a new user
/// - `POST /login` - Check a user's credentials
///
/// Both take the same JSON body:
///
/// ```json
/// { "usuario": "daniela", "contraseña": "1234" }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tareas_shared::{auth::credentials, models::user::UserId};
use tracing::debug;
use validator::{Validate, ValidationErrors};

const MISSING_FIELDS: &str = "Faltan datos: usuario y contraseña son requeridos";

/// Order in which field violations are reported; the first one wins.
/// Errors may be keyed by the Rust field name or by its serde rename
/// depending on the validator release, so both are listed.
const FIELD_ORDER: [[&str; 2]; 2] = [["name", "usuario"], ["password", "contraseña"]];

/// Credentials request body, shared by registration and login
///
/// Both fields are optional at the type level so a missing field produces
/// the dedicated missing-data 400 message rather than a generic
/// deserialization error.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// User name
    #[serde(rename = "usuario")]
    #[validate(length(min = 3, message = "El nombre de usuario debe tener al menos 3 caracteres"))]
    pub name: Option<String>,

    /// Plaintext password
    #[serde(rename = "contraseña")]
    #[validate(length(min = 4, message = "La contraseña debe tener al menos 4 caracteres"))]
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Returns both fields, or the missing-data error if either is absent
    fn fields(&self) -> ApiResult<(&str, &str)> {
        match (self.name.as_deref(), self.password.as_deref()) {
            (Some(name), Some(password)) => Ok((name, password)),
            _ => Err(ApiError::BadRequest(MISSING_FIELDS.to_string())),
        }
    }
}

/// Register response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(rename = "mensaje")]
    pub message: String,

    #[serde(rename = "usuario")]
    pub username: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "mensaje")]
    pub message: String,

    #[serde(rename = "usuario")]
    pub username: String,

    pub user_id: UserId,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /registro
/// Content-Type: application/json
///
/// { "usuario": "daniela", "contraseña": "1234" }
/// ```
///
/// # Response (201)
///
/// ```json
/// { "mensaje": "Usuario registrado exitosamente", "usuario": "daniela" }
/// ```
///
/// # Errors
///
/// Checked in this order, the first failure wins:
///
/// - `400 Bad Request`: malformed body or missing field
/// - `400 Bad Request`: name shorter than 3 characters
/// - `400 Bad Request`: password shorter than 4 characters
/// - `409 Conflict`: name already registered
/// - `500 Internal Server Error`: anything else
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let req = parse_body(payload)?;
    let (name, password) = req.fields()?;

    req.validate()
        .map_err(|e| ApiError::BadRequest(first_violation(&e)))?;

    credentials::register(&state.db, name, password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Usuario registrado exitosamente".to_string(),
            username: name.to_string(),
        }),
    ))
}

/// Check a user's credentials
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "usuario": "daniela", "contraseña": "1234" }
/// ```
///
/// # Response (200)
///
/// ```json
/// { "mensaje": "Inicio de sesión exitoso", "usuario": "daniela", "user_id": 1 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: malformed body or missing field
/// - `401 Unauthorized`: unknown user or wrong password
/// - `500 Internal Server Error`: anything else
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let req = parse_body(payload)?;
    let (name, password) = req.fields()?;

    let user = credentials::authenticate(&state.db, name, password).await?;

    Ok(Json(LoginResponse {
        message: "Inicio de sesión exitoso".to_string(),
        username: user.name,
        user_id: user.id,
    }))
}

/// Extracts the credentials from a request body
///
/// Only a JSON object is accepted. Serde would otherwise read a
/// two-element array positionally into the struct.
fn parse_body(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<CredentialsRequest> {
    let value = match payload {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Rejected request body");
            return Err(ApiError::BadRequest(format!(
                "Cuerpo de la petición inválido: {}",
                rejection.body_text()
            )));
        }
    };

    let Value::Object(fields) = value else {
        debug!("Request body is not a JSON object");
        return Err(ApiError::BadRequest(MISSING_FIELDS.to_string()));
    };

    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        debug!(reason = %e, "Invalid credential fields");
        ApiError::BadRequest(format!("Cuerpo de la petición inválido: {}", e))
    })
}

fn first_violation(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    FIELD_ORDER
        .iter()
        .filter_map(|keys| keys.iter().find_map(|key| field_errors.get(*key)))
        .flat_map(|list| list.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Datos inválidos".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, password: Option<&str>) -> CredentialsRequest {
        CredentialsRequest {
            name: name.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_body_uses_spanish_field_names() {
        let req: CredentialsRequest =
            serde_json::from_str(r#"{"usuario": "daniela", "contraseña": "1234"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("daniela"));
        assert_eq!(req.password.as_deref(), Some("1234"));
    }

    #[test]
    fn test_missing_field_detected() {
        assert!(request(Some("daniela"), None).fields().is_err());
        assert!(request(None, Some("1234")).fields().is_err());
        assert!(request(Some("daniela"), Some("1234")).fields().is_ok());
    }

    #[test]
    fn test_short_name_reported_before_short_password() {
        let errors = request(Some("ab"), Some("1")).validate().unwrap_err();
        assert_eq!(
            first_violation(&errors),
            "El nombre de usuario debe tener al menos 3 caracteres"
        );
    }

    #[test]
    fn test_short_password() {
        let errors = request(Some("daniela"), Some("123")).validate().unwrap_err();
        assert_eq!(
            first_violation(&errors),
            "La contraseña debe tener al menos 4 caracteres"
        );
    }

    #[test]
    fn test_lengths_count_characters() {
        // Three characters, six bytes
        assert!(request(Some("ñáé"), Some("1234")).validate().is_ok());
        // Four characters
        assert!(request(Some("daniela"), Some("ñañá")).validate().is_ok());
    }

    #[test]
    fn test_minimum_lengths_accepted() {
        assert!(request(Some("ana"), Some("1234")).validate().is_ok());
    }

    #[test]
    fn test_login_response_shape() {
        let json = serde_json::to_value(LoginResponse {
            message: "Inicio de sesión exitoso".to_string(),
            username: "daniela".to_string(),
            user_id: UserId(1),
        })
        .unwrap();

        assert_eq!(json["mensaje"], "Inicio de sesión exitoso");
        assert_eq!(json["usuario"], "daniela");
        assert_eq!(json["user_id"], 1);
    }

    #[test]
    fn test_array_body_rejected() {
        let body = serde_json::json!(["daniela", "1234"]);
        match parse_body(Ok(Json(body))) {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, MISSING_FIELDS),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_object_body_accepted() {
        let body = serde_json::json!({ "usuario": "daniela", "contraseña": "1234" });
        let req = parse_body(Ok(Json(body))).unwrap();
        assert_eq!(req.fields().unwrap(), ("daniela", "1234"));
    }

    #[test]
    fn test_non_string_field_rejected() {
        let body = serde_json::json!({ "usuario": 5, "contraseña": "1234" });
        assert!(matches!(
            parse_body(Ok(Json(body))),
            Err(ApiError::BadRequest(_))
        ));
    }
}
