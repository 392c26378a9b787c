use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub const FIELD_ADMIN_CODE: &str = "adminCode";
pub const FIELD_TARGET_USER_CODE: &str = "targetUserCode";
pub const FIELD_USER_CODE: &str = "userCode";
pub const FIELD_ROOM_CODE: &str = "roomCode";
pub const FIELD_AUTH_CODE: &str = "authCode";
pub const FIELD_ROOM: &str = "room";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    InvalidInput,
    RoomNotFound,
    AdminNotFound,
    NotAuthorized,
    UserNotFound,
    AlreadyMember,
    PersistenceError,
}

impl ValidationErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::RoomNotFound => "room_not_found",
            Self::AdminNotFound => "admin_not_found",
            Self::NotAuthorized => "not_authorized",
            Self::UserNotFound => "user_not_found",
            Self::AlreadyMember => "already_member",
            Self::PersistenceError => "persistence_error",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::RoomNotFound => "Room not found",
            Self::AdminNotFound => "Admin not found",
            Self::NotAuthorized => "Not authorized",
            Self::UserNotFound => "User not found",
            Self::AlreadyMember => "Already a member",
            Self::PersistenceError => "Persistence error",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RoomNotFound | Self::AdminNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::NotAuthorized => StatusCode::FORBIDDEN,
            Self::AlreadyMember => StatusCode::CONFLICT,
            Self::PersistenceError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A failure attributed to one input field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        kind: ValidationErrorKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn room_not_found(field: &str) -> Self {
        Self::new(ValidationErrorKind::RoomNotFound, field, "Room not found")
    }

    pub fn persistence(err: &anyhow::Error) -> Self {
        Self::new(
            ValidationErrorKind::PersistenceError,
            FIELD_ROOM,
            err.to_string(),
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<ValidationError>),
    #[error("Malformed request: {0}")]
    Malformed(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(vec![err])
    }
}

/// JSON:API error document
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<JsonApiError>,
}

#[derive(Serialize, ToSchema)]
pub struct JsonApiError {
    pub status: String,
    pub code: String,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<JsonApiErrorSource>,
}

#[derive(Serialize, ToSchema)]
pub struct JsonApiErrorSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl From<&ValidationError> for JsonApiError {
    fn from(err: &ValidationError) -> Self {
        // Body input is addressed by pointer, everything else by parameter name.
        let source = if err.kind == ValidationErrorKind::InvalidInput {
            JsonApiErrorSource {
                pointer: Some(format!("/{}", err.field)),
                parameter: None,
            }
        } else {
            JsonApiErrorSource {
                pointer: None,
                parameter: Some(err.field.clone()),
            }
        };

        Self {
            status: err.kind.status().as_u16().to_string(),
            code: err.kind.code().to_string(),
            title: err.kind.title().to_string(),
            detail: err.message.clone(),
            source: Some(source),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            AppError::Validation(errors) => {
                let status = errors
                    .first()
                    .map(|e| e.kind.status())
                    .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY);
                if status.is_server_error() {
                    tracing::error!("Request failed: {:?}", errors);
                }
                (status, errors.iter().map(JsonApiError::from).collect())
            }
            AppError::Malformed(msg) => (
                StatusCode::BAD_REQUEST,
                vec![JsonApiError {
                    status: StatusCode::BAD_REQUEST.as_u16().to_string(),
                    code: "malformed_request".to_string(),
                    title: "Malformed request".to_string(),
                    detail: msg,
                    source: None,
                }],
            ),
        };

        (status, Json(ErrorResponse { errors })).into_response()
    }
}
