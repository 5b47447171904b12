use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use thiserror::Error;

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Parse Error: {0}")]
    ParseError(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Unauthorized Access: {0}")]
    Unauthorized(String),

    #[error("Payment Gateway Error")]
    GatewayError,

    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rsvp::error::Error> for RestError {
    fn from(e: rsvp::error::Error) -> Self {
        use rsvp::error::Error as E;
        match e {
            E::ParsingError(msg) => Self::ParseError(msg),
            E::DuplicateEmail => Self::Duplicate("duplicate".into()),
            E::UnknownEmail => Self::NotFound("No response stored for this email".into()),
            E::SendEmailError(e) => {
                tracing::error!("Failed to send email: {}", e);
                Self::InternalError("Failed to send email".into())
            }
            E::PaymentError(e) => {
                // Processor detail stays in the logs, never on the wire
                tracing::error!("Payment gateway failure: {}", e);
                Self::GatewayError
            }
            E::ExportError(e) => {
                tracing::error!("Failed to serialize export: {}", e);
                Self::InternalError("Export serialization".into())
            }
            E::DatabaseError(e) => {
                tracing::error!("Database error: {}", e);
                Self::InternalError("Database error".into())
            }
        }
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ParseError(_) => StatusCode::BAD_REQUEST,
            Self::Duplicate(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::GatewayError | Self::InternalError(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::ParseError(msg) | Self::Duplicate(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Unauthorized(msg) => msg.clone(),
            Self::GatewayError => "Payment could not be initiated".into(),
            Self::InternalError(_) | Self::Other(_) => "Internal server error".into(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}
