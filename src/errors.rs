use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use validator::ValidationError;

use crate::constants::{DELIVERY_FAILED_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE, RATE_LIMITED_MESSAGE};

/// Terminal outcome of a booking request that did not end in a sent email.
#[derive(Debug, Display, PartialEq)]
pub enum BookingError {
    #[display("{_0}")]
    Validation(String),

    #[display("Rate limit exceeded")]
    RateLimited,

    #[display("Delivery failed: {_0}")]
    Delivery(String),

    #[display("Method not allowed: {_0}")]
    MethodNotAllowed(String),
}

impl BookingError {
    /// Message that is safe to show to the caller. Delivery details stay server-side.
    pub fn public_message(&self) -> &str {
        match self {
            BookingError::Validation(msg) => msg,
            BookingError::RateLimited => RATE_LIMITED_MESSAGE,
            BookingError::Delivery(_) => DELIVERY_FAILED_MESSAGE,
            BookingError::MethodNotAllowed(_) => METHOD_NOT_ALLOWED_MESSAGE,
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl ResponseError for BookingError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(serde_json::json!({"error": self.public_message()}))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            BookingError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        let message = err
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid value".to_string());
        BookingError::Validation(message)
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Delivery(format!("Malformed request body: {}", err))
    }
}

impl From<MailerError> for BookingError {
    fn from(err: MailerError) -> Self {
        BookingError::Delivery(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum MailerError {
    #[display("Email API key is not configured")]
    MissingApiKey,

    #[display("Email transport error: {_0}")]
    Transport(String),

    #[display("Email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[display("Email provider returned an unreadable response: {_0}")]
    InvalidResponse(String),
}

impl std::error::Error for MailerError {}

impl From<reqwest::Error> for MailerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MailerError::InvalidResponse(err.to_string())
        } else {
            MailerError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn delivery_error_hides_internal_detail() {
        let err = BookingError::Delivery("connection refused to 10.0.0.3:443".into());
        let response = err.to_http_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let text = std::str::from_utf8(&body).unwrap();
        assert!(!text.contains("10.0.0.3"));
        assert!(text.contains(DELIVERY_FAILED_MESSAGE));
    }

    #[test]
    fn validation_message_is_exposed() {
        let err = BookingError::Validation("Name is required".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Name is required");
    }

    #[test]
    fn mailer_errors_become_delivery_failures() {
        let err: BookingError = MailerError::MissingApiKey.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, BookingError::Delivery(_)));
    }
}
