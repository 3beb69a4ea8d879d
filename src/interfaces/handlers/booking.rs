use actix_web::{http::Method, web, HttpRequest, HttpResponse};

use crate::{errors::BookingError, utils::client_key::get_client_key, AppState};

/// Cross-origin pre-flight probe. Always succeeds with an empty body.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Reads at most `limit` bytes. Anything longer is a failed request, not a 413.
async fn read_body(payload: web::Payload, limit: usize) -> Result<web::Bytes, BookingError> {
    match payload.to_bytes_limited(limit).await {
        Ok(Ok(body)) => Ok(body),
        Ok(Err(_)) => Err(BookingError::Delivery(format!(
            "Request body exceeds {} bytes",
            limit
        ))),
        Err(e) => Err(BookingError::Delivery(format!("Failed to read request body: {}", e))),
    }
}

pub async fn submit_booking(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Payload,
) -> HttpResponse {
    let client_key = get_client_key(&req);
    let handler = &state.booking_handler;

    let result = match handler.admit(&client_key) {
        Ok(()) => match read_body(payload, state.max_body_bytes).await {
            Ok(body) => handler.process(&client_key, &body).await,
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(data) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "data": data
        })),
        Err(e) => {
            if let BookingError::Delivery(detail) = &e {
                tracing::error!(client = %client_key, error = %detail, "Failed to send booking request");
            }
            e.to_http_response()
        }
    }
}

/// Every path accepts the booking form, so method dispatch happens here.
pub async fn booking_endpoint(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Payload,
) -> HttpResponse {
    let method = req.method().clone();

    if method == Method::OPTIONS {
        preflight().await
    } else if method == Method::POST {
        submit_booking(req, state, payload).await
    } else {
        BookingError::MethodNotAllowed(method.to_string()).to_http_response()
    }
}
