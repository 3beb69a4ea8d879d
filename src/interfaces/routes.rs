use actix_web::{middleware::DefaultHeaders, web};

use crate::handlers::{booking::booking_endpoint, system::health_check};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Only GET is health; every other method on this path is still the booking endpoint
    cfg.service(
        web::resource("/health")
            .route(web::get().to(health_check))
            .default_service(web::to(booking_endpoint)),
    );
    cfg.service(web::resource("/{tail:.*}").to(booking_endpoint));
}

/// Permissive cross-origin headers attached to every response, errors included.
pub fn cors_headers(allowed_origin: &str) -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", allowed_origin.to_string()))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}
