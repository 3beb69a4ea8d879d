use actix_web::{web, HttpResponse};
use humantime::format_duration;
use chrono::Utc;
use std::time::Duration;
use serde::Serialize;

use crate::{constants::START_TIME, AppState};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: &'static str,
    version: &'static str,
    uptime: String,
    start_at: String,
    timestamp: String,
    rate_limited_clients: usize,
    email_configured: bool,
}

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let now_utc = Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime: human_uptime.to_string(),
        start_at: START_TIME.to_rfc3339(),
        timestamp: now_utc.to_rfc3339(),
        rate_limited_clients: state.booking_handler.limiter.len(),
        email_configured: state.email_configured,
    })
}
