use std::sync::Arc;

use serde_json::Value;

use crate::{
    entities::booking::BookingForm,
    errors::BookingError,
    limiter::fixed_window::FixedWindowLimiter,
    mailer::Mailer,
    template::booking_email::render_booking_email,
    validation::validate_booking,
};

/// Turns a raw form submission into one notification email.
pub struct BookingHandler {
    pub mailer: Arc<dyn Mailer>,
    pub limiter: FixedWindowLimiter,
    pub mail_from: String,
    pub mail_to: String,
}

impl BookingHandler {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        limiter: FixedWindowLimiter,
        mail_from: impl Into<String>,
        mail_to: impl Into<String>,
    ) -> Self {
        BookingHandler {
            mailer,
            limiter,
            mail_from: mail_from.into(),
            mail_to: mail_to.into(),
        }
    }

    /// Runs the full pipeline for one request: rate limit, parse, validate,
    /// render and send. Every early exit is a `BookingError`.
    pub async fn submit(&self, client_key: &str, body: &[u8]) -> Result<Value, BookingError> {
        self.admit(client_key)?;
        self.process(client_key, body).await
    }

    /// Counts the request against the client's quota. Runs before the body
    /// is read, so rejected and oversized requests still use quota.
    pub fn admit(&self, client_key: &str) -> Result<(), BookingError> {
        if !self.limiter.check(client_key) {
            tracing::warn!(client = %client_key, "Booking request rate limited");
            return Err(BookingError::RateLimited);
        }
        Ok(())
    }

    /// Everything after admission: parse, validate, render and send.
    pub async fn process(&self, client_key: &str, body: &[u8]) -> Result<Value, BookingError> {
        let form: BookingForm = serde_json::from_slice(body)?;

        let booking = validate_booking(&form).map_err(|e| {
            let err = BookingError::from(e);
            tracing::info!(client = %client_key, reason = %err, "Booking request rejected");
            err
        })?;

        let email = render_booking_email(&booking, &self.mail_from, &self.mail_to);

        let response = self.mailer.send_email(&email).await?;

        tracing::info!(
            client = %client_key,
            urgent = booking.urgent,
            "Booking request forwarded"
        );

        Ok(response)
    }
}
