use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod telemetry;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases, validation};
pub use interfaces::{handlers, routes};
pub use infrastructure::{limiter, mailer, template, utils};

use errors::MailerError;
use limiter::fixed_window::FixedWindowLimiter;
use mailer::{resend::ResendMailer, Mailer};
use use_cases::booking::BookingHandler;

pub struct AppState {
    pub booking_handler: BookingHandler,
    pub email_configured: bool,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(config: &settings::AppConfig) -> Result<Self, MailerError> {
        let mailer = ResendMailer::from_config(config)?;
        Ok(Self::with_mailer(config, Arc::new(mailer)))
    }

    /// Builds the state around any `Mailer`, e.g. a test double.
    pub fn with_mailer(config: &settings::AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let limiter = FixedWindowLimiter::new(config.rate_limit_max, config.rate_limit_window());
        let booking_handler = BookingHandler::new(
            mailer,
            limiter,
            config.mail_from.as_str(),
            config.mail_to.as_str(),
        );

        AppState {
            booking_handler,
            email_configured: config.has_api_key(),
            max_body_bytes: config.max_body_bytes,
        }
    }
}
