use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const DEFAULT_RATE_LIMIT_MAX: u32 = 5;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;
pub const UNKNOWN_CLIENT_KEY: &str = "unknown";

pub const MAX_NAME_CHARS: u64 = 100;
pub const MAX_PHONE_CHARS: u64 = 30;
pub const MAX_SERVICE_CHARS: u64 = 100;
pub const MAX_EMAIL_CHARS: u64 = 255;
pub const MAX_MESSAGE_CHARS: u64 = 2000;
pub const MAX_DATE_CHARS: u64 = 50;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send booking request. Please try again later.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

pub const URGENT_MARKER: &str = "🚨 СРОЧНО: ";
pub const SUBJECT_PREFIX: &str = "Новая заявка от ";
