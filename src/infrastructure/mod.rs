pub mod limiter;
pub mod mailer;
pub mod template;
pub mod utils;
