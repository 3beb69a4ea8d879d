use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};
use url::Url;
use zeroize::Zeroizing;

use crate::constants::{DEFAULT_MAX_BODY_BYTES, DEFAULT_RATE_LIMIT_MAX, DEFAULT_RATE_LIMIT_WINDOW_SECS};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origin")]
    pub cors_allowed_origin: String,

    /// Left empty when unset; sends then fail instead of the process refusing to start.
    #[serde(default = "default_api_key")]
    pub resend_api_key: Zeroizing<String>,

    #[serde(default = "default_email_api_url")]
    pub email_api_url: String,

    #[serde(default = "default_mail_from")]
    pub mail_from: String,

    #[serde(default = "default_mail_to")]
    pub mail_to: String,

    #[serde(default = "default_email_timeout")]
    pub email_timeout_secs: u64,

    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max: u32,

    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_secs: u64,

    #[serde(default = "default_purge_interval")]
    pub rate_limit_purge_secs: u64,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Booking-Mailer".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origin() -> String {
    "*".to_string()
}
fn default_api_key() -> Zeroizing<String> {
    Zeroizing::new(String::new())
}
fn default_email_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}
fn default_mail_from() -> String {
    "Booking Form <onboarding@resend.dev>".to_string()
}
fn default_mail_to() -> String {
    "bookings@example.com".to_string()
}
fn default_email_timeout() -> u64 {
    10
}
fn default_rate_limit_max() -> u32 {
    DEFAULT_RATE_LIMIT_MAX
}
fn default_rate_limit_window() -> u64 {
    DEFAULT_RATE_LIMIT_WINDOW_SECS
}
fn default_purge_interval() -> u64 {
    300
}
fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            cors_allowed_origin: default_cors_origin(),
            resend_api_key: default_api_key(),
            email_api_url: default_email_api_url(),
            mail_from: default_mail_from(),
            mail_to: default_mail_to(),
            email_timeout_secs: default_email_timeout(),
            rate_limit_max: default_rate_limit_max(),
            rate_limit_window_secs: default_rate_limit_window(),
            rate_limit_purge_secs: default_purge_interval(),
            max_body_bytes: default_max_body_bytes(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Hosting platforms usually expose the provider key under its own name
        if config.resend_api_key.trim().is_empty() {
            if let Ok(key) = env::var("RESEND_API_KEY") {
                config.resend_api_key = Zeroizing::new(key);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if Url::parse(&self.email_api_url).is_err() {
            errors.push("EMAIL_API_URL must be an absolute URL");
        }
        if !self.mail_from.contains('@') {
            errors.push("MAIL_FROM must contain an email address");
        }
        if !self.mail_to.contains('@') {
            errors.push("MAIL_TO must contain an email address");
        }
        if self.rate_limit_max == 0 {
            errors.push("RATE_LIMIT_MAX must be greater than zero");
        }
        if self.rate_limit_window_secs == 0 {
            errors.push("RATE_LIMIT_WINDOW_SECS must be greater than zero");
        }
        if self.email_timeout_secs == 0 {
            errors.push("EMAIL_TIMEOUT_SECS must be greater than zero");
        }
        if self.max_body_bytes == 0 {
            errors.push("MAX_BODY_BYTES must be greater than zero");
        }
        if self.worker_count == 0 {
            errors.push("WORKER_COUNT must be greater than zero");
        }
        if self.cors_allowed_origin.trim().is_empty() {
            errors.push("CORS_ALLOWED_ORIGIN cannot be empty");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn has_api_key(&self) -> bool {
        !self.resend_api_key.trim().is_empty()
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn email_timeout(&self) -> Duration {
        Duration::from_secs(self.email_timeout_secs)
    }

    /// `None` disables the purge task.
    pub fn rate_limit_purge_interval(&self) -> Option<Duration> {
        (self.rate_limit_purge_secs > 0).then(|| Duration::from_secs(self.rate_limit_purge_secs))
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.trim().is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .field("resend_api_key", &self.resend_api_key.as_str().redact())
            .field("email_api_url", &self.email_api_url)
            .field("mail_from", &self.mail_from)
            .field("mail_to", &self.mail_to)
            .field("email_timeout_secs", &self.email_timeout_secs)
            .field("rate_limit_max", &self.rate_limit_max)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("rate_limit_purge_secs", &self.rate_limit_purge_secs)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("log_format", &self.log_format)
            .finish()
    }
}
