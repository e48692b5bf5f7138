use crate::error::SubmitError;

pub const DEFAULT_RELAY_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_RELAY_PORT: u16 = 587;
pub const DEFAULT_ADMIN_EMAIL: &str = "your-admin-email@example.com";
pub const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 30;

/// Mail relay settings, read from the environment on every request. Nothing
/// here is cached across calls.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS from the first byte. Off means STARTTLS on the
    /// submission port.
    pub secure: bool,
    pub username: String,
    pub password: String,
    pub admin_email: String,
    /// Explicit opt-in for relays with self-signed certificates.
    pub accept_invalid_certs: bool,
    pub timeout_secs: u64,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, SubmitError> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Credentials are the only required entries; everything else falls back
    /// to a default, including unparseable numeric values.
    pub fn from_source(source: impl Fn(&str) -> Option<String>) -> Result<Self, SubmitError> {
        let username = source("SMTP_USER").filter(|v| !v.is_empty());
        let password = source("SMTP_PASSWORD").filter(|v| !v.is_empty());
        let (Some(username), Some(password)) = (username, password) else {
            return Err(SubmitError::Configuration);
        };

        Ok(RelayConfig {
            host: source("SMTP_HOST").unwrap_or_else(|| DEFAULT_RELAY_HOST.to_string()),
            port: source("SMTP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RELAY_PORT),
            secure: source("SMTP_SECURE").is_some_and(|v| v == "true"),
            username,
            password,
            admin_email: source("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
            accept_invalid_certs: source("SMTP_ACCEPT_INVALID_CERTS").is_some_and(|v| v == "true"),
            timeout_secs: source("SMTP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RELAY_TIMEOUT_SECS),
        })
    }
}
