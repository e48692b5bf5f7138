use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::SubmitError;

// local part, "@", then a domain containing at least one dot; no whitespace
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A membership application as posted by the join-us form. Fields the client
/// leaves out deserialize as empty strings, so absence and emptiness are
/// rejected the same way.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub skill_level: String,
    #[serde(default)]
    pub reason: String,
}

impl JoinRequest {
    /// All four fields must be non-empty and the email must look like
    /// `local@domain.tld`. The skill level stays free-form: the form offers a
    /// fixed set of options, but the server does not pin them down.
    pub fn validate(&self) -> Result<(), SubmitError> {
        if self.name.is_empty()
            || self.email.is_empty()
            || self.skill_level.is_empty()
            || self.reason.is_empty()
        {
            return Err(SubmitError::MissingFields);
        }

        if !EMAIL_REGEX.is_match(&self.email) {
            return Err(SubmitError::InvalidEmail);
        }

        Ok(())
    }
}
