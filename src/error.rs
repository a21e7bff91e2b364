use std::fmt;

use thiserror::Error;

/// Configuration fields that an operation may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    ProviderUrl,
    ClientId,
    ClientSecret,
}

impl ConfigField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProviderUrl => "provider_url",
            Self::ClientId => "client_id",
            Self::ClientSecret => "client_secret",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("configuration incomplete, missing: {}", join_fields(.fields))]
    ConfigurationIncomplete { fields: Vec<ConfigField> },

    #[error("state mismatch (expected={expected:?}, received={received:?})")]
    StateMismatch {
        expected: Option<String>,
        received: Option<String>,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("malformed token response: {message}")]
    MalformedResponse { message: String, body: String },

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid provider url: {0}")]
    InvalidProviderUrl(String),

    #[error("missing authorization code in callback url")]
    MissingAuthorizationCode,

    #[error("os rng error: {message}")]
    OsRng { message: String },
}

impl AuthError {
    /// Fields reported missing by a `ConfigurationIncomplete` error.
    pub fn missing_fields(&self) -> &[ConfigField] {
        match self {
            Self::ConfigurationIncomplete { fields } => fields,
            _ => &[],
        }
    }
}

fn join_fields(fields: &[ConfigField]) -> String {
    fields
        .iter()
        .map(ConfigField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
