use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::{AuthError, ConfigField};

const AUTHORIZE_PATH: &str = "/oauth/authorize";
const TOKEN_PATH: &str = "/oauth/token";

/// Unvalidated client settings.
///
/// Can be filled in with the `with_*` setters or deserialized from any serde
/// format, then turned into an [`OAuthClientConfig`] with [`build`](Self::build).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OAuthClientConfigBuilder {
    provider_url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    scopes: String,
    #[serde(skip)]
    timeout: Option<Duration>,
}

impl OAuthClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider_url(mut self, provider_url: impl Into<String>) -> Self {
        self.provider_url = Some(provider_url.into());
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn with_scopes(mut self, scopes: impl Into<String>) -> Self {
        self.scopes = scopes.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validates the settings.
    ///
    /// Fails with [`AuthError::ConfigurationIncomplete`] naming every missing
    /// required field, with [`AuthError::Url`] if the provider URL does not
    /// parse, or with [`AuthError::InvalidProviderUrl`] if it has a query or
    /// fragment. The stored provider URL is the parsed form without a
    /// trailing `/`.
    pub fn build(self) -> Result<OAuthClientConfig, AuthError> {
        let provider_url = non_empty(self.provider_url);
        let client_id = non_empty(self.client_id);

        let (provider_url, client_id) = match (provider_url, client_id) {
            (Some(provider_url), Some(client_id)) => (provider_url, client_id),
            (provider_url, client_id) => {
                let mut fields = Vec::new();
                if provider_url.is_none() {
                    fields.push(ConfigField::ProviderUrl);
                }
                if client_id.is_none() {
                    fields.push(ConfigField::ClientId);
                }
                return Err(AuthError::ConfigurationIncomplete { fields });
            }
        };

        let parsed = Url::parse(provider_url.trim())?;
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(AuthError::InvalidProviderUrl(
                "provider url must not carry a query or fragment".to_string(),
            ));
        }

        Ok(OAuthClientConfig {
            provider_url: parsed.as_str().trim_end_matches('/').to_string(),
            client_id,
            client_secret: non_empty(self.client_secret),
            redirect_uri: non_empty(self.redirect_uri),
            scopes: self.scopes,
            timeout: self.timeout,
        })
    }
}

/// Validated client configuration: provider URL and client id are always set.
#[derive(Clone)]
pub struct OAuthClientConfig {
    pub(crate) provider_url: String,
    pub(crate) client_id: String,
    pub(crate) client_secret: Option<String>,
    pub(crate) redirect_uri: Option<String>,
    pub(crate) scopes: String,
    pub(crate) timeout: Option<Duration>,
}

impl OAuthClientConfig {
    pub fn builder() -> OAuthClientConfigBuilder {
        OAuthClientConfigBuilder::new()
    }

    pub fn new(
        provider_url: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self, AuthError> {
        Self::builder()
            .with_provider_url(provider_url)
            .with_client_id(client_id)
            .build()
    }

    pub fn provider_url(&self) -> &str {
        &self.provider_url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn scopes(&self) -> &str {
        &self.scopes
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn authorize_endpoint(&self) -> String {
        format!("{}{AUTHORIZE_PATH}", self.provider_url)
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}{TOKEN_PATH}", self.provider_url)
    }
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("provider_url", &self.provider_url)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
