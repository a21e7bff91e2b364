use reqwest::Client;
use url::form_urlencoded;

use crate::{
    AuthError, AuthorizationRequest, AuthorizationResponse, ConfigField, HttpTransport,
    OAuthClientConfig, STATE_SESSION_KEY, SessionStore, TokenResponse, generate_state,
};

/// Client for the authorization code grant against a single provider.
#[derive(Debug, Clone)]
pub struct AuthorizationCodeClient<T = Client> {
    config: OAuthClientConfig,
    transport: T,
}

impl AuthorizationCodeClient {
    /// Creates a client backed by a fresh `reqwest::Client`, applying the
    /// configured timeout.
    pub fn new(config: OAuthClientConfig) -> Result<Self, AuthError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let transport = builder.build()?;
        Ok(Self { config, transport })
    }
}

impl<T: HttpTransport> AuthorizationCodeClient<T> {
    pub fn with_transport(config: OAuthClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &OAuthClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the provider's authorize URL with a fresh state token.
    ///
    /// The state is written to `session` under [`STATE_SESSION_KEY`] so the
    /// callback can be checked by [`exchange_code`](Self::exchange_code).
    pub fn authorization_url<S>(&self, session: &mut S) -> Result<AuthorizationRequest, AuthError>
    where
        S: SessionStore + ?Sized,
    {
        let state = generate_state()?;
        session.put(STATE_SESSION_KEY, state.clone());

        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("client_id", &self.config.client_id);
        if let Some(redirect_uri) = &self.config.redirect_uri {
            query.append_pair("redirect_uri", redirect_uri);
        }
        query.append_pair("response_type", "code");
        query.append_pair("scope", &self.config.scopes);
        query.append_pair("state", &state);

        let authorization_url = format!("{}?{}", self.config.authorize_endpoint(), query.finish());
        tracing::debug!(
            provider_url = %self.config.provider_url,
            client_id = %self.config.client_id,
            "built authorization url"
        );

        Ok(AuthorizationRequest {
            authorization_url,
            state,
        })
    }

    /// Exchanges an authorization code for a token.
    ///
    /// The stored state is pulled from `session` before anything else, so it
    /// is consumed whether or not the exchange succeeds. A missing or
    /// different state fails with [`AuthError::StateMismatch`] without any
    /// request being sent.
    pub async fn exchange_code<S>(
        &self,
        code: &str,
        presented_state: Option<&str>,
        session: &mut S,
    ) -> Result<TokenResponse, AuthError>
    where
        S: SessionStore + ?Sized,
    {
        let expected = session
            .pull(STATE_SESSION_KEY)
            .filter(|state| !state.is_empty());
        if expected.is_none() || expected.as_deref() != presented_state {
            return Err(AuthError::StateMismatch {
                expected,
                received: presented_state.map(str::to_string),
            });
        }

        let client_secret =
            self.config
                .client_secret
                .as_deref()
                .ok_or_else(|| AuthError::ConfigurationIncomplete {
                    fields: vec![ConfigField::ClientSecret],
                })?;

        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", client_secret),
        ];
        if let Some(redirect_uri) = self.config.redirect_uri.as_deref() {
            form.push(("redirect_uri", redirect_uri));
        }
        form.push(("code", code));

        let token_url = self.config.token_endpoint();
        tracing::debug!(token_url = %token_url, "sending token request");
        let response = self.transport.post_form(&token_url, &form).await?;
        tracing::debug!(status = response.status, "received token response");

        serde_json::from_slice(&response.body).map_err(|err| AuthError::MalformedResponse {
            message: err.to_string(),
            body: String::from_utf8_lossy(&response.body).into_owned(),
        })
    }

    /// Exchanges the code from a parsed redirect callback.
    pub async fn exchange_callback<S>(
        &self,
        response: &AuthorizationResponse,
        session: &mut S,
    ) -> Result<TokenResponse, AuthError>
    where
        S: SessionStore + ?Sized,
    {
        self.exchange_code(&response.code, response.state.as_deref(), session)
            .await
    }
}
