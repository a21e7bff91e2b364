use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::AuthError;

/// An authorization redirect together with the state stored for it.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub authorization_url: String,
    pub state: String,
}

/// Parameters the provider sends back on the redirect callback.
#[derive(Debug, Clone)]
pub struct AuthorizationResponse {
    pub code: String,
    pub state: Option<String>,
}

impl AuthorizationResponse {
    pub fn from_url(callback_url: &str) -> Result<Self, AuthError> {
        let url = Url::parse(callback_url)?;
        let mut code = None;
        let mut state = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                _ => {}
            }
        }

        let code = code
            .filter(|code| !code.is_empty())
            .ok_or(AuthError::MissingAuthorizationCode)?;
        Ok(Self { code, state })
    }
}

/// JSON object returned by the token endpoint.
///
/// The shape is not validated; the accessors only look up the fields most
/// providers return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenResponse {
    fields: Map<String, Value>,
}

impl TokenResponse {
    pub fn access_token(&self) -> Option<&str> {
        self.get_str("access_token")
    }

    pub fn token_type(&self) -> Option<&str> {
        self.get_str("token_type")
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.get_str("refresh_token")
    }

    pub fn scope(&self) -> Option<&str> {
        self.get_str("scope")
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.fields.get("expires_in").and_then(Value::as_u64)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for TokenResponse {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
