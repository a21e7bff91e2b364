//! OAuth 2.0 authorization code grant helpers.
//!
//! Builds the provider's authorize URL with a single-use CSRF `state` token
//! kept in the caller's session, and exchanges the returned code for a token
//! with one form-encoded POST to the provider's token endpoint.

mod client;
mod config;
mod error;
mod session;
mod state;
mod transport;
mod types;

pub use client::AuthorizationCodeClient;
pub use config::{OAuthClientConfig, OAuthClientConfigBuilder};
pub use error::{AuthError, ConfigField};
pub use session::{MemorySession, STATE_SESSION_KEY, SessionStore};
pub use state::{DEFAULT_STATE_LENGTH, generate_state, generate_state_with_length};
pub use transport::{HttpResponse, HttpTransport};
pub use types::{AuthorizationRequest, AuthorizationResponse, TokenResponse};
