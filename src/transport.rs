use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};

use crate::AuthError;

/// Raw response from the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP client used for the token exchange.
///
/// Implementations send `form` as an `application/x-www-form-urlencoded`
/// body, keeping the pair order, and return the body without interpreting the
/// status code. Timeouts are the implementation's concern.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<HttpResponse, AuthError>;
}

#[async_trait]
impl HttpTransport for Client {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<HttpResponse, AuthError> {
        let response = self
            .post(url)
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

