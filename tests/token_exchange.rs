use std::net::TcpListener;
use std::time::Duration;

use oauth_code_grant::{
    AuthError, AuthorizationCodeClient, MemorySession, OAuthClientConfig, STATE_SESSION_KEY,
};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> OAuthClientConfig {
    OAuthClientConfig::builder()
        .with_provider_url(server.uri())
        .with_client_id("42")
        .with_client_secret("s3cret")
        .with_redirect_uri("https://app.example.com/callback")
        .with_scopes("read write")
        .with_timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn exchanges_code_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "grant_type=authorization_code&client_id=42&client_secret=s3cret\
             &redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback&code=the-code",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc",
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AuthorizationCodeClient::new(config(&server)).unwrap();
    let mut session = MemorySession::new();
    let auth = client.authorization_url(&mut session).unwrap();
    assert!(
        auth.authorization_url
            .starts_with(&format!("{}/oauth/authorize?", server.uri()))
    );

    let token = client
        .exchange_code("the-code", Some(&auth.state), &mut session)
        .await
        .unwrap();

    assert_eq!(token.access_token(), Some("abc"));
    assert_eq!(token.token_type(), Some("bearer"));
    assert_eq!(token.expires_in(), Some(3600));
    assert!(!session.contains(STATE_SESSION_KEY));
}

#[tokio::test]
async fn forged_state_never_reaches_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "abc"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = AuthorizationCodeClient::new(config(&server)).unwrap();
    let mut session = MemorySession::new();
    client.authorization_url(&mut session).unwrap();

    let result = client
        .exchange_code("the-code", Some("forged"), &mut session)
        .await;

    assert!(matches!(result, Err(AuthError::StateMismatch { .. })));
    assert!(!session.contains(STATE_SESSION_KEY));
}

#[tokio::test]
async fn non_json_body_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = AuthorizationCodeClient::new(config(&server)).unwrap();
    let mut session = MemorySession::new();
    let auth = client.authorization_url(&mut session).unwrap();

    let result = client
        .exchange_code("the-code", Some(&auth.state), &mut session)
        .await;

    match result {
        Err(AuthError::MalformedResponse { body, .. }) => assert_eq!(body, "Bad Gateway"),
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_provider_is_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let config = OAuthClientConfig::builder()
        .with_provider_url(format!("http://{address}"))
        .with_client_id("42")
        .with_client_secret("s3cret")
        .with_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let client = AuthorizationCodeClient::new(config).unwrap();
    let mut session = MemorySession::new();
    let auth = client.authorization_url(&mut session).unwrap();

    let result = client
        .exchange_code("the-code", Some(&auth.state), &mut session)
        .await;

    assert!(matches!(result, Err(AuthError::Http(_))));
}
