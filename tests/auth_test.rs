mod common;

use std::{collections::HashMap, sync::Arc, time::Duration};

use amspot::{
    config::Config,
    errors::Error,
    management::TokenManager,
    server,
    spotify::auth::{SharedAuthState, authorize_url, wait_for_outcome},
    types::{AuthState, Token},
};
use axum::{Form, Json, Router, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use tokio::{sync::Mutex, time::Instant};

use common::{spawn_stub, test_config};

/// Token endpoint that only accepts the PKCE exchange of code "good-code".
async fn token_endpoint(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
    let get = |key: &str| form.get(key).map(String::as_str);

    match get("grant_type") {
        Some("authorization_code")
            if get("code") == Some("good-code")
                && get("code_verifier") == Some("verifier")
                && get("client_id") == Some("client-id") =>
        {
            (
                StatusCode::OK,
                Json(json!({
                    "access_token": "access-1",
                    "token_type": "Bearer",
                    "scope": "playlist-modify-private",
                    "expires_in": 3600,
                    "refresh_token": "refresh-1"
                })),
            )
        }
        Some("refresh_token") if get("refresh_token") == Some("refresh-1") => (
            StatusCode::OK,
            Json(json!({
                "access_token": "access-2",
                "token_type": "Bearer",
                "expires_in": 3600
            })),
        ),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        ),
    }
}

async fn start_callback_server(config: Config) -> (String, SharedAuthState) {
    let state: SharedAuthState = Arc::new(Mutex::new(Some(AuthState::new(
        "verifier".to_string(),
        "xyz".to_string(),
    ))));

    let listener = server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_state = Arc::clone(&state);
    tokio::spawn(async move {
        server::serve(listener, Arc::new(config), server_state)
            .await
            .unwrap();
    });

    (format!("http://{addr}"), state)
}

async fn stub_accounts_service() -> Config {
    let router = Router::new().route("/api/token", post(token_endpoint));
    let addr = spawn_stub(router).await;
    test_config(&format!("http://{addr}"))
}

#[tokio::test]
async fn test_callback_exchanges_code_for_token() {
    let config = stub_accounts_service().await;
    let (base, state) = start_callback_server(config).await;

    let body = reqwest::get(format!("{base}/callback?code=good-code&state=xyz"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Authentication successful"));

    let token = wait_for_outcome(&state, Duration::from_secs(2)).await.unwrap();
    assert_eq!(token.access_token, "access-1");
    assert_eq!(token.refresh_token, "refresh-1");
    assert_eq!(token.expires_in, 3600);
}

#[tokio::test]
async fn test_denied_consent_is_reported() {
    let config = stub_accounts_service().await;
    let (base, state) = start_callback_server(config).await;

    reqwest::get(format!("{base}/callback?error=access_denied&state=xyz"))
        .await
        .unwrap();

    let outcome = wait_for_outcome(&state, Duration::from_secs(2)).await;
    assert!(matches!(outcome, Err(Error::AuthDenied)));
}

#[tokio::test]
async fn test_rejected_exchange_is_a_service_error() {
    let config = stub_accounts_service().await;
    let (base, state) = start_callback_server(config).await;

    reqwest::get(format!("{base}/callback?code=bad-code&state=xyz"))
        .await
        .unwrap();

    let outcome = wait_for_outcome(&state, Duration::from_secs(2)).await;
    match outcome {
        Err(Error::AuthServiceError { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("invalid_grant"));
        }
        other => panic!("expected AuthServiceError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_token_endpoint_does_not_outlast_the_wait() {
    let router = Router::new().route(
        "/api/token",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    );
    let addr = spawn_stub(router).await;
    let (base, state) = start_callback_server(test_config(&format!("http://{addr}"))).await;

    tokio::spawn(reqwest::get(format!("{base}/callback?code=good-code&state=xyz")));

    let started = Instant::now();
    let outcome = wait_for_outcome(&state, Duration::from_secs(1)).await;
    assert!(matches!(outcome, Err(Error::AuthTimeout(_))));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_callback_with_foreign_state_is_ignored() {
    let config = stub_accounts_service().await;
    let (base, state) = start_callback_server(config).await;

    let res = reqwest::get(format!("{base}/callback?code=good-code&state=other"))
        .await
        .unwrap();
    assert!(res.text().await.unwrap().contains("Invalid state"));

    let outcome = wait_for_outcome(&state, Duration::from_millis(600)).await;
    assert!(matches!(outcome, Err(Error::AuthTimeout(_))));
}

#[tokio::test]
async fn test_no_callback_times_out() {
    let state: SharedAuthState = Arc::new(Mutex::new(Some(AuthState::new(
        "verifier".to_string(),
        "xyz".to_string(),
    ))));

    let outcome = wait_for_outcome(&state, Duration::from_millis(300)).await;
    assert!(matches!(outcome, Err(Error::AuthTimeout(d)) if d == Duration::from_millis(300)));
}

#[tokio::test]
async fn test_health_endpoint() {
    let config = stub_accounts_service().await;
    let (base, _state) = start_callback_server(config).await;

    let body: serde_json::Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_expired_token_is_refreshed() {
    let config = stub_accounts_service().await;
    let stale = Token {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at: 0,
    };
    let mut manager = TokenManager::new(config, stale);
    assert!(manager.is_expired());

    let access = manager.get_valid_token().await.unwrap();

    assert_eq!(access, "access-2");
    assert!(!manager.is_expired());
    // refresh response carried no new refresh token
    assert_eq!(manager.current_token().refresh_token, "refresh-1");
}

#[tokio::test]
async fn test_valid_token_is_not_refreshed() {
    // no accounts service behind this config
    let config = test_config("http://127.0.0.1:9");
    let mut manager = TokenManager::new(config, common::fresh_token());

    assert_eq!(manager.get_valid_token().await.unwrap(), "access");
}

#[test]
fn test_authorize_url_for_public_client() {
    let config = test_config("http://127.0.0.1:9");
    let url = authorize_url(&config, "challenge", "xyz").unwrap();
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    assert_eq!(url.path(), "/authorize");
    assert_eq!(params["client_id"], "client-id");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["redirect_uri"], "http://127.0.0.1:8888/callback");
    assert_eq!(params["scope"], "playlist-modify-public playlist-modify-private");
    assert_eq!(params["state"], "xyz");
    assert_eq!(params["code_challenge_method"], "S256");
    assert_eq!(params["code_challenge"], "challenge");
}

#[test]
fn test_authorize_url_for_confidential_client() {
    let config = Config {
        client_secret: Some("secret".to_string()),
        ..test_config("http://127.0.0.1:9")
    };
    let url = authorize_url(&config, "challenge", "xyz").unwrap();

    assert!(!url.query_pairs().any(|(k, _)| k.starts_with("code_challenge")));
}
