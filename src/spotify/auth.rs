use std::{sync::Arc, time::Duration};

use reqwest::{Client, Response, Url};
use tokio::{sync::Mutex, time::Instant};

use crate::{
    Res,
    config::Config,
    errors::Error,
    info,
    management::TokenManager,
    server, success,
    types::{AuthState, Token, TokenResponse},
    utils, warning,
};

/// Authorization state shared with the callback handler.
pub type SharedAuthState = Arc<Mutex<Option<AuthState>>>;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Runs the complete OAuth 2.0 authorization-code flow against Spotify.
///
/// 1. Generates the PKCE verifier and challenge and a random `state`
/// 2. Binds the local callback server
/// 3. Opens the authorization URL in the user's browser
/// 4. Waits for the callback handler to report an outcome
/// 5. Stops the callback server
///
/// Public clients (no client secret configured) authenticate the code
/// exchange with the PKCE verifier, confidential clients with their secret.
///
/// # Errors
///
/// - [`Error::AuthDenied`] when the user rejects the consent screen
/// - [`Error::AuthTimeout`] when no callback arrives within `config.auth_timeout`
/// - [`Error::AuthServiceError`] when the token endpoint answers with a non-2xx status
pub async fn authorize(config: &Config) -> Res<TokenManager> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let csrf_state = utils::generate_state();

    let shared_state: SharedAuthState = Arc::new(Mutex::new(Some(AuthState::new(
        code_verifier,
        csrf_state.clone(),
    ))));

    let listener = server::bind(config.server_addr).await?;
    let server_config = Arc::new(config.clone());
    let server_state = Arc::clone(&shared_state);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, server_config, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = authorize_url(config, &code_challenge, &csrf_state)?;

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for authorization in the browser...");
    }

    let outcome = wait_for_outcome(&shared_state, config.auth_timeout).await;
    server_handle.abort();

    let token = outcome?;
    success!("Authentication successful!");
    Ok(TokenManager::new(config.clone(), token))
}

/// Builds the URL of the consent page.
pub fn authorize_url(config: &Config, code_challenge: &str, csrf_state: &str) -> Res<Url> {
    let mut params = vec![
        ("client_id", config.client_id.as_str()),
        ("response_type", "code"),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("scope", config.scope.as_str()),
        ("state", csrf_state),
    ];
    if config.is_public_client() {
        params.push(("code_challenge_method", "S256"));
        params.push(("code_challenge", code_challenge));
    }

    Url::parse_with_params(&config.auth_url, &params)
        .map_err(|e| Error::Config(format!("Invalid authorization URL: {}", e)))
}

/// Polls the shared state until the callback handler stored an outcome or
/// `max_wait` has passed.
pub async fn wait_for_outcome(shared_state: &SharedAuthState, max_wait: Duration) -> Res<Token> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let mut lock = shared_state.lock().await;
        if let Some(outcome) = lock.as_mut().and_then(|auth| auth.outcome.take()) {
            return outcome;
        }
        drop(lock);
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    Err(Error::AuthTimeout(max_wait))
}

pub async fn exchange_code(config: &Config, code: &str, verifier: &str) -> Res<Token> {
    let client = Client::new();
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];

    let request = match &config.client_secret {
        Some(secret) => client
            .post(&config.token_url)
            .basic_auth(&config.client_id, Some(secret)),
        None => {
            form.push(("client_id", config.client_id.as_str()));
            form.push(("code_verifier", verifier));
            client.post(&config.token_url)
        }
    };

    let res = request
        .form(&form)
        .send()
        .await
        .map_err(service_unreachable)?;
    token_from_response(res, None).await
}

pub async fn refresh_token(config: &Config, refresh_token: &str) -> Res<Token> {
    let client = Client::new();
    let mut form = vec![
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];

    let request = match &config.client_secret {
        Some(secret) => client
            .post(&config.token_url)
            .basic_auth(&config.client_id, Some(secret)),
        None => {
            form.push(("client_id", config.client_id.as_str()));
            client.post(&config.token_url)
        }
    };

    let res = request
        .form(&form)
        .send()
        .await
        .map_err(service_unreachable)?;
    token_from_response(res, Some(refresh_token)).await
}

async fn token_from_response(res: Response, previous_refresh_token: Option<&str>) -> Res<Token> {
    let status = res.status();
    if !status.is_success() {
        let message = res.text().await.unwrap_or_default();
        return Err(Error::AuthServiceError {
            status: status.as_u16(),
            message,
        });
    }

    let body: TokenResponse = res.json().await?;
    Ok(body.into_token(previous_refresh_token))
}

fn service_unreachable(err: reqwest::Error) -> Error {
    Error::AuthServiceError {
        status: err.status().map(|s| s.as_u16()).unwrap_or_default(),
        message: err.to_string(),
    }
}
