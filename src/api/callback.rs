use std::sync::Arc;

use axum::{Extension, extract::Query, response::Html};

use crate::{
    config::Config,
    errors::Error,
    spotify::{self, auth::SharedAuthState},
    types::CallbackParams,
    warning,
};

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(config): Extension<Arc<Config>>,
    Extension(shared_state): Extension<SharedAuthState>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(auth_state) = state.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if params.state.as_deref() != Some(auth_state.csrf_state.as_str()) {
        warning!("Ignoring callback with unexpected state parameter.");
        return Html("<h4>Invalid state parameter.</h4>");
    }

    if auth_state.outcome.is_some() {
        return Html("<h4>Authorization already handled.</h4>");
    }

    if let Some(error) = params.error {
        auth_state.outcome = Some(Err(if error == "access_denied" {
            Error::AuthDenied
        } else {
            Error::AuthServiceError {
                status: 400,
                message: error,
            }
        }));
        return Html("<h4>Authorization denied.</h4><p>Close browser window.</p>");
    }

    let Some(code) = params.code else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    // Not held across the exchange: `wait_for_outcome` must keep its deadline.
    let verifier = auth_state.code_verifier.clone();
    drop(state);

    let outcome = spotify::auth::exchange_code(&config, &code, &verifier).await;
    let page = match &outcome {
        Ok(_) => Html("<h2>Authentication successful.</h2><p>Close browser window.</p>"),
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    };

    if let Some(auth_state) = shared_state.lock().await.as_mut() {
        if auth_state.outcome.is_none() {
            auth_state.outcome = Some(outcome);
        }
    }
    page
}
