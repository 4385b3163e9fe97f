use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::net::TcpListener;

use crate::{Res, api, config::Config, spotify::auth::SharedAuthState};

pub fn router(config: Arc<Config>, state: SharedAuthState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(config))
}

/// Binds the callback listener up front so a busy port fails the run before
/// the browser is opened.
pub async fn bind(addr: SocketAddr) -> Res<TcpListener> {
    Ok(TcpListener::bind(addr).await?)
}

pub async fn serve(
    listener: TcpListener,
    config: Arc<Config>,
    state: SharedAuthState,
) -> Res<()> {
    axum::serve(listener, router(config, state)).await?;
    Ok(())
}
