#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use amspot::{config::Config, types::Token};
use axum::Router;
use tokio::net::TcpListener;

pub fn test_config(base: &str) -> Config {
    Config {
        client_id: "client-id".to_string(),
        client_secret: None,
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        scope: "playlist-modify-public playlist-modify-private".to_string(),
        auth_url: "https://accounts.example.com/authorize".to_string(),
        token_url: format!("{base}/api/token"),
        api_url: format!("{base}/v1"),
        server_addr: "127.0.0.1:0".parse().unwrap(),
        auth_timeout: Duration::from_secs(2),
    }
}

pub fn fresh_token() -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-modify-private".to_string(),
        expires_in: 3600,
        obtained_at: chrono::Utc::now().timestamp() as u64,
    }
}

/// Serves `router` on an ephemeral loopback port.
pub async fn spawn_stub(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}
