//! Configuration management for the playlist converter.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides the Spotify application credentials,
//! the OAuth endpoints and the settings of the local callback server.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the current working directory
//! 4. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::{Res, errors::Error};

const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private playlist-read-private";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 60;

/// Loads environment variables from `.env` files.
///
/// Creates the local data directory if it doesn't exist and loads the `.env`
/// file located under `amspot/.env` in it, followed by a `.env` in the current
/// working directory. Missing files are skipped; variables already present in
/// the process environment are never overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/amspot/.env`
/// - macOS: `~/Library/Application Support/amspot/.env`
/// - Windows: `%LOCALAPPDATA%/amspot/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    dotenv::dotenv().ok();
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("amspot/.env");
    path
}

fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Returns the Spotify API client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Res<String> {
    match env::var("SPOTIFY_API_AUTH_CLIENT_ID") {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(
            "SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string(),
        )),
    }
}

/// Returns the Spotify API client secret (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// An unset or empty secret selects the public client (PKCE) flow.
pub fn spotify_client_secret() -> Option<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET")
        .ok()
        .filter(|secret| !secret.trim().is_empty())
}

/// Returns the OAuth redirect URI (`SPOTIFY_API_REDIRECT_URI`).
///
/// This must match the redirect URI registered in the Spotify application
/// settings and point at [`server_addr`].
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the requested scopes (`SPOTIFY_API_AUTH_SCOPE`), space separated.
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Returns the OAuth authorization URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the bind address of the local callback server (`SERVER_ADDRESS`).
pub fn server_addr() -> Res<SocketAddr> {
    let raw = var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
    SocketAddr::from_str(&raw)
        .map_err(|e| Error::Config(format!("Failed to parse server address '{}': {}", raw, e)))
}

/// Returns how long to wait for the browser consent step (`AUTH_TIMEOUT_SECS`).
pub fn auth_timeout() -> Res<Duration> {
    let raw = var_or("AUTH_TIMEOUT_SECS", &DEFAULT_AUTH_TIMEOUT_SECS.to_string());
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| Error::Config(format!("Invalid AUTH_TIMEOUT_SECS '{}': {}", raw, e)))
}

/// Settings needed to talk to Spotify, resolved once per run.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: SocketAddr,
    pub auth_timeout: Duration,
}

impl Config {
    /// Resolves every setting from the environment.
    ///
    /// Only the client ID is mandatory, all other values fall back to the
    /// public Spotify endpoints and a callback server on `127.0.0.1:8888`.
    pub fn from_env() -> Res<Self> {
        Ok(Self {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret(),
            redirect_uri: spotify_redirect_uri(),
            scope: spotify_scope(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl().trim_end_matches('/').to_string(),
            server_addr: server_addr()?,
            auth_timeout: auth_timeout()?,
        })
    }

    pub fn is_public_client(&self) -> bool {
        self.client_secret.is_none()
    }
}
