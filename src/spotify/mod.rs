//! # Spotify Integration Module
//!
//! Interface to the parts of the Spotify Web API the converter needs.
//!
//! ```text
//! CLI (convert)
//!      ↓
//! Playlist Builder ── MusicService trait
//!      ↓
//! SpotifyClient (reqwest, JSON)
//!      ↓
//! Spotify Web API
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow (PKCE for public clients,
//!   client secret for confidential ones), token exchange and refresh.
//! - [`client`] - [`SpotifyClient`], the HTTP implementation of [`MusicService`].
//!
//! ## API Coverage
//!
//! - `GET /me` - The authenticated user
//! - `GET /me/playlists` - Lookup of an existing playlist by name
//! - `POST /users/{user_id}/playlists` - Create the target playlist
//! - `GET /search?type=track` - Catalog search
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks
//! - `POST /api/token` - Token exchange and refresh
//!
//! Every call is a single attempt; failures are reported to the caller, who
//! decides whether they are fatal.

use async_trait::async_trait;

use crate::{
    Res,
    types::{CreatePlaylistRequest, Playlist, Track, User},
};

pub mod auth;
pub mod client;

pub use client::SpotifyClient;

/// The remote operations the playlist builder depends on.
#[async_trait]
pub trait MusicService: Send + Sync {
    async fn current_user(&self) -> Res<User>;

    /// Returns the first playlist called `name` that is owned by `user_id`.
    async fn find_owned_playlist(&self, user_id: &str, name: &str) -> Res<Option<Playlist>>;

    async fn create_playlist(&self, user_id: &str, request: &CreatePlaylistRequest)
    -> Res<Playlist>;

    /// Returns the top-ranked catalog track for `query`, if any.
    async fn search_track(&self, query: &str) -> Res<Option<Track>>;

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()>;
}
