use std::{
    fmt,
    hash::{Hash, Hasher},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::errors::Error;

/// A track read from the Apple Music export.
///
/// Two descriptors are the same track when title and artist match; the album
/// is only used to narrow down catalog searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
}

impl TrackDescriptor {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, album: Option<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.filter(|a| !a.trim().is_empty()),
        }
    }
}

impl PartialEq for TrackDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.artist == other.artist
    }
}

impl Eq for TrackDescriptor {}

impl Hash for TrackDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.artist.hash(state);
    }
}

impl fmt::Display for TrackDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// Outcome of a conversion run. `added` and `failed` partition the parsed
/// tracks and both keep the order of the export file.
#[derive(Debug, Clone, Default)]
pub struct ConversionResult {
    pub playlist_id: String,
    pub added: Vec<TrackDescriptor>,
    pub failed: Vec<TrackDescriptor>,
}

impl ConversionResult {
    pub fn total(&self) -> usize {
        self.added.len() + self.failed.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Raw body of a successful token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

impl TokenResponse {
    /// Refresh responses may omit the refresh token, in which case the
    /// previous one stays valid.
    pub fn into_token(self, previous_refresh_token: Option<&str>) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh_token.map(str::to_string))
                .unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// State shared between the authorization flow and the callback handler.
#[derive(Debug)]
pub struct AuthState {
    pub code_verifier: String,
    pub csrf_state: String,
    pub outcome: Option<Result<Token, Error>>,
}

impl AuthState {
    pub fn new(code_verifier: String, csrf_state: String) -> Self {
        Self {
            code_verifier,
            csrf_state,
            outcome: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracks {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Tracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwner,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub snapshot_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
