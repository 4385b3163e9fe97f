//! # API Module
//!
//! HTTP endpoints of the short-lived local server that receives the OAuth
//! redirect from Spotify's accounts service.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code (or the consent error),
//!   exchanges the code for a token and stores the outcome in the shared
//!   authorization state.
//! - [`health`] - Returns status and version, handy to check that the
//!   redirect URI points at this server.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
