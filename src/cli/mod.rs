//! # CLI Module
//!
//! User-facing commands of amspot. Each command coordinates the parser, the
//! Spotify integration and the report output, and presents errors with the
//! crate's status macros.
//!
//! ## Commands
//!
//! - [`convert`] - Parse an Apple Music export, authorize with Spotify, build
//!   the playlist and print the tracks that could not be converted
//! - [`preview`] - Parse an export and show the tracks as a table without
//!   contacting Spotify
//!
//! ## Data Flow
//!
//! ```text
//! Export file ──> parser ──> TrackDescriptor list
//!                                   │
//!          spotify::auth ──> TokenManager ──> SpotifyClient
//!                                   │
//!                     builder ──> ConversionResult ──> report
//! ```
//!
//! Fatal errors (missing file, malformed line, failed authorization, rejected
//! playlist creation) end the program through [`crate::error!`] with exit
//! code 1. Unmatched tracks are part of the regular report.
//!
//! ## Usage
//!
//! ```bash
//! amspot preview --in "My Playlist.txt"
//! amspot convert --in "My Playlist.txt" --playlist "My Playlist"
//! amspot convert --in export.txt --playlist Road --append --misses misses.csv
//! ```

mod convert;
mod preview;

pub use convert::ConvertArgs;
pub use convert::convert;
pub use preview::preview;
