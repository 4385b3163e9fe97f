//! Apple Music to Spotify playlist converter
//!
//! This library reads the plain-text playlist export written by Apple Music,
//! authorizes against Spotify with the OAuth 2.0 authorization-code flow and
//! rebuilds the playlist on Spotify, collecting every track that could not be
//! matched in the catalog.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local OAuth callback server
//! - `builder` - Playlist creation, catalog matching and track adding
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `errors` - The crate wide error type
//! - `management` - Token lifecycle management
//! - `parser` - Reader for Apple Music playlist exports
//! - `report` - Conversion report output
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod builder;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod parser;
pub mod report;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// All fallible operations of the crate report an [`errors::Error`], which
/// carries the distinct failure kinds of the conversion (missing input file,
/// malformed export line, denied or timed out authorization, rejected playlist
/// creation and so on).
///
/// # Example
///
/// ```
/// use amspot::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, errors::Error>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message.
///
/// # Example
///
/// ```
/// info!("Loaded {} tracks from export", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing. Only used
/// for fatal errors such as a missing input file, a failed authorization or a
/// rejected playlist creation.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, e.g. a single track whose search request
/// failed while the conversion keeps going.
///
/// # Example
///
/// ```
/// warning!("Search for {} failed", track);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
