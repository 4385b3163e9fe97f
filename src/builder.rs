//! Playlist Builder
//!
//! Creates (or reuses) the target playlist, looks up every parsed track in the
//! catalog and adds the matches. A track whose search or add request fails is
//! not fatal: it lands in [`ConversionResult::failed`] and the remaining tracks
//! are still processed. Only a failed playlist creation aborts the run.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Res,
    errors::Error,
    info,
    spotify::MusicService,
    success,
    types::{ConversionResult, CreatePlaylistRequest, Track, TrackDescriptor},
    warning,
};

/// Spotify accepts at most 100 URIs per add request.
pub const ADD_CHUNK_SIZE: usize = 100;

pub const DEFAULT_DESCRIPTION: &str = "Imported from Apple Music export";

#[derive(Debug, Clone)]
pub struct PlaylistOptions {
    pub name: String,
    pub description: String,
    pub public: bool,
    /// Add to an existing playlist of the same name instead of creating one.
    pub append: bool,
}

impl PlaylistOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            public: false,
            append: false,
        }
    }
}

/// Search queries for `track`, from strict to relaxed.
pub fn search_queries(track: &TrackDescriptor) -> Vec<String> {
    let mut queries = Vec::with_capacity(4);
    if let Some(album) = &track.album {
        queries.push(format!(
            "track:\"{}\" artist:\"{}\" album:\"{}\"",
            track.title, track.artist, album
        ));
    }
    queries.push(format!("track:\"{}\" artist:\"{}\"", track.title, track.artist));
    queries.push(format!("{} {}", track.title, track.artist));
    queries.push(track.title.clone());
    queries
}

/// Returns the first result of the first query that yields any result.
///
/// A failed search request ends the lookup for this track.
pub async fn match_track<S: MusicService + ?Sized>(
    service: &S,
    track: &TrackDescriptor,
) -> Res<Track> {
    for query in search_queries(track) {
        if let Some(found) = service.search_track(&query).await? {
            return Ok(found);
        }
    }

    Err(Error::TrackNotMatched(track.clone()))
}

/// Awaits `authorize`, hands the credential to `connect` and builds the
/// playlist on the resulting service. A failed authorization returns before
/// any service exists.
pub async fn authorize_and_build<T, A, C, S>(
    authorize: A,
    connect: C,
    tracks: &[TrackDescriptor],
    options: &PlaylistOptions,
) -> Res<ConversionResult>
where
    A: Future<Output = Res<T>>,
    C: FnOnce(T) -> S,
    S: MusicService,
{
    let credential = authorize.await?;
    let service = connect(credential);
    build_playlist(&service, tracks, options).await
}

/// Rebuilds `tracks` as a Spotify playlist.
///
/// # Errors
///
/// Returns [`Error::PlaylistCreateFailed`] if the playlist cannot be created,
/// or the error of the user lookup. Per-track failures never abort.
pub async fn build_playlist<S: MusicService + ?Sized>(
    service: &S,
    tracks: &[TrackDescriptor],
    options: &PlaylistOptions,
) -> Res<ConversionResult> {
    let user = service.current_user().await?;

    let existing = if options.append {
        service.find_owned_playlist(&user.id, &options.name).await?
    } else {
        None
    };

    let playlist = match existing {
        Some(playlist) => {
            info!("Adding to existing playlist '{}'", playlist.name);
            playlist
        }
        None => {
            let request = CreatePlaylistRequest {
                name: options.name.clone(),
                description: options.description.clone(),
                public: options.public,
                collaborative: false,
            };
            let playlist = service.create_playlist(&user.id, &request).await?;
            success!("Created playlist '{}'", playlist.name);
            playlist
        }
    };

    let pb = ProgressBar::new(tracks.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Matching tracks...");

    // (position in `tracks`, spotify uri)
    let mut matched: Vec<(usize, String)> = Vec::new();
    for (idx, track) in tracks.iter().enumerate() {
        match match_track(service, track).await {
            Ok(found) => matched.push((idx, found.uri)),
            Err(Error::TrackNotMatched(_)) => {}
            Err(e) => pb.suspend(|| warning!("Search for {} failed: {}", track, e)),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut converted = vec![false; tracks.len()];
    for chunk in matched.chunks(ADD_CHUNK_SIZE) {
        let uris: Vec<String> = chunk.iter().map(|(_, uri)| uri.clone()).collect();
        match service.add_tracks(&playlist.id, &uris).await {
            Ok(()) => chunk.iter().for_each(|(idx, _)| converted[*idx] = true),
            Err(e) => warning!("Failed to add {} tracks to playlist: {}", chunk.len(), e),
        }
    }

    let (added, failed): (Vec<_>, Vec<_>) = tracks
        .iter()
        .cloned()
        .zip(converted)
        .partition(|(_, ok)| *ok);

    Ok(ConversionResult {
        playlist_id: playlist.id,
        added: added.into_iter().map(|(track, _)| track).collect(),
        failed: failed.into_iter().map(|(track, _)| track).collect(),
    })
}
