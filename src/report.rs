use std::path::Path;

use crate::{
    Res,
    errors::Error,
    info, success,
    types::{ConversionResult, TrackDescriptor},
    utils::escape_csv_field,
    warning,
};

/// One line per track that could not be converted, in file order.
pub fn failure_lines(result: &ConversionResult) -> Vec<String> {
    result
        .failed
        .iter()
        .map(|track| Error::TrackNotMatched(track.clone()).to_string())
        .collect()
}

pub fn print_report(result: &ConversionResult, playlist_name: &str) {
    success!(
        "Added {} of {} tracks to '{}'.",
        result.added.len(),
        result.total(),
        playlist_name
    );

    if result.failed.is_empty() {
        return;
    }

    warning!("Could not match {} tracks:", result.failed.len());
    for line in failure_lines(result) {
        println!("{}", line);
    }
}

/// Renders the misses file: a `Title,Artist,Album` header followed by one row
/// per failed track.
pub fn misses_csv(failed: &[TrackDescriptor]) -> String {
    let mut out = String::from("Title,Artist,Album\n");
    for track in failed {
        out.push_str(&format!(
            "{},{},{}\n",
            escape_csv_field(&track.title),
            escape_csv_field(&track.artist),
            escape_csv_field(track.album.as_deref().unwrap_or_default())
        ));
    }
    out
}

pub async fn write_misses(path: &Path, failed: &[TrackDescriptor]) -> Res<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }
    async_fs::write(path, misses_csv(failed)).await?;
    info!("Unmatched tracks written to {}", path.display());
    Ok(())
}
