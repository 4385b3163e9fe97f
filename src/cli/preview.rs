use std::path::Path;

use tabled::Table;

use crate::{error, info, parser, types::TrackTableRow};

pub async fn preview(input: &Path) {
    let tracks = match parser::parse_export(input).await {
        Ok(tracks) => tracks,
        Err(e) => error!("{}", e),
    };

    if tracks.is_empty() {
        info!("No tracks found in {}", input.display());
        return;
    }

    let rows: Vec<TrackTableRow> = tracks
        .into_iter()
        .enumerate()
        .map(|(idx, track)| TrackTableRow {
            position: idx + 1,
            title: track.title,
            artist: track.artist,
            album: track.album.unwrap_or_default(),
        })
        .collect();

    let count = rows.len();
    println!("{}", Table::new(rows));
    info!("{} tracks parsed from {}", count, input.display());
}
