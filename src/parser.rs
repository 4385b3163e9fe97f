//! Reader for Apple Music playlist exports.
//!
//! Music.app writes playlists ("File → Library → Export Playlist…", format
//! "Text") as a tab separated table with a header row, encoded as UTF-16.
//! Hand-written lists in the form `Title — Artist [— Album]` are accepted as
//! well. Both layouts produce one [`TrackDescriptor`] per non-empty data line,
//! in file order.

use std::{io::ErrorKind, path::Path};

use crate::{Res, errors::Error, types::TrackDescriptor};

const TITLE_COLUMNS: [&str; 3] = ["Name", "Title", "Track Name"];
const ARTIST_COLUMNS: [&str; 2] = ["Artist", "Artist Name"];
const ALBUM_COLUMNS: [&str; 3] = ["Album", "Album Title", "Album Name"];

// Tab first: Music.app exports are tab separated.
const DELIMITERS: [char; 3] = ['\t', ',', ';'];

const LINE_SEPARATORS: [&str; 2] = [" — ", " – "];

/// Reads and parses the export at `path`.
pub async fn parse_export(path: &Path) -> Res<Vec<TrackDescriptor>> {
    let bytes = match async_fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(Error::Io(e)),
    };

    parse_export_str(&decode(&bytes))
}

/// Decodes the raw file contents, honouring a UTF-16 or UTF-8 byte order mark.
pub fn decode(bytes: &[u8]) -> String {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Parses export text that is already decoded.
pub fn parse_export_str(text: &str) -> Res<Vec<TrackDescriptor>> {
    // Older Music.app/iTunes exports end lines with a bare CR.
    let text = text.replace("\r\n", "\n");

    // (1-based line number, content) of every non-empty line
    let lines: Vec<(usize, &str)> = text
        .split(['\n', '\r'])
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let Some(&(_, first)) = lines.first() else {
        return Ok(Vec::new());
    };

    match Header::detect(first) {
        Some(header) => lines[1..]
            .iter()
            .map(|&(number, line)| header.parse_row(number, line))
            .collect(),
        None => lines
            .iter()
            .map(|&(number, line)| parse_line(number, line))
            .collect(),
    }
}

/// Column layout of a tabular export, taken from its header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub delimiter: char,
    pub title: usize,
    pub artist: usize,
    pub album: Option<usize>,
}

impl Header {
    /// Returns the layout if `line` is a header row naming at least a title
    /// and an artist column.
    pub fn detect(line: &str) -> Option<Self> {
        DELIMITERS
            .iter()
            .filter(|delimiter| line.contains(**delimiter))
            .find_map(|&delimiter| {
                let columns = split_fields(line, delimiter);
                let title = find_column(&columns, &TITLE_COLUMNS)?;
                let artist = find_column(&columns, &ARTIST_COLUMNS)?;
                Some(Header {
                    delimiter,
                    title,
                    artist,
                    album: find_column(&columns, &ALBUM_COLUMNS),
                })
            })
    }

    fn parse_row(&self, number: usize, line: &str) -> Res<TrackDescriptor> {
        let fields = split_fields(line, self.delimiter);
        let field = |idx: usize| fields.get(idx).map(|f| f.trim()).unwrap_or_default();

        let title = field(self.title);
        if title.is_empty() {
            return Err(malformed(number, "missing track name"));
        }
        let artist = field(self.artist);
        if artist.is_empty() {
            return Err(malformed(number, "missing artist"));
        }
        let album = self.album.map(|idx| field(idx).to_string());

        Ok(TrackDescriptor::new(title, artist, album))
    }
}

fn find_column(columns: &[String], names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| {
        columns
            .iter()
            .position(|column| column.trim().eq_ignore_ascii_case(name))
    })
}

/// Splits a delimited row, honouring double-quoted fields with `""` escapes.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            c if c == delimiter && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn parse_line(number: usize, line: &str) -> Res<TrackDescriptor> {
    let Some(separator) = LINE_SEPARATORS.iter().find(|sep| line.contains(**sep)) else {
        return Err(malformed(number, "expected 'Title — Artist'"));
    };

    let parts: Vec<&str> = line.split(*separator).map(str::trim).collect();
    let (title, artist, album) = match parts.as_slice() {
        [title, artist] => (*title, *artist, None),
        [title, artist, album] => (*title, *artist, Some(album.to_string())),
        _ => return Err(malformed(number, "too many fields")),
    };

    if title.is_empty() || artist.is_empty() {
        return Err(malformed(number, "empty title or artist"));
    }

    Ok(TrackDescriptor::new(title, artist, album))
}

fn malformed(line: usize, reason: &str) -> Error {
    Error::MalformedLine {
        line,
        reason: reason.to_string(),
    }
}
