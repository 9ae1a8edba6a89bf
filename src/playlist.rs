use core::str::FromStr;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;

/// Prefix the downloader puts in front of each playlist snapshot element.
const CACHE_PREFIX: &str = "__CACHE:";

/// A single track of the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Display name of the track.
    pub title: String,
    /// Identifier correlating the track with a downloaded file.
    pub id: String,
    /// Name of the artist, where known.
    pub artist: Option<String>,
}

/// A parsed playlist.
#[derive(Debug, Default)]
pub struct Playlist {
    /// Tracks in playlist order.
    pub tracks: Vec<Track>,
    /// Entries which could not be used, with the reason.
    pub issues: Vec<String>,
}

impl Playlist {
    /// Load a playlist from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

        contents
            .parse::<Self>()
            .with_context(|| format!("parsing {}", path.display()))
    }

    fn from_entries(entries: Vec<Entry>) -> Self {
        let mut tracks = Vec::with_capacity(entries.len());
        let mut issues = Vec::new();

        for (index, entry) in entries.into_iter().enumerate() {
            match entry.into_track() {
                Ok(track) => tracks.push(track),
                Err(missing) => issues.push(format!("entry {index} ({missing})")),
            }
        }

        Self { tracks, issues }
    }
}

impl FromStr for Playlist {
    type Err = anyhow::Error;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        let doc: Value = serde_json::from_str(contents).context("not valid JSON")?;

        let Value::Array(items) = doc else {
            bail!("expected a JSON array");
        };

        // The downloader appends each playlist state to the file as a single
        // string element prefixed with `__CACHE:`. The last element is the
        // most recent snapshot.
        if let Some(Value::String(snapshot)) = items.last() {
            let payload = snapshot.strip_prefix(CACHE_PREFIX).unwrap_or(snapshot);

            let snapshot: Snapshot =
                serde_json::from_str(payload).context("decoding playlist snapshot")?;

            return Ok(Self::from_entries(snapshot.videos));
        }

        let mut entries = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            let entry =
                serde_json::from_value(item).with_context(|| format!("track at index {index}"))?;

            entries.push(entry);
        }

        Ok(Self::from_entries(entries))
    }
}

/// The playlist state as maintained by the downloader.
#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    videos: Vec<Entry>,
}

/// A raw playlist entry.
#[derive(Deserialize)]
struct Entry {
    #[serde(alias = "title")]
    name: Option<String>,
    id: Option<Id>,
    #[serde(alias = "artist")]
    author: Option<Author>,
}

impl Entry {
    fn into_track(self) -> Result<Track, &'static str> {
        let Some(title) = self.name.filter(|name| !name.is_empty()) else {
            return Err("missing name");
        };

        let Some(id) = self.id.and_then(Id::into_value).filter(|id| !id.is_empty()) else {
            return Err("missing identifier");
        };

        let artist = self
            .author
            .and_then(Author::into_name)
            .filter(|artist| !artist.is_empty());

        Ok(Track { title, id, artist })
    }
}

/// The identifier of an entry, either structured or a plain string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Id {
    Object { value: Option<String> },
    Plain(String),
    Other(IgnoredAny),
}

impl Id {
    fn into_value(self) -> Option<String> {
        match self {
            Id::Object { value } => value,
            Id::Plain(value) => Some(value),
            Id::Other(..) => None,
        }
    }
}

/// The author of an entry, either structured or a plain string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Author {
    Object { name: Option<String> },
    Plain(String),
    Other(IgnoredAny),
}

impl Author {
    fn into_name(self) -> Option<String> {
        match self {
            Author::Object { name } => name,
            Author::Plain(name) => Some(name),
            Author::Other(..) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Playlist, Track};

    fn track(title: &str, id: &str, artist: Option<&str>) -> Track {
        Track {
            title: title.to_owned(),
            id: id.to_owned(),
            artist: artist.map(str::to_owned),
        }
    }

    #[test]
    fn plain_array_of_tracks() {
        let playlist: Playlist = r#"[
            {"name": "First", "id": {"value": "aaa111"}, "author": {"name": "Artist"}},
            {"title": "Second", "id": "bbb222", "artist": "Someone"}
        ]"#
        .parse()
        .unwrap();

        assert_eq!(
            playlist.tracks,
            vec![
                track("First", "aaa111", Some("Artist")),
                track("Second", "bbb222", Some("Someone")),
            ]
        );

        assert!(playlist.issues.is_empty());
    }

    #[test]
    fn snapshot_form() {
        let inner = r#"{"videos": [{"name": "Song", "id": {"platform": "Test", "value": "abc123"}}]}"#;
        let doc = serde_json::json!(["__CACHE:{}", format!("__CACHE:{inner}")]);

        let playlist: Playlist = doc.to_string().parse().unwrap();

        assert_eq!(playlist.tracks, vec![track("Song", "abc123", None)]);
        assert!(playlist.issues.is_empty());
    }

    #[test]
    fn snapshot_without_prefix() {
        let playlist: Playlist = r#"["{\"videos\": []}"]"#.parse().unwrap();
        assert!(playlist.tracks.is_empty());
    }

    #[test]
    fn entries_missing_fields_become_issues() {
        let playlist: Playlist = r#"[
            {"name": "No Id"},
            {"id": "xyz789"},
            {"name": "Ok", "id": "ok1", "author": 42}
        ]"#
        .parse()
        .unwrap();

        assert_eq!(playlist.tracks, vec![track("Ok", "ok1", None)]);
        assert_eq!(playlist.issues.len(), 2);
        assert!(playlist.issues[0].contains("missing identifier"));
        assert!(playlist.issues[1].contains("missing name"));
    }

    #[test]
    fn empty_array_is_an_empty_playlist() {
        let playlist: Playlist = "[]".parse().unwrap();
        assert!(playlist.tracks.is_empty());
        assert!(playlist.issues.is_empty());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!("not json".parse::<Playlist>().is_err());
    }

    #[test]
    fn rejects_non_array_documents() {
        assert!(r#"{"videos": []}"#.parse::<Playlist>().is_err());
    }

    #[test]
    fn rejects_malformed_elements() {
        assert!("[1, 2]".parse::<Playlist>().is_err());
    }
}
