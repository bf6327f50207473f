//! Wire format of the playlist endpoint.
//!
//! ```json
//! {
//!   "videos": [
//!     {
//!       "title": "Android Jetpack: Room",
//!       "description": "...",
//!       "url": "https://www.youtube.com/watch?v=SKWh4ckvFPM",
//!       "updated": "2018-06-07T17:09:43+00:00",
//!       "thumbnail": "https://i4.ytimg.com/vi/SKWh4ckvFPM/hqdefault.jpg",
//!       "closedCaptions": null
//!     }
//!   ]
//! }
//! ```
//!
//! Fields the cache has no use for (`updated`, `closedCaptions`, ...) are
//! ignored.

use crate::error::{ErrorKind, Result};
use devbyte_cache::VideoRecord;
use exn::ResultExt;
use serde::Deserialize;

/// One video as served by the playlist endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkVideo {
    /// Stable identifier, when the server provides one.
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(rename = "thumbnail", alias = "thumbnailUrl", default)]
    pub thumbnail_url: String,
}
impl NetworkVideo {
    /// Row key for this video: the server's id if present, otherwise the
    /// BLAKE3 hash of its URL.
    pub fn record_id(&self) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => blake3::hash(self.url.as_bytes()).to_hex().to_string(),
        }
    }
}
impl From<NetworkVideo> for VideoRecord {
    fn from(video: NetworkVideo) -> Self {
        Self {
            id: video.record_id(),
            title: video.title,
            description: video.description,
            url: video.url,
            thumbnail_url: video.thumbnail_url,
        }
    }
}

/// Envelope around the playlist.
#[derive(Debug, Deserialize)]
struct NetworkVideoContainer {
    videos: Vec<NetworkVideo>,
}

/// Decode a playlist response body.
pub fn parse_playlist(body: impl AsRef<[u8]>) -> Result<Vec<NetworkVideo>> {
    let container: NetworkVideoContainer =
        serde_json::from_slice(body.as_ref()).or_raise(|| ErrorKind::Decode)?;
    Ok(container.videos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PLAYLIST: &str = r#"{
        "videos": [
            {
                "title": "Android Jetpack: Room",
                "description": "Room is a SQLite object mapping library.",
                "url": "https://www.youtube.com/watch?v=SKWh4ckvFPM",
                "updated": "2018-06-07T17:09:43+00:00",
                "thumbnail": "https://i4.ytimg.com/vi/SKWh4ckvFPM/hqdefault.jpg",
                "closedCaptions": null
            },
            {
                "id": "workmanager",
                "title": "Android Jetpack: WorkManager",
                "description": "Deferrable background work.",
                "url": "https://www.youtube.com/watch?v=pe_yqM16hPQ",
                "thumbnailUrl": "https://i4.ytimg.com/vi/pe_yqM16hPQ/hqdefault.jpg"
            }
        ]
    }"#;

    #[test]
    fn test_parse_playlist() {
        let videos = parse_playlist(PLAYLIST).unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].title, "Android Jetpack: Room");
        assert_eq!(videos[0].id, None);
        assert_eq!(videos[0].thumbnail_url, "https://i4.ytimg.com/vi/SKWh4ckvFPM/hqdefault.jpg");
        assert_eq!(videos[1].id.as_deref(), Some("workmanager"));
        assert_eq!(videos[1].thumbnail_url, "https://i4.ytimg.com/vi/pe_yqM16hPQ/hqdefault.jpg");
    }

    #[rstest]
    #[case::not_json("<html>502 Bad Gateway</html>")]
    #[case::missing_envelope(r#"[{"title": "t", "url": "u"}]"#)]
    #[case::missing_url(r#"{"videos": [{"title": "t"}]}"#)]
    fn test_parse_playlist_rejects(#[case] body: &str) {
        let err = parse_playlist(body).unwrap_err();
        assert_eq!(*err, ErrorKind::Decode);
    }

    #[test]
    fn test_empty_playlist() {
        assert!(parse_playlist(r#"{"videos": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_record_id_is_derived_from_url() {
        let videos = parse_playlist(PLAYLIST).unwrap();
        let derived = videos[0].record_id();
        assert_eq!(derived, blake3::hash(b"https://www.youtube.com/watch?v=SKWh4ckvFPM").to_hex().to_string());
        assert_eq!(derived.len(), 64);
        // Stable across fetches.
        assert_eq!(derived, parse_playlist(PLAYLIST).unwrap()[0].record_id());
        assert_eq!(videos[1].record_id(), "workmanager");
    }

    #[test]
    fn test_to_record() {
        let video = parse_playlist(PLAYLIST).unwrap().remove(1);
        let record = VideoRecord::from(video.clone());
        assert_eq!(record.id, "workmanager");
        assert_eq!(record.title, video.title);
        assert_eq!(record.description, video.description);
        assert_eq!(record.url, video.url);
        assert_eq!(record.thumbnail_url, video.thumbnail_url);
    }
}
