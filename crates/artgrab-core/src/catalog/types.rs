//! Catalog entities as returned by the provider's search API.
//!
//! Only the fields the service uses are modelled. Provider output is not
//! always tidy: playlists may carry `images: null`, ids may be `null`, and
//! pages may contain `null` or malformed items. Nulls become defaults and
//! items that still fail to decode are dropped from their page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::artwork::ImageVariant;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes page items one by one so a single bad item does not lose the page.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .filter(|v| !v.is_null())
        .filter_map(|v| match serde_json::from_value(v) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("skipping malformed catalog item: {}", e);
                None
            }
        })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<String>,
}

/// Simplified artist as embedded in albums and tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageVariant>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub total_tracks: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album: Album,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
}

impl Track {
    /// `m:ss` rendering of the track length.
    pub fn duration_label(&self) -> String {
        let minutes = self.duration_ms / 60_000;
        let seconds = (self.duration_ms % 60_000) / 1000;
        format!("{}:{:02}", minutes, seconds)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

/// Full artist as returned by artist searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageVariant>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers: Followers,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistOwner {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl PlaylistOwner {
    /// Display name, falling back to the account id.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCount {
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageVariant>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: PlaylistOwner,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracks: TrackCount,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
}

/// One page of results for an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Page<T> {
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u32,
}

/// Search results keyed by entity type; only requested types are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albums: Option<Page<Album>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Page<Artist>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Page<Track>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlists: Option<Page<Playlist>>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        fn empty<T>(page: &Option<Page<T>>) -> bool {
            page.as_ref().map_or(true, |p| p.items.is_empty())
        }
        empty(&self.albums) && empty(&self.artists) && empty(&self.tracks) && empty(&self.playlists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_with_null_images_and_owner_name() {
        let json = r#"{
            "id": "p1",
            "name": "Focus",
            "description": "",
            "images": null,
            "owner": { "id": "u1", "display_name": null },
            "tracks": { "total": 12 },
            "public": true,
            "uri": "spotify:playlist:p1",
            "external_urls": { "spotify": "https://open.spotify.com/playlist/p1" }
        }"#;
        let p: Playlist = serde_json::from_str(json).unwrap();
        assert!(p.images.is_empty());
        assert_eq!(p.owner.name(), "u1");
        assert_eq!(p.tracks.total, 12);
    }

    #[test]
    fn page_skips_null_items() {
        let json = r#"{
            "playlists": {
                "items": [null, {"id": "p2", "name": "Run", "owner": {"id": "u", "display_name": "Una"}}],
                "total": 2
            }
        }"#;
        let r: SearchResponse = serde_json::from_str(json).unwrap();
        let page = r.playlists.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].owner.name(), "Una");
        assert_eq!(page.total, 2);
    }

    #[test]
    fn malformed_item_does_not_lose_page() {
        let json = r#"{
            "tracks": {
                "items": [
                    {"id": "t1", "name": "Numb", "album": {"id": "a", "name": "The Wall"}},
                    {"id": null, "name": "No Id", "album": null},
                    {"id": "t3", "album": {"id": "a", "name": "The Wall"}}
                ],
                "total": 3
            }
        }"#;
        let r: SearchResponse = serde_json::from_str(json).unwrap();
        let items = &r.tracks.as_ref().unwrap().items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Numb");
        assert_eq!(items[1].id, "");
        assert_eq!(items[1].name, "No Id");
        assert!(items[1].album.images.is_empty());
    }

    #[test]
    fn album_search_response() {
        let json = r#"{
            "albums": {
                "items": [{
                    "id": "a1",
                    "name": "The Wall",
                    "artists": [{"id": "x", "name": "Pink Floyd", "type": "artist", "uri": "spotify:artist:x"}],
                    "images": [
                        {"url": "https://i.example/640", "width": 640, "height": 640},
                        {"url": "https://i.example/300", "width": 300, "height": 300}
                    ],
                    "release_date": "1979-11-30",
                    "total_tracks": 26,
                    "type": "album",
                    "uri": "spotify:album:a1",
                    "external_urls": {"spotify": "https://open.spotify.com/album/a1"}
                }],
                "total": 1
            }
        }"#;
        let r: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(!r.is_empty());
        assert!(r.tracks.is_none());
        let album = &r.albums.as_ref().unwrap().items[0];
        assert_eq!(album.artists[0].name, "Pink Floyd");
        assert_eq!(album.images.len(), 2);
        assert_eq!(album.kind, "album");
    }

    #[test]
    fn duration_label_pads_seconds() {
        let json = r#"{"id":"t","name":"n","album":{"id":"a","name":"b"},"duration_ms":185000}"#;
        let t: Track = serde_json::from_str(json).unwrap();
        assert_eq!(t.duration_label(), "3:05");
    }

    #[test]
    fn empty_response() {
        assert!(SearchResponse::default().is_empty());
    }
}
