//! Previewable artwork: one shape every catalog entity converts into.

use crate::catalog::{Album, Artist, Playlist, Track};
use crate::proxy::DownloadRequest;

use super::filename::ArtworkOwner;
use super::variant::{select_variant, ImageVariant, SizeClass, VariantRequest};

/// Catalog entity that has artwork worth previewing and saving.
#[derive(Debug, Clone, Copy)]
pub enum Previewable<'a> {
    Album(&'a Album),
    Track(&'a Track),
    Playlist(&'a Playlist),
    Artist(&'a Artist),
}

impl<'a> From<&'a Album> for Previewable<'a> {
    fn from(a: &'a Album) -> Self {
        Previewable::Album(a)
    }
}

impl<'a> From<&'a Track> for Previewable<'a> {
    fn from(t: &'a Track) -> Self {
        Previewable::Track(t)
    }
}

impl<'a> From<&'a Playlist> for Previewable<'a> {
    fn from(p: &'a Playlist) -> Self {
        Previewable::Playlist(p)
    }
}

impl<'a> From<&'a Artist> for Previewable<'a> {
    fn from(a: &'a Artist) -> Self {
        Previewable::Artist(a)
    }
}

/// Common preview view of any [`Previewable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewArtwork {
    pub title: String,
    /// Artists for albums/tracks, the owner for playlists, the artist itself for artists.
    pub owners: Vec<String>,
    pub images: Vec<ImageVariant>,
    /// Link to the entity on the provider's site.
    pub origin_url: Option<String>,
    naming: Naming,
}

/// How a download of this artwork is named.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Naming {
    /// Qualifier is the requested size label.
    BySize { primary: String, title: String },
    /// Qualifier is fixed regardless of size.
    Fixed { primary: String, title: String, qualifier: String },
}

/// A download affordance for one existing variant slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOption {
    pub size: SizeClass,
    /// e.g. `"640 x 640"`.
    pub dimensions: String,
    pub request: DownloadRequest,
}

impl<'a> Previewable<'a> {
    pub fn to_preview(self) -> PreviewArtwork {
        match self {
            Previewable::Album(album) => {
                let primary = first_artist(&album.artists);
                PreviewArtwork {
                    title: album.name.clone(),
                    owners: album.artists.iter().map(|a| a.name.clone()).collect(),
                    images: album.images.clone(),
                    origin_url: album.external_urls.spotify.clone(),
                    naming: Naming::BySize {
                        primary,
                        title: album.name.clone(),
                    },
                }
            }
            // Tracks show their album's artwork; the album name qualifies the file.
            Previewable::Track(track) => PreviewArtwork {
                title: track.name.clone(),
                owners: track.artists.iter().map(|a| a.name.clone()).collect(),
                images: track.album.images.clone(),
                origin_url: track.external_urls.spotify.clone(),
                naming: Naming::Fixed {
                    primary: first_artist(&track.artists),
                    title: track.name.clone(),
                    qualifier: track.album.name.clone(),
                },
            },
            Previewable::Playlist(playlist) => {
                let owner = playlist.owner.name().to_string();
                PreviewArtwork {
                    title: playlist.name.clone(),
                    owners: vec![owner.clone()],
                    images: playlist.images.clone(),
                    origin_url: playlist.external_urls.spotify.clone(),
                    naming: Naming::Fixed {
                        primary: owner,
                        title: playlist.name.clone(),
                        qualifier: "Playlist".to_string(),
                    },
                }
            }
            Previewable::Artist(artist) => PreviewArtwork {
                title: artist.name.clone(),
                owners: vec![artist.name.clone()],
                images: artist.images.clone(),
                origin_url: artist.external_urls.spotify.clone(),
                naming: Naming::BySize {
                    primary: artist.name.clone(),
                    title: "Portrait".to_string(),
                },
            },
        }
    }
}

fn first_artist(artists: &[crate::catalog::ArtistRef]) -> String {
    artists.first().map(|a| a.name.clone()).unwrap_or_default()
}

impl PreviewArtwork {
    /// Owners joined for display (`"A, B"`).
    pub fn owners_label(&self) -> String {
        self.owners.join(", ")
    }

    /// Naming identity for a download of the given size.
    pub fn owner_for(&self, size: SizeClass) -> ArtworkOwner {
        match &self.naming {
            Naming::BySize { primary, title } => {
                ArtworkOwner::new(primary.clone(), title.clone()).with_qualifier(size.as_str())
            }
            Naming::Fixed {
                primary,
                title,
                qualifier,
            } => ArtworkOwner::new(primary.clone(), title.clone()).with_qualifier(qualifier.clone()),
        }
    }

    pub fn largest_url(&self) -> Option<&str> {
        select_variant(&self.images, VariantRequest::Largest)
    }

    /// Request for the widest variant, named as the large size; `None` without images.
    pub fn largest_download(&self) -> Option<DownloadRequest> {
        let url = self.largest_url()?;
        Some(DownloadRequest::new(
            url,
            self.owner_for(SizeClass::Large).file_name(),
        ))
    }

    /// One option per size class whose slot exists; missing slots are not offered.
    pub fn download_options(&self) -> Vec<DownloadOption> {
        SizeClass::ALL
            .iter()
            .filter_map(|&size| {
                let url = select_variant(&self.images, VariantRequest::Slot(size))?;
                let dimensions = self.images[size.slot()].dimensions_label();
                Some(DownloadOption {
                    size,
                    dimensions,
                    request: DownloadRequest::new(url, self.owner_for(size).file_name()),
                })
            })
            .collect()
    }
}
