//! Music catalog collaborator: entity types, search filters, token exchange
//! and the search client.

mod client;
mod error;
mod query;
mod token;
mod types;

pub use client::{CatalogClient, CatalogSearch};
pub use error::CatalogError;
pub use query::{
    EntityType, Market, QueryError, SearchQuery, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT,
};
pub use token::{Credentials, TokenCache};
pub use types::{
    Album, Artist, ArtistRef, ExternalUrls, Followers, Page, Playlist, PlaylistOwner,
    SearchResponse, Track, TrackCount,
};
