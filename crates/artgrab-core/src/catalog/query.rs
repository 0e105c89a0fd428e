//! Search filters and request URL construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_LIMIT: u32 = 20;
/// Provider-side bounds for `limit`.
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 50;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("unknown search type {0:?} (expected album, artist, track or playlist)")]
    UnknownEntityType(String),
    #[error("invalid limit {0:?}")]
    InvalidLimit(String),
    #[error("invalid market {0:?} (expected a two-letter country code)")]
    InvalidMarket(String),
}

/// Entity type to search for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    #[default]
    Album,
    Artist,
    Track,
    Playlist,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Album => "album",
            EntityType::Artist => "artist",
            EntityType::Track => "track",
            EntityType::Playlist => "playlist",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "album" => Ok(EntityType::Album),
            "artist" => Ok(EntityType::Artist),
            "track" => Ok(EntityType::Track),
            "playlist" => Ok(EntityType::Playlist),
            _ => Err(QueryError::UnknownEntityType(s.to_string())),
        }
    }
}

/// ISO 3166-1 alpha-2 market code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Market(String);

impl Market {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Market {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Market(code.to_ascii_uppercase()))
        } else {
            Err(QueryError::InvalidMarket(s.to_string()))
        }
    }
}

/// A validated catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub entity_type: EntityType,
    /// Clamped to `MIN_LIMIT..=MAX_LIMIT`.
    pub limit: u32,
    pub market: Option<Market>,
}

impl SearchQuery {
    pub fn new(text: &str, entity_type: EntityType) -> Result<Self, QueryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        Ok(Self {
            text: text.to_string(),
            entity_type,
            limit: DEFAULT_LIMIT,
            market: None,
        })
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
        self
    }

    pub fn with_market(mut self, market: Option<Market>) -> Self {
        self.market = market;
        self
    }

    /// Builds a query from raw, optional request parameters (`q`, `type`, `limit`, `market`).
    /// Blank optional parameters are treated as absent.
    pub fn from_params(
        text: Option<&str>,
        entity_type: Option<&str>,
        limit: Option<&str>,
        market: Option<&str>,
    ) -> Result<Self, QueryError> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        let entity_type = match present(entity_type) {
            Some(t) => t.parse()?,
            None => EntityType::default(),
        };
        let limit = match present(limit) {
            Some(l) => l
                .parse::<u32>()
                .map_err(|_| QueryError::InvalidLimit(l.to_string()))?,
            None => DEFAULT_LIMIT,
        };
        let market = present(market).map(str::parse::<Market>).transpose()?;

        Ok(Self::new(text.unwrap_or(""), entity_type)?
            .with_limit(limit)
            .with_market(market))
    }

    /// `<api_base>/search?q=..&type=..&limit=..[&market=..]`.
    pub fn search_url(&self, api_base: &str) -> Result<Url, url::ParseError> {
        let base = format!("{}/search", api_base.trim_end_matches('/'));
        let limit = self.limit.to_string();
        let mut params = vec![
            ("q", self.text.as_str()),
            ("type", self.entity_type.as_str()),
            ("limit", limit.as_str()),
        ];
        if let Some(m) = &self.market {
            params.push(("market", m.as_str()));
        }
        Url::parse_with_params(&base, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let q = SearchQuery::from_params(Some("  pink floyd "), None, None, None).unwrap();
        assert_eq!(q.text, "pink floyd");
        assert_eq!(q.entity_type, EntityType::Album);
        assert_eq!(q.limit, DEFAULT_LIMIT);
        assert!(q.market.is_none());
    }

    #[test]
    fn empty_query_rejected() {
        assert_eq!(
            SearchQuery::from_params(None, None, None, None),
            Err(QueryError::EmptyQuery)
        );
        assert_eq!(
            SearchQuery::from_params(Some("   "), Some("track"), None, None),
            Err(QueryError::EmptyQuery)
        );
    }

    #[test]
    fn blank_optional_params_are_absent() {
        let q = SearchQuery::from_params(Some("x"), Some("  "), Some(""), Some(" ")).unwrap();
        assert_eq!(q.entity_type, EntityType::Album);
        assert_eq!(q.limit, DEFAULT_LIMIT);
        assert!(q.market.is_none());
        let q = SearchQuery::from_params(Some("x"), Some(" artist "), Some(" 7 "), None).unwrap();
        assert_eq!(q.entity_type, EntityType::Artist);
        assert_eq!(q.limit, 7);
    }

    #[test]
    fn entity_type_parsing() {
        assert_eq!("Playlist".parse::<EntityType>(), Ok(EntityType::Playlist));
        assert_eq!(
            "podcast".parse::<EntityType>(),
            Err(QueryError::UnknownEntityType("podcast".into()))
        );
    }

    #[test]
    fn limit_is_clamped_and_validated() {
        let q = SearchQuery::from_params(Some("x"), None, Some("500"), None).unwrap();
        assert_eq!(q.limit, MAX_LIMIT);
        let q = SearchQuery::from_params(Some("x"), None, Some("0"), None).unwrap();
        assert_eq!(q.limit, MIN_LIMIT);
        assert!(matches!(
            SearchQuery::from_params(Some("x"), None, Some("ten"), None),
            Err(QueryError::InvalidLimit(_))
        ));
    }

    #[test]
    fn market_normalized() {
        let q = SearchQuery::from_params(Some("x"), None, None, Some("gb")).unwrap();
        assert_eq!(q.market.as_ref().map(Market::as_str), Some("GB"));
        assert!(matches!(
            SearchQuery::from_params(Some("x"), None, None, Some("GBR")),
            Err(QueryError::InvalidMarket(_))
        ));
        let q = SearchQuery::from_params(Some("x"), None, None, Some("")).unwrap();
        assert!(q.market.is_none());
    }

    #[test]
    fn search_url_encodes_params() {
        let q = SearchQuery::new("AC/DC & friends", EntityType::Track)
            .unwrap()
            .with_limit(5)
            .with_market(Some("us".parse().unwrap()));
        let url = q.search_url("https://api.example.com/v1/").unwrap();
        assert_eq!(url.path(), "/v1/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".into(), "AC/DC & friends".into()),
                ("type".into(), "track".into()),
                ("limit".into(), "5".into()),
                ("market".into(), "US".into()),
            ]
        );
    }
}
