//! Integration test: catalog client, token exchange and cache against a local provider.

mod common;

use std::sync::Arc;
use std::time::Duration;

use artgrab_core::catalog::{CatalogClient, CatalogError, EntityType, SearchQuery};
use artgrab_core::config::CatalogConfig;
use artgrab_core::proxy::build_client;
use common::origin_server::{OriginServer, Route};

const TOKEN_BODY: &str = r#"{"access_token":"tok-1","token_type":"Bearer","expires_in":3600}"#;

const ALBUMS_BODY: &str = r#"{
    "albums": {
        "items": [{
            "id": "a1",
            "name": "The Wall",
            "artists": [{"id": "x", "name": "Pink Floyd", "type": "artist", "uri": ""}],
            "images": [{"url": "https://i.example/640", "width": 640, "height": 640}],
            "type": "album"
        }],
        "total": 1
    }
}"#;

fn provider(token_status: u16, search_status: u16) -> OriginServer {
    OriginServer::start(vec![
        Route::post("/api/token", token_status, "application/json", TOKEN_BODY),
        Route::get("/v1/search", search_status, "application/json", ALBUMS_BODY),
    ])
}

fn catalog_config(origin: &OriginServer, with_credentials: bool) -> CatalogConfig {
    CatalogConfig {
        client_id: with_credentials.then(|| "id".to_string()),
        client_secret: with_credentials.then(|| "secret".to_string()),
        token_url: origin.url("/api/token"),
        api_base: origin.url("/v1"),
    }
}

fn client(origin: &OriginServer, with_credentials: bool) -> CatalogClient {
    let http = build_client(Duration::from_secs(5)).unwrap();
    CatalogClient::new(http, &catalog_config(origin, with_credentials))
}

fn query() -> SearchQuery {
    SearchQuery::new("the wall", EntityType::Album).unwrap()
}

#[tokio::test]
async fn missing_credentials_is_configuration_error_without_network() {
    let origin = provider(200, 200);
    let catalog = client(&origin, false);
    assert!(!catalog.has_credentials());

    let err = catalog.search(&query()).await.unwrap_err();
    assert!(matches!(err, CatalogError::MissingCredentials));
    assert!(err.is_configuration());
    assert_eq!(origin.total_hits(), 0);
}

#[tokio::test]
async fn search_returns_typed_results_with_auth_headers() {
    let origin = provider(200, 200);
    let catalog = client(&origin, true);

    let results = catalog.search(&query()).await.expect("search");
    let albums = results.albums.expect("albums page");
    assert_eq!(albums.items[0].name, "The Wall");

    let requests = origin.requests();
    let token = requests.iter().find(|r| r.path == "/api/token").unwrap();
    // base64("id:secret")
    assert_eq!(token.headers.get("authorization").unwrap(), "Basic aWQ6c2VjcmV0");
    let search = requests.iter().find(|r| r.path == "/v1/search").unwrap();
    assert_eq!(search.headers.get("authorization").unwrap(), "Bearer tok-1");
    let q = search.query.as_deref().unwrap();
    assert!(q.contains("type=album"));
    assert!(q.contains("limit=20"));
}

const PAGED_BODY: &str = r#"{
    "albums": {
        "href": "https://api.example/v1/search?offset=0&limit=1",
        "limit": 1,
        "next": "https://api.example/v1/search?offset=1&limit=1",
        "offset": 0,
        "previous": null,
        "total": 40,
        "items": [{"id": "a1", "name": "The Wall", "album_type": "album", "available_markets": ["GB"]}]
    }
}"#;

#[tokio::test]
async fn raw_search_keeps_provider_fields() {
    let origin = OriginServer::start(vec![
        Route::post("/api/token", 200, "application/json", TOKEN_BODY),
        Route::get("/v1/search", 200, "application/json", PAGED_BODY),
    ]);
    let catalog = client(&origin, true);

    let raw = catalog.search_raw(&query()).await.expect("raw search");
    let expected: serde_json::Value = serde_json::from_str(PAGED_BODY).unwrap();
    assert_eq!(raw, expected);
    assert_eq!(raw["albums"]["next"], "https://api.example/v1/search?offset=1&limit=1");
    assert_eq!(raw["albums"]["items"][0]["album_type"], "album");
}

#[tokio::test]
async fn token_is_reused_across_searches() {
    let origin = provider(200, 200);
    let catalog = client(&origin, true);

    catalog.search(&query()).await.unwrap();
    catalog.search(&query()).await.unwrap();

    assert_eq!(origin.hits("/api/token"), 1);
    assert_eq!(origin.hits("/v1/search"), 2);
}

#[tokio::test]
async fn concurrent_searches_share_one_token_exchange() {
    let origin = provider(200, 200);
    let catalog = Arc::new(client(&origin, true));

    let mut handles = Vec::new();
    for _ in 0..5 {
        let catalog = Arc::clone(&catalog);
        handles.push(tokio::spawn(async move { catalog.search(&query()).await }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    assert_eq!(origin.hits("/api/token"), 1);
    assert_eq!(origin.hits("/v1/search"), 5);
}

#[tokio::test]
async fn rejected_token_is_reported() {
    let origin = provider(401, 200);
    let catalog = client(&origin, true);

    let err = catalog.search(&query()).await.unwrap_err();
    assert!(matches!(err, CatalogError::TokenRejected(s) if s.as_u16() == 401));
    assert!(!err.is_configuration());
    assert_eq!(origin.hits("/v1/search"), 0);
}

#[tokio::test]
async fn search_failure_is_reported() {
    let origin = provider(200, 502);
    let catalog = client(&origin, true);

    let err = catalog.search(&query()).await.unwrap_err();
    assert!(matches!(err, CatalogError::SearchRejected(s) if s.as_u16() == 502));
}

#[tokio::test]
async fn unauthorized_search_drops_cached_token() {
    let origin = provider(200, 401);
    let catalog = client(&origin, true);

    assert!(catalog.search(&query()).await.is_err());
    assert!(catalog.search(&query()).await.is_err());

    assert_eq!(origin.hits("/api/token"), 2);
}
