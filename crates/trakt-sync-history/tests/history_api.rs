use mockito::{Matcher, Server};
use serde_json::json;
use trakt_sync_core::{RawParameters, TITLE_ERROR, TITLE_RECORDED, TITLE_UNCHANGED, deep_link};
use trakt_sync_history::{HistorySync, ReqwestTransport};

fn params(media_type: &str) -> RawParameters {
    RawParameters {
        client_id: Some("client-123".to_string()),
        access_token: Some("token-456".to_string()),
        media_type: Some(media_type.to_string()),
        external_id: Some("27205".to_string()),
    }
}

fn history_sync(base: String) -> HistorySync<ReqwestTransport> {
    HistorySync::new(ReqwestTransport::new().unwrap(), base)
}

#[tokio::test]
async fn posts_movie_with_provider_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/sync/history")
        .match_header("content-type", "application/json")
        .match_header("trakt-api-version", "2")
        .match_header("trakt-api-key", "client-123")
        .match_header("authorization", "Bearer token-456")
        .match_header("user-agent", "trakt-sync/0.1")
        .match_body(Matcher::Json(json!({ "movies": [{ "ids": { "tmdb": 27205 } }] })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"added":{"movies":1,"episodes":0},"not_found":{"movies":[]}}"#)
        .expect(1)
        .create_async()
        .await;

    let cards = history_sync(server.url()).execute(&params("movies")).await;

    mock.assert_async().await;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, TITLE_RECORDED);
    assert_eq!(cards[0].link, deep_link(27205));
}

#[tokio::test]
async fn posts_episode_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/sync/history")
        .match_body(Matcher::Json(json!({ "episodes": [{ "ids": { "tmdb": 27205 } }] })))
        .with_status(201)
        .with_body(r#"{"added":{"movies":0,"episodes":0}}"#)
        .create_async()
        .await;

    let cards = history_sync(server.url()).execute(&params("episode")).await;

    mock.assert_async().await;
    assert_eq!(cards[0].title, TITLE_UNCHANGED);
}

#[tokio::test]
async fn html_body_is_reported_as_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/sync/history")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let cards = history_sync(server.url()).execute(&params("movie")).await;

    assert_eq!(cards[0].title, TITLE_ERROR);
    assert!(cards[0].description.contains("malformed response"));
    assert!(cards[0].link.is_empty());
}

#[tokio::test]
async fn rejected_status_is_reported_as_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/sync/history")
        .with_status(401)
        .with_body("")
        .create_async()
        .await;

    let cards = history_sync(server.url()).execute(&params("movie")).await;

    assert_eq!(cards[0].title, TITLE_ERROR);
    assert!(cards[0].description.contains("401"));
}

#[tokio::test]
async fn unreachable_provider_is_reported_as_error() {
    let cards = history_sync("http://127.0.0.1:1".to_string())
        .execute(&params("movie"))
        .await;

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, TITLE_ERROR);
    assert!(cards[0].description.contains("network error"));
}

#[tokio::test]
async fn repeated_sync_reports_no_change() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("POST", "/sync/history")
        .with_status(201)
        .with_body(r#"{"added":{"movies":1}}"#)
        .expect(1)
        .create_async()
        .await;

    let sync = history_sync(server.url());
    let cards = sync.execute(&params("movie")).await;
    assert_eq!(cards[0].title, TITLE_RECORDED);
    first.assert_async().await;
    first.remove_async().await;

    let _second = server
        .mock("POST", "/sync/history")
        .with_status(201)
        .with_body(r#"{"added":{"movies":0}}"#)
        .create_async()
        .await;

    let cards = sync.execute(&params("movie")).await;
    assert_eq!(cards[0].title, TITLE_UNCHANGED);
}
