mod common;

use axum::http::StatusCode;
use cardcast_admin::core::DeckRegistry;
use cardcast_admin::domain::model::{DeckCode, CODE_LENGTH};
use common::{body_json, closed_port, form_post, get, json_post, send, test_app, test_app_at};
use httpmock::prelude::*;
use serde_json::json;

const PROBE: &str = "/ajax/admin/cardcast/probe";
const IMPORT: &str = "/ajax/admin/cardcast/import";
const LOAD: &str = "/ajax/admin/cardcast/load";
const UNLOAD: &str = "/ajax/admin/cardcast/unload";

fn code(raw: &str) -> DeckCode {
    DeckCode::parse(Some(raw), CODE_LENGTH).unwrap()
}

#[tokio::test]
async fn test_probe_found_deck() {
    let server = MockServer::start_async().await;
    let info_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/decks/ABC12");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"name": "Test Deck"}));
        })
        .await;

    let test = test_app(&server, &[]);
    let response = send(&test.app, json_post(PROBE, json!({"code": "ABC12"}))).await;

    info_mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"response": {"name": "Test Deck"}})
    );
}

#[tokio::test]
async fn test_probe_missing_deck_is_soft_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/decks/NOPE1");
            then.status(404);
        })
        .await;

    let test = test_app(&server, &[]);
    let response = send(&test.app, form_post(PROBE, "code=NOPE1")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"response": {"id": "not_found", "message": "Deck not found"}})
    );
}

#[tokio::test]
async fn test_bad_codes_are_rejected_without_remote_calls() {
    let server = MockServer::start_async().await;
    let any_mock = server
        .mock_async(|when, then| {
            when.path_contains("/v1/decks");
            then.status(200).body("{}");
        })
        .await;

    let test = test_app(&server, &[]);

    for uri in [PROBE, IMPORT, LOAD, UNLOAD] {
        for body in [json!({}), json!({"code": ""}), json!({"code": "ABCD"}), json!({"code": "ABCDEF"})] {
            let response = send(&test.app, json_post(uri, body.clone())).await;
            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "{} with {}",
                uri,
                body
            );
        }
    }

    assert_eq!(any_mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_unparseable_body_is_bad_request() {
    let server = MockServer::start_async().await;
    let test = test_app(&server, &[]);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri(PROBE)
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"code\":"))
        .unwrap();

    assert_eq!(send(&test.app, request).await.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_import_writes_cache_and_loads_deck() {
    let server = MockServer::start_async().await;
    let info_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/decks/ABC12");
            then.status(200).json_body(json!({
                "name": "Test Deck",
                "code": "ABC12",
                "description": "Imported in a test",
                "author": {"username": "operator"}
            }));
        })
        .await;
    let cards_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/decks/ABC12/cards");
            then.status(200).json_body(json!({
                "calls": [{"id": "c1", "text": ["Why ", "?"]}],
                "responses": [{"id": "r1", "text": ["Because"]}, {"id": "r2", "text": ["No"]}]
            }));
        })
        .await;

    let test = test_app(&server, &[]);
    let response = send(&test.app, json_post(IMPORT, json!({"code": "ABC12"}))).await;

    info_mock.assert_async().await;
    cards_mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(test.cache_file("ABC12")).unwrap()).unwrap();
    assert_eq!(written["name"], "Test Deck");
    assert_eq!(written["description"], "Imported in a test");
    assert_eq!(written["black_cards"].as_array().unwrap().len(), 1);
    assert_eq!(written["white_cards"].as_array().unwrap().len(), 2);
    assert!(written["cache_updated_at"].as_str().unwrap().ends_with('Z'));

    let deck = test.app.registry.find(&code("ABC12")).await.unwrap();
    assert_eq!(deck.name, "Test Deck");
    assert_eq!(deck.author.as_deref(), Some("operator"));

    let loaded = body_json(send(&test.app, get("/ajax/admin/cardcast/decks/loaded")).await).await;
    assert_eq!(loaded[0]["code"], "ABC12");
    assert_eq!(loaded[0]["white_card_count"], 2);
}

#[tokio::test]
async fn test_import_unknown_deck_is_soft_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/decks/NOPE1");
            then.status(404);
        })
        .await;
    let cards_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/decks/NOPE1/cards");
            then.status(200).body("{}");
        })
        .await;

    let test = test_app(&server, &[]);
    let response = send(&test.app, json_post(IMPORT, json!({"code": "NOPE1"}))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["response"]["id"], "not_found");
    assert_eq!(cards_mock.hits_async().await, 0);
    assert!(!test.cache_file("NOPE1").exists());
}

#[tokio::test]
async fn test_import_malformed_cards_writes_nothing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/decks/ABC12");
            then.status(200).json_body(json!({"name": "Test Deck"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/decks/ABC12/cards");
            then.status(200).body("{\"calls\": [");
        })
        .await;

    let test = test_app(&server, &[]);
    let response = send(&test.app, json_post(IMPORT, json!({"code": "ABC12"}))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!test.cache_file("ABC12").exists());
    assert!(test.app.registry.find(&code("ABC12")).await.is_none());
}

#[tokio::test]
async fn test_import_cards_failure_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/decks/ABC12");
            then.status(200).json_body(json!({"name": "Test Deck"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/decks/ABC12/cards");
            then.status(500);
        })
        .await;

    let test = test_app(&server, &[]);
    let response = send(&test.app, json_post(IMPORT, json!({"code": "ABC12"}))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!test.cache_file("ABC12").exists());
}

#[tokio::test]
async fn test_unreachable_service_is_server_error() {
    let test = test_app_at("127.0.0.1", closed_port(), &[]);

    for uri in [PROBE, IMPORT] {
        let response = send(&test.app, json_post(uri, json!({"code": "ABC12"}))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
    }
    assert!(!test.cache_file("ABC12").exists());
}

#[tokio::test]
async fn test_load_outside_cache_dir_is_server_error() {
    let server = MockServer::start_async().await;
    let test = test_app(&server, &[]);
    let outside = test.cache.path().join("../ab.json");
    std::fs::write(&outside, json!({"name": "Outside"}).to_string()).unwrap();

    let response = send(&test.app, json_post(LOAD, json!({"code": "../ab"}))).await;
    std::fs::remove_file(&outside).unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let loaded = body_json(send(&test.app, get("/ajax/admin/cardcast/decks/loaded")).await).await;
    assert_eq!(loaded, json!([]));
}

#[tokio::test]
async fn test_load_unload_round() {
    let server = MockServer::start_async().await;
    let test = test_app(&server, &[]);
    std::fs::write(
        test.cache_file("ABC12"),
        json!({"name": "On Disk", "black_cards": [], "white_cards": []}).to_string(),
    )
    .unwrap();

    // 尚未載入
    assert_eq!(
        send(&test.app, json_post(UNLOAD, json!({"code": "ABC12"}))).await.status(),
        StatusCode::NOT_FOUND
    );

    assert_eq!(
        send(&test.app, form_post(LOAD, "code=ABC12")).await.status(),
        StatusCode::OK
    );
    assert!(test.app.registry.find(&code("ABC12")).await.is_some());

    assert_eq!(
        send(&test.app, form_post(UNLOAD, "code=ABC12")).await.status(),
        StatusCode::OK
    );
    assert!(test.app.registry.find(&code("ABC12")).await.is_none());
}

#[tokio::test]
async fn test_load_missing_cache_file_is_server_error() {
    let server = MockServer::start_async().await;
    let test = test_app(&server, &[]);

    let response = send(&test.app, json_post(LOAD, json!({"code": "MISS1"}))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_deck_listings() {
    let server = MockServer::start_async().await;
    let test = test_app(&server, &["FEAT1", "ABC12"]);
    for (raw, name) in [("ABC12", "Alpha"), ("DEF34", "Beta")] {
        std::fs::write(test.cache_file(raw), json!({"name": name}).to_string()).unwrap();
    }
    test.app.registry.load(&code("ABC12")).await.unwrap();

    let cached = body_json(send(&test.app, get("/ajax/admin/cardcast/decks/cached")).await).await;
    assert_eq!(
        cached,
        json!([
            {
                "code": "ABC12",
                "name": "Alpha",
                "description": "",
                "author": null,
                "black_card_count": 0,
                "white_card_count": 0,
                "cache_updated_at": null,
                "loaded": true
            },
            {"code": "DEF34", "loaded": false}
        ])
    );

    let featured =
        body_json(send(&test.app, get("/ajax/admin/cardcast/decks/featured")).await).await;
    assert_eq!(featured.as_array().unwrap().len(), 1);
    assert_eq!(featured[0]["name"], "Alpha");

    let loaded = body_json(send(&test.app, get("/ajax/admin/cardcast/decks/loaded")).await).await;
    assert_eq!(loaded.as_array().unwrap().len(), 1);

    let unloaded =
        body_json(send(&test.app, get("/ajax/admin/cardcast/decks/unloaded")).await).await;
    assert_eq!(unloaded, json!([{"code": "DEF34"}, {"code": "FEAT1"}]));
}
