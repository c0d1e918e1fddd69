#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use cardcast_admin::{AdminApp, AppConfig};
use http_body_util::BodyExt;
use httpmock::MockServer;
use tempfile::TempDir;
use tower::ServiceExt;

/// An admin app pointed at a mock CardCast server with a throwaway cache dir.
pub struct TestApp {
    pub app: AdminApp,
    pub cache: TempDir,
}

impl TestApp {
    pub fn cache_file(&self, code: &str) -> std::path::PathBuf {
        self.cache.path().join(format!("{}.json", code))
    }
}

pub fn test_config(host: &str, port: u16, cache: &TempDir, featured: &[&str]) -> AppConfig {
    let featured: Vec<String> = featured.iter().map(|c| format!("\"{}\"", c)).collect();
    let toml_content = format!(
        r#"
[cardcast]
scheme = "http"
host = "{host}"
port = {port}
deck_info = "/v1/decks/{{deck}}"
deck_cards = "/v1/decks/{{deck}}/cards"

[files]
cache = '{cache}'

[decks]
featured = [{featured}]
"#,
        host = host,
        port = port,
        cache = cache.path().display(),
        featured = featured.join(", "),
    );
    AppConfig::from_toml_str(&toml_content).unwrap()
}

pub fn test_app(server: &MockServer, featured: &[&str]) -> TestApp {
    test_app_at(&server.host(), server.port(), featured)
}

pub fn test_app_at(host: &str, port: u16, featured: &[&str]) -> TestApp {
    let cache = TempDir::new().unwrap();
    let config = test_config(host, port, &cache, featured);
    let app = AdminApp::from_config(&config).unwrap();
    TestApp { app, cache }
}

/// A local port nothing is listening on.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &AdminApp, request: Request<Body>) -> Response<Body> {
    app.router().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
