//! Shared helpers for driving the router in integration tests.
//!
//! Each test file is its own crate, so not every helper is used everywhere.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use std::path::PathBuf;
use tempfile::TempDir;
use todo_web::{config::Config, routes, AppState};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub config: Config,
    // Keeps the data files alive for the duration of the test
    pub dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// The `name=value` part of the session cookie, ready to send back.
    pub fn session_cookie(&self) -> Option<String> {
        let value = self.headers.get(header::SET_COOKIE)?.to_str().ok()?;
        value.split(';').next().map(str::to_string)
    }
}

pub fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.storage.users_file = dir.path().join("users.json");
    config.storage.tasks_file = dir.path().join("tasks.json");
    config.templates.dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"));
    config.server.static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string();
    config
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = test_config(&dir);
        Self::with_config(dir, config)
    }

    pub fn with_config(dir: TempDir, config: Config) -> Self {
        let router = routes::build_router(AppState::from_config(config.clone()));
        Self { router, config, dir }
    }

    /// Simulates a process restart over the same data files.
    pub fn restart(self) -> Self {
        let TestApp { config, dir, .. } = self;
        Self::with_config(dir, config)
    }

    pub fn data_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).unwrap_or_default()
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(get(uri, None)).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        self.send(post_form(uri, body, None)).await
    }

    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.post_form("/register", &format!("username={}&password={}", username, password))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &format!("username={}&password={}", username, password))
            .await
    }

    pub async fn add_task(&self, username: &str, name: &str, date: &str) -> TestResponse {
        let body = format!(
            "task_name={}&task_date={}",
            urlencoding::encode(name),
            urlencoding::encode(date)
        );
        self.post_form(&format!("/add/{}", username), &body).await
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
