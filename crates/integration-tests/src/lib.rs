//! Shared fixtures: a board wired exactly like the binary, backed by a JSON
//! document in a temp directory and a clock that ticks one second per reading.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use api_adapters::{router, AppState};
use auth_adapters::SharedSecretCheck;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use domains::models::Entry;
use domains::ports::{Clock, EntryRepository, MockClock};
use secrecy::SecretString;
use services::{EntryService, ModerationService};
use storage_adapters::JsonFileEntryRepository;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "board-admin";

pub fn ticking_clock() -> Arc<dyn Clock> {
    let start: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 3, 4, 13, 0, 0).unwrap();
    let ticks = AtomicI64::new(0);
    let mut clock = MockClock::new();
    clock
        .expect_now()
        .returning(move || start + Duration::seconds(ticks.fetch_add(1, Ordering::SeqCst)));
    Arc::new(clock)
}

pub struct TestBoard {
    _dir: TempDir,
    pub repo: Arc<JsonFileEntryRepository>,
    pub entries: Arc<EntryService>,
    pub moderation: Arc<ModerationService>,
    app: Router,
}

impl TestBoard {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let clock = ticking_clock();
        let repo = Arc::new(JsonFileEntryRepository::with_clock(
            dir.path().join("entries.json"),
            clock.clone(),
        ));
        let auth = SharedSecretCheck::new(&SecretString::from(ADMIN_PASSWORD.to_string())).unwrap();

        let entries = Arc::new(EntryService::new(repo.clone()));
        let moderation = Arc::new(ModerationService::with_clock(
            repo.clone(),
            Arc::new(auth),
            clock,
        ));
        let app = router(AppState::new(entries.clone(), moderation.clone()))
            .layer(MockConnectInfo(SocketAddr::from(([203, 0, 113, 7], 52_000))));

        Self {
            _dir: dir,
            repo,
            entries,
            moderation,
            app,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Parsed `GET /api/entries`.
    pub async fn listing(&self) -> Vec<serde_json::Value> {
        let (status, body) = self.get("/api/entries").await;
        assert_eq!(status, StatusCode::OK, "listing failed: {body}");
        serde_json::from_str(&body).unwrap()
    }

    /// Raw store contents, ids included.
    pub async fn stored(&self) -> Vec<Entry> {
        self.repo.load_all().await.unwrap()
    }

    pub async fn stored_id_of(&self, text: &str) -> String {
        self.stored()
            .await
            .into_iter()
            .find(|entry| entry.text == text)
            .map(|entry| entry.id.to_string())
            .unwrap_or_else(|| panic!("no stored entry with text {text:?}"))
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

impl Default for TestBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// `text` fields of a listing, in order.
pub fn texts(listing: &[serde_json::Value]) -> Vec<String> {
    listing
        .iter()
        .map(|entry| entry["text"].as_str().unwrap_or_default().to_string())
        .collect()
}
