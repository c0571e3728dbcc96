// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use intra_tracker::config::Config;
use intra_tracker::routes::create_router;
use intra_tracker::services::ExportReport;
use intra_tracker::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tower::ServiceExt;

/// Upstream address that refuses connections.
#[allow(dead_code)]
pub const UNREACHABLE_UPSTREAM: &str = "http://127.0.0.1:1";

/// Bearer token for which the mock `me` lists a project that 404s.
#[allow(dead_code)]
pub const PARTIAL_TOKEN: &str = "partial";

/// Requests seen by the mock upstream.
#[derive(Default)]
pub struct UpstreamLog {
    /// (path, Authorization header) per authenticated GET
    pub gets: Mutex<Vec<(String, String)>>,
    /// Form bodies posted to `/oauth/token`
    pub token_requests: Mutex<Vec<HashMap<String, String>>>,
    /// When each `/v2/projects/{id}` request arrived
    pub project_times: Mutex<Vec<Instant>>,
}

/// In-process stand-in for the 42 intranet API.
pub struct MockUpstream {
    pub base_url: String,
    pub log: Arc<UpstreamLog>,
}

#[allow(dead_code)]
pub fn me_fixture() -> Value {
    json!({
        "id": 4242,
        "login": "norminet",
        "projects_users": [
            {"final_mark": null, "status": "finished", "project": {"id": 1, "name": "Rush 00", "slug": "rush-00"}},
            {"final_mark": 80, "status": "finished", "project": {"id": 2, "name": "ProjectName", "slug": "project-name"}}
        ]
    })
}

/// Raw `/v2/me/projects` body, keys deliberately not in alphabetical order.
#[allow(dead_code)]
pub const MY_PROJECTS_BODY: &str = r#"[{"project":{"name":"Rush 00","id":1},"id":1,"final_mark":null,"validated?":null},{"project":{"name":"ProjectName","id":2},"id":2,"final_mark":80,"validated?":true,"weight":1.0}]"#;

#[allow(dead_code)]
pub fn my_projects_fixture() -> Value {
    serde_json::from_str(MY_PROJECTS_BODY).unwrap()
}

#[allow(dead_code)]
pub fn project_fixture(id: u64) -> Option<Value> {
    match id {
        1 => Some(json!({"id": 1, "name": "Rush 00", "difficulty": 0})),
        2 => Some(json!({"id": 2, "name": "ProjectName", "difficulty": 5})),
        2485 => Some(json!({
            "id": 2485,
            "name": "Tokenizer",
            "slug": "tokenizer",
            "difficulty": 0,
            "exam": false
        })),
        _ => None,
    }
}

fn authorization(headers: &HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn record(log: &UpstreamLog, path: &str, headers: &HeaderMap) {
    log.gets
        .lock()
        .unwrap()
        .push((path.to_string(), authorization(headers)));
}

async fn me(State(log): State<Arc<UpstreamLog>>, headers: HeaderMap) -> Json<Value> {
    record(&log, "/v2/me", &headers);
    let mut body = me_fixture();
    if authorization(&headers) == format!("Bearer {}", PARTIAL_TOKEN) {
        body["projects_users"]
            .as_array_mut()
            .unwrap()
            .insert(0, json!({"final_mark": 100, "project": {"id": 999, "name": "Gone"}}));
    }
    Json(body)
}

async fn my_projects(State(log): State<Arc<UpstreamLog>>, headers: HeaderMap) -> Response {
    record(&log, "/v2/me/projects", &headers);
    ([(header::CONTENT_TYPE, "application/json")], MY_PROJECTS_BODY).into_response()
}

async fn project(
    State(log): State<Arc<UpstreamLog>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    record(&log, &format!("/v2/projects/{}", id), &headers);
    log.project_times.lock().unwrap().push(Instant::now());
    match project_fixture(id) {
        Some(body) => Json(body).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn token_info(State(log): State<Arc<UpstreamLog>>, headers: HeaderMap) -> Json<Value> {
    record(&log, "/oauth/token/info", &headers);
    Json(json!({
        "resource_owner_id": 4242,
        "scopes": ["public", "projects"],
        "expires_in_seconds": 7135,
        "application": {"uid": "test_client_id"},
        "created_at": 1700000000
    }))
}

async fn token(
    State(log): State<Arc<UpstreamLog>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let code = form.get("code").cloned().unwrap_or_default();
    log.token_requests.lock().unwrap().push(form);

    if code == "ABC" {
        Json(json!({
            "access_token": "X",
            "token_type": "bearer",
            "expires_in": 7200,
            "scope": "public projects",
            "created_at": 1700000000
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_grant"})),
        )
            .into_response()
    }
}

/// Start the mock upstream on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_upstream() -> MockUpstream {
    let log = Arc::new(UpstreamLog::default());
    let app = Router::new()
        .route("/v2/me", get(me))
        .route("/v2/me/projects", get(my_projects))
        .route("/v2/projects/{id}", get(project))
        .route("/oauth/token/info", get(token_info))
        .route("/oauth/token", post(token))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        base_url: format!("http://{}", addr),
        log,
    }
}

/// App under test, with its files in a temp dir.
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub reports: mpsc::UnboundedReceiver<ExportReport>,
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestApp {
    pub fn write_token_file(&self, contents: &str) {
        std::fs::write(&self.state.config.token_file, contents).unwrap();
    }

    pub fn write_token(&self, token: &str) {
        self.write_token_file(&json!({ "accessToken": token }).to_string());
    }

    pub fn token_file(&self) -> Option<String> {
        std::fs::read_to_string(&self.state.config.token_file).ok()
    }

    pub fn csv(&self) -> Option<String> {
        std::fs::read_to_string(&self.state.config.csv_file).ok()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Wait for the next background export to finish.
    pub async fn next_report(&mut self) -> ExportReport {
        tokio::time::timeout(Duration::from_secs(10), self.reports.recv())
            .await
            .expect("export did not finish in time")
            .expect("report channel closed")
    }
}

/// Create a test app pointed at `api_url`.
#[allow(dead_code)]
pub fn create_test_app(api_url: &str) -> TestApp {
    let dir = TempDir::new().unwrap();
    let config = Config {
        api_url: api_url.to_string(),
        token_file: dir.path().join("accessToken.json"),
        csv_file: dir.path().join("projects.csv"),
        export_interval: Duration::from_millis(10),
        ..Config::default()
    };

    let (tx, reports) = mpsc::unbounded_channel();
    let mut state = AppState::from_config(config);
    state.exporter = state.exporter.clone().with_reports(tx);
    let state = Arc::new(state);

    TestApp {
        router: create_router(state.clone()),
        state,
        reports,
        dir,
    }
}

#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
