use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use reqwest::Client;
use serde_json::Value;

use simsuite_site::config::Config;
use simsuite_site::state::SharedState;
use simsuite_site::submission::HttpTransport;

#[derive(Clone)]
struct CannedResponse {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Default)]
struct MockState {
    /// path -> canned response
    responses: Mutex<HashMap<String, CannedResponse>>,
    /// (path, parsed body) in arrival order
    requests: Mutex<Vec<(String, Value)>>,
}

/// A stand-in for the SimSuite AI backend bound to a random local port.
pub struct MockBackend {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `path` with `status` and a raw body.
    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.respond_after(path, status, body, Duration::ZERO);
    }

    pub fn respond_json(&self, path: &str, status: u16, body: &Value) {
        self.respond(path, status, &body.to_string());
    }

    /// Like `respond`, but hold the answer back for `delay`.
    pub fn respond_after(&self, path: &str, status: u16, body: &str, delay: Duration) {
        self.state.responses.lock().unwrap().insert(
            path.to_string(),
            CannedResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.to_string(),
                delay,
            },
        );
    }

    /// Bodies received on `path`, oldest first.
    pub fn requests(&self, path: &str) -> Vec<Value> {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn transport(&self) -> Arc<HttpTransport> {
        Arc::new(HttpTransport::new(self.url()).unwrap())
    }
}

async fn canned(State(mock): State<Arc<MockState>>, uri: Uri, body: Bytes) -> Response {
    let path = uri.path().to_string();
    let parsed = serde_json::from_slice(&body).unwrap_or(Value::Null);
    mock.requests.lock().unwrap().push((path.clone(), parsed));

    let canned = mock.responses.lock().unwrap().get(&path).cloned();
    match canned {
        Some(canned) => {
            if !canned.delay.is_zero() {
                tokio::time::sleep(canned.delay).await;
            }
            (
                canned.status,
                [("content-type", "application/json")],
                canned.body,
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "{\"detail\":\"Not Found\"}").into_response(),
    }
}

#[allow(dead_code)]
pub async fn spawn_mock_backend() -> MockBackend {
    let state = Arc::new(MockState::default());
    let app = Router::new().fallback(canned).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend failed");
    });

    MockBackend { addr, state }
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A running site instance.
#[allow(dead_code)]
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
}

#[allow(dead_code)]
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Load the demo page and return the session cookie it hands out.
    pub async fn open_session(&self) -> String {
        let resp = self
            .client
            .get(self.url("/demo"))
            .send()
            .await
            .expect("demo page request failed");
        assert_eq!(resp.status(), reqwest::StatusCode::OK, "demo page non-200");
        resp.headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("simsuite_demo="))
            .and_then(|v| v.split(';').next())
            .expect("demo page did not set a session cookie")
            .to_string()
    }

    /// Submit a demo form within `session`, return (body, status).
    pub async fn submit_form(
        &self,
        session: &str,
        use_case: &str,
        data: &[(&str, &str)],
    ) -> (String, reqwest::StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/demo/{use_case}")))
            .header("cookie", session)
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        (body, status)
    }

    pub async fn get_json(&self, path: &str, session: Option<&str>) -> (Value, reqwest::StatusCode) {
        let mut req = self.client.get(self.url(path));
        if let Some(cookie) = session {
            req = req.header("cookie", cookie);
        }
        let resp = req.send().await.expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        (body, status)
    }
}

#[allow(dead_code)]
pub fn test_config(ai_base_url: &str) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        ai_base_url: ai_base_url.to_string(),
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
        max_body_size: 65_536,
        session_ttl: Duration::from_secs(3600),
        log_level: "warn".to_string(),
    }
}

/// Spawn the site pointed at `ai_base_url`.
#[allow(dead_code)]
pub async fn spawn_app(ai_base_url: &str) -> TestApp {
    let (app, state) =
        simsuite_site::build_app(test_config(ai_base_url)).expect("Failed to build app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        state,
    }
}
