#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Notify;

use clarify_client::api::ApiClient;
use clarify_client::dialog::{DialogChoice, DialogController, ScriptedPrompter};
use clarify_client::pages::PageContext;
use clarify_client::session::{
    MemorySessionStore, RecordingNavigator, SessionManager, SessionStore, ACTIVE_GROUP_KEY,
    TOKEN_KEY,
};

/// A request as seen by the mock backend
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

type Handler = Arc<dyn Fn(&Recorded) -> (u16, Value) + Send + Sync>;

#[derive(Default)]
struct Inner {
    routes: Mutex<HashMap<(String, String), Handler>>,
    gates: Mutex<HashMap<(String, String), Arc<Notify>>>,
    hits: Mutex<Vec<Recorded>>,
}

/// In-process stand-in for the Clarify backend on a free port
#[derive(Clone)]
pub struct MockBackend {
    pub base_url: String,
    inner: Arc<Inner>,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let inner = Arc::new(Inner::default());

        let app = Router::new().fallback(dispatch).with_state(inner.clone());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { base_url, inner })
    }

    /// Register a handler for an exact method + path (query excluded)
    pub fn on<F>(&self, method: &str, path: &str, handler: F)
    where
        F: Fn(&Recorded) -> (u16, Value) + Send + Sync + 'static,
    {
        self.inner
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), Arc::new(handler));
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.on(method, path, move |_| (status, body.clone()));
    }

    /// Hold responses for a route until the returned gate is notified
    pub fn gate(&self, method: &str, path: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.inner
            .gates
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), notify.clone());
        notify
    }

    pub fn hits(&self) -> Vec<Recorded> {
        self.inner.hits.lock().unwrap().clone()
    }

    pub fn hits_for(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.hits()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

async fn dispatch(
    State(inner): State<Arc<Inner>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let content_type = header("content-type");

    let body = if body.is_empty() {
        Value::Null
    } else if content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
    {
        let map: serde_json::Map<String, Value> = url::form_urlencoded::parse(&body)
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();
        Value::Object(map)
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };

    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        content_type,
        body,
    };
    inner.hits.lock().unwrap().push(recorded.clone());

    let key = (recorded.method.clone(), recorded.path.clone());
    let gate = inner.gates.lock().unwrap().get(&key).cloned();
    if let Some(gate) = gate {
        gate.notified().await;
    }

    let handler = inner.routes.lock().unwrap().get(&key).cloned();
    let (status, body) = match handler {
        Some(handler) => handler(&recorded),
        None => (404, json!({ "detail": "Not Found" })),
    };

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status == StatusCode::NO_CONTENT || body.is_null() {
        return status.into_response();
    }
    (status, Json(body)).into_response()
}

/// Page context wired to a mock backend with observable collaborators
pub struct Harness {
    pub mock: MockBackend,
    pub ctx: Arc<PageContext>,
    pub store: Arc<MemorySessionStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub prompter: Arc<ScriptedPrompter>,
}

impl Harness {
    pub async fn new(answers: Vec<DialogChoice>) -> Result<Self> {
        Self::with_prompter(ScriptedPrompter::new(answers)).await
    }

    pub async fn with_prompter(prompter: ScriptedPrompter) -> Result<Self> {
        let mock = MockBackend::start().await?;
        let store = Arc::new(MemorySessionStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let prompter = Arc::new(prompter);

        let session = Arc::new(SessionManager::new(store.clone(), navigator.clone()));
        let api = ApiClient::new(mock.base_url.clone(), session)?;
        let ctx = PageContext::new(api, DialogController::new(prompter.clone()));

        Ok(Self {
            mock,
            ctx,
            store,
            navigator,
            prompter,
        })
    }

    /// Seed the store as if the user had logged in and picked a group
    pub fn logged_in(self, token: &str, group_id: Option<&str>) -> Self {
        self.store.set(TOKEN_KEY, token).unwrap();
        if let Some(group_id) = group_id {
            self.store.set(ACTIVE_GROUP_KEY, group_id).unwrap();
        }
        self
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).unwrap()
    }
}

pub fn user_json(id: u64, nome: &str, email: &str, plano: &str) -> Value {
    json!({
        "id": id,
        "nome": nome,
        "email": email,
        "plano": plano,
        "criado_em": "2024-01-15T09:30:00",
        "movimentacoes": []
    })
}
