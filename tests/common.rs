#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use active_tracker_nav::accessors::{AccessorError, SessionAccessor};
use active_tracker_nav::config::{ConfigV1, NavigationConfig};
use active_tracker_nav::models::Identity;
use active_tracker_nav::navigation::{DocumentTitle, Navigator, RouteTable, default_routes};
use active_tracker_nav::routes::create_router;
use active_tracker_nav::state::AppState;
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, Response};
use uuid::Uuid;

/// What a scripted accessor answers.
#[derive(Clone, Copy, Debug)]
pub enum Answer {
    SignedIn,
    SignedOut,
    Fails,
}

/// Accessor with a scripted answer, an optional delay, and a call counter.
pub struct ScriptedAccessor {
    answer: Answer,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedAccessor {
    pub fn new(answer: Answer) -> Arc<Self> {
        Arc::new(Self {
            answer,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn delayed(answer: Answer, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            answer,
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionAccessor for ScriptedAccessor {
    fn get_name(&self) -> &str {
        "scripted"
    }

    async fn current_identity(&self) -> Result<Option<Identity>, AccessorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.answer {
            Answer::SignedIn => Ok(Some(Identity::new(
                Uuid::new_v4(),
                Some("runner@example.com".to_string()),
            ))),
            Answer::SignedOut => Ok(None),
            Answer::Fails => Err(AccessorError::Decode("provider unavailable".to_string())),
        }
    }
}

pub fn default_table() -> Arc<RouteTable> {
    Arc::new(RouteTable::new(&default_routes(), "login").expect("default routes are valid"))
}

/// The standard two-stage navigator over the default table.
pub fn navigator_with(
    accessor: Arc<dyn SessionAccessor>,
    config: &NavigationConfig,
) -> (Navigator, Arc<DocumentTitle>) {
    let document = Arc::new(DocumentTitle::new());
    let navigator = Navigator::standard(default_table(), accessor, document.clone(), config);
    (navigator, document)
}

pub fn build_app(config: ConfigV1) -> Router {
    let state = AppState::new(Arc::new(config)).expect("config should produce valid state");
    create_router(state)
}

pub fn request(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn post_json(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
