//! Integration test support for the storefront checkout library.
//!
//! Tests run the real clients against [`StubServer`], an in-process axum
//! server bound to an ephemeral port on 127.0.0.1 that answers canned JSON
//! and records every request it sees.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-checkout-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - section, product and stock requests, caching, error mapping
//! - `payment` - charge request shape and tri-state outcome
//! - `checkout_flow` - cart on disk through to a cleared cart

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use storefront_checkout::checkout::CheckoutSession;
use storefront_checkout::config::StorefrontConfig;
use tokio::net::TcpListener;

pub mod fixtures;

/// A request as the stub server received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path as sent on the wire (still percent-encoded).
    pub path: String,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// Body parsed as JSON, or `Value::Null` if it is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

type Routes = HashMap<(Method, String), (StatusCode, String)>;

struct StubState {
    routes: Routes,
    log: Mutex<Vec<RecordedRequest>>,
}

/// Builder for a [`StubServer`].
#[derive(Default)]
pub struct StubBuilder {
    routes: Routes,
}

impl StubBuilder {
    /// Answer `GET path` with `status` and a JSON body.
    #[must_use]
    pub fn get(self, path: &str, status: StatusCode, body: &Value) -> Self {
        self.route(Method::GET, path, status, body.to_string())
    }

    /// Answer `POST path` with `status` and a JSON body.
    #[must_use]
    pub fn post(self, path: &str, status: StatusCode, body: &Value) -> Self {
        self.route(Method::POST, path, status, body.to_string())
    }

    /// Answer `method path` with `status` and a raw body.
    #[must_use]
    pub fn route(mut self, method: Method, path: &str, status: StatusCode, body: String) -> Self {
        self.routes.insert((method, path.to_string()), (status, body));
        self
    }

    /// Bind to an ephemeral port and start serving in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn spawn(self) -> std::io::Result<StubServer> {
        let state = Arc::new(StubState {
            routes: self.routes,
            log: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(StubServer {
            base_url: format!("http://{addr}"),
            state,
        })
    }
}

/// Running stub of the catalog and payment service.
pub struct StubServer {
    base_url: String,
    state: Arc<StubState>,
}

impl StubServer {
    /// Start building a stub.
    #[must_use]
    pub fn builder() -> StubBuilder {
        StubBuilder::default()
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Client configuration pointing at this stub.
    ///
    /// # Panics
    ///
    /// Never in practice: the base URL is always a valid http URL.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig::with_api_address(&self.base_url).expect("stub URL is valid")
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received for `path`.
    #[must_use]
    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

async fn handle(State(state): State<Arc<StubState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let header_value = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let recorded = RecordedRequest {
        method: parts.method.clone(),
        path: parts.uri.path().to_string(),
        content_type: header_value(header::CONTENT_TYPE.as_str()),
        request_id: header_value("x-request-id"),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let key = (recorded.method.clone(), recorded.path.clone());
    state
        .log
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(recorded);

    match state.routes.get(&key) {
        Some((status, body)) => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            Body::from(body.clone()),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, json!({"error": "no route"}).to_string()).into_response(),
    }
}

/// An address nothing is listening on.
///
/// # Errors
///
/// Returns an error if a probe listener cannot be bound.
pub async fn refused_address() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

/// A checkout session with every field filled in validly.
#[must_use]
pub fn filled_session() -> CheckoutSession {
    let mut session = CheckoutSession::new();
    session.input_email("ada@example.com");
    session.input_card_number("4111111111111111");
    session.input_card_expiry("1230");
    let form = session.form_mut();
    form.name = "Ada Lovelace".to_string();
    form.line1 = "Drottninggatan 1".to_string();
    form.postal_code = "111 51".to_string();
    form.city = "Stockholm".to_string();
    form.phone = "+46701234567".to_string();
    form.cc_name = "ADA LOVELACE".to_string();
    form.cc_csc = "737".to_string();
    session
}
