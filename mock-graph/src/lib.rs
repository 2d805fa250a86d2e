//! Stand-in for the profile service: a single GraphQL POST endpoint with
//! canned responses and per-instance counters, so tests can assert what the
//! workload actually put on the wire.
//!
//! Behavior is driven by the identity value in the request variables:
//! `slow:*` answers after a configured delay, `fail:*` answers 500,
//! everything else answers a minimal profile body.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{debug_handler, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

const SLOW_PREFIX: &str = "slow:";
const FAIL_PREFIX: &str = "fail:";

#[derive(Clone)]
struct MockState {
    slow_delay: Duration,
    hits: Arc<AtomicU64>,
    in_flight: Arc<AtomicU64>,
    peak_in_flight: Arc<AtomicU64>,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockState {
    fn new(slow_delay: Duration) -> Self {
        Self {
            slow_delay,
            hits: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(AtomicU64::new(0)),
            peak_in_flight: Arc::new(AtomicU64::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Handle to a running mock instance. Counters are live; state is
/// per-instance so parallel tests never interfere.
#[derive(Clone)]
pub struct MockGraph {
    addr: SocketAddr,
    state: MockState,
}

impl MockGraph {
    /// Bind an ephemeral localhost port and start serving.
    pub async fn spawn() -> Self {
        Self::spawn_with_delay(Duration::from_millis(250)).await
    }

    /// `slow:` identities answer after `slow_delay`.
    pub async fn spawn_with_delay(slow_delay: Duration) -> Self {
        let state = MockState::new(slow_delay);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, state }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far, including failed ones.
    pub fn hits(&self) -> u64 {
        self.state.hits.load(Ordering::Relaxed)
    }

    /// Highest number of requests observed in flight at once.
    pub fn peak_in_flight(&self) -> u64 {
        self.state.peak_in_flight.load(Ordering::Relaxed)
    }

    /// The `variables` object of every request, in arrival order.
    pub fn received(&self) -> Vec<Value> {
        self.state.received.lock().unwrap().clone()
    }
}

/// Serve on a fixed address, for manual runs against the demo driver.
pub async fn run(addr: SocketAddr) {
    let state = MockState::new(Duration::from_millis(250));
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, router(state)).await.unwrap();
}

fn router(state: MockState) -> Router {
    Router::new().route("/", post(profiles)).with_state(state)
}

#[derive(Deserialize)]
struct GraphqlRequest {
    #[allow(dead_code)]
    query: String,
    variables: Value,
}

#[debug_handler(state = MockState)]
async fn profiles(
    State(state): State<MockState>,
    Json(body): Json<GraphqlRequest>,
) -> Result<Json<Value>, StatusCode> {
    state.hits.fetch_add(1, Ordering::Relaxed);
    let current = state.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
    state.peak_in_flight.fetch_max(current, Ordering::Relaxed);

    let identity = body.variables["identity"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    state.received.lock().unwrap().push(body.variables.clone());

    let result = answer(&state, &identity).await;
    state.in_flight.fetch_sub(1, Ordering::Relaxed);
    result
}

async fn answer(state: &MockState, identity: &str) -> Result<Json<Value>, StatusCode> {
    if identity.starts_with(SLOW_PREFIX) {
        tokio::time::sleep(state.slow_delay).await;
    }
    if identity.starts_with(FAIL_PREFIX) {
        debug!(identity, "Returning forced failure");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    Ok(Json(json!({
        "data": {
            "identity": {
                "uuid": "00000000-0000-0000-0000-000000000000",
                "platform": "twitter",
                "identity": identity,
                "displayName": identity,
                "ownedBy": null,
                "nft": [],
                "neighborWithTraversal": [],
                "__typename": "IdentityRecord"
            }
        }
    })))
}
