use crate::batch::RequestDescriptor;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
#[allow(unused)]
use tracing::{debug, error, trace, warn};

/// Issues every descriptor in a batch concurrently and joins the whole set.
///
/// The barrier is the defining behavior: `dispatch` returns only once every
/// request/response cycle in the batch is terminal, so an iteration costs
/// the slowest request rather than the sum of all of them.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    limiter: Option<Arc<Semaphore>>,
}

impl Dispatcher {
    /// Timeouts and connection pooling are `Client`-level concerns and stay
    /// with the caller.
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            limiter: None,
        }
    }

    /// Cap how many requests are in flight at once. Without a cap the whole
    /// batch is spawned immediately.
    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.limiter = Some(Arc::new(Semaphore::new(limit)));
        self
    }

    /// Fire the batch and wait for all of it.
    ///
    /// One descriptor's failure never interrupts its siblings: every request
    /// runs to success or failure and is counted either way, with no retry.
    /// An empty batch completes immediately with zero counts. Dropping the
    /// returned future aborts everything still in flight.
    pub async fn dispatch(&self, batch: Vec<RequestDescriptor>) -> BatchSummary {
        let start = Instant::now();
        if batch.is_empty() {
            trace!("Empty batch; nothing to dispatch.");
            return BatchSummary::default();
        }

        let mut in_flight = JoinSet::new();
        for descriptor in batch {
            let client = self.client.clone();
            let limiter = self.limiter.clone();
            in_flight.spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                execute(&client, descriptor).await
            });
        }

        let mut summary = BatchSummary::default();
        while let Some(joined) = in_flight.join_next().await {
            match joined {
                Ok(Ok(())) => summary.success += 1,
                Ok(Err(err)) => {
                    warn!("Request failed: {err}");
                    summary.error += 1;
                }
                Err(err) => {
                    error!("Request task did not complete: {err}");
                    summary.error += 1;
                }
            }
        }
        summary.elapsed = start.elapsed();

        debug!(
            success = summary.success,
            error = summary.error,
            "Batch complete in {:?}",
            summary.elapsed
        );
        summary
    }
}

async fn execute(
    client: &reqwest::Client,
    descriptor: RequestDescriptor,
) -> Result<(), RequestError> {
    let RequestDescriptor {
        method,
        endpoint,
        payload,
        headers,
    } = descriptor;

    let start = Instant::now();
    let res = client
        .request(method, endpoint.as_str())
        .headers(headers)
        .body(payload)
        .send()
        .await
        .and_then(|response| response.error_for_status());
    record_outcome(res.is_ok(), start.elapsed());

    res?;
    Ok(())
}

#[cfg(feature = "metrics")]
fn record_outcome(ok: bool, latency: Duration) {
    metrics::histogram!("graphload.request.latency").record(latency.as_nanos() as f64);
    if ok {
        metrics::counter!("graphload.request.success").increment(1);
    } else {
        metrics::counter!("graphload.request.error").increment(1);
    }
}

#[cfg(not(feature = "metrics"))]
fn record_outcome(_ok: bool, _latency: Duration) {}

/// A single request's terminal failure: connect errors, timeouts and non-2xx
/// statuses all land here. Isolated to one descriptor by design.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outcome counts for one dispatched batch. Aggregation across iterations
/// and virtual users belongs to the embedding runtime.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub success: u64,
    pub error: u64,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn total(&self) -> u64 {
        self.success + self.error
    }
}
