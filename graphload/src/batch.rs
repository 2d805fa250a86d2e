use crate::dataset::Dataset;
use crate::query::{QueryTemplate, PLATFORM};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::json;

/// One fully-bound request: everything the dispatcher needs to issue it.
///
/// Descriptors are plain values with no state shared between them, so any
/// two can execute concurrently. They are rebuilt fresh each iteration and
/// never reused.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub endpoint: String,
    pub payload: String,
    pub headers: HeaderMap,
}

/// Turns the shared dataset into a batch: one descriptor per identifier, in
/// dataset order, each bound to the fixed platform tag.
#[derive(Debug, Clone)]
pub struct BatchBuilder {
    endpoint: String,
    template: QueryTemplate,
}

impl BatchBuilder {
    pub fn new(endpoint: impl Into<String>, template: QueryTemplate) -> Self {
        Self {
            endpoint: endpoint.into(),
            template,
        }
    }

    /// Pure transformation: N identifiers in, N descriptors out, order
    /// preserved. An empty dataset yields an empty batch.
    pub fn build(&self, dataset: &Dataset) -> Vec<RequestDescriptor> {
        dataset.iter().map(|id| self.descriptor(id)).collect()
    }

    fn descriptor(&self, identity: &str) -> RequestDescriptor {
        let payload = json!({
            "query": self.template.document(),
            "variables": {
                "platform": PLATFORM,
                "identity": identity,
            },
        })
        .to_string();

        RequestDescriptor {
            method: Method::POST,
            endpoint: self.endpoint.clone(),
            payload,
            headers: json_headers(),
        }
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}
