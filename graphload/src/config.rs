use thiserror::Error;

/// Default target for the profile service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3722";

/// Knobs owned by this workload. The load profile (virtual users, ramp,
/// duration) is the embedding runtime's configuration and has no knob here.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    pub endpoint: String,
    /// Ceiling on requests in flight within one batch. `None` spawns the
    /// whole batch at once and leaves the ceiling to the runtime's VU count.
    pub max_in_flight: Option<usize>,
}

impl WorkloadConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            max_in_flight: None,
        }
    }

    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.max_in_flight = Some(limit);
        self
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Fatal at initialization, same as [`crate::LoadError`]: a misconfigured
/// workload never starts iterating.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Query template does not declare the {0} variable.")]
    MissingVariable(&'static str),

    #[error("Target endpoint is empty.")]
    EmptyEndpoint,

    #[error("max_in_flight must be nonzero.")]
    ZeroInFlight,
}
