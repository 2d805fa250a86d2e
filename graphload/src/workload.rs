use crate::batch::BatchBuilder;
use crate::config::{ConfigError, WorkloadConfig};
use crate::dataset::Dataset;
use crate::dispatch::{BatchSummary, Dispatcher};
use crate::query::PROFILE_QUERY;
#[allow(unused)]
use tracing::{instrument, trace};

/// The unit the external load runtime drives: one [`Workload::iteration`]
/// per virtual-user cycle.
///
/// Construction validates everything that should fail before load starts.
/// After that, iterations are stateless and independent: many virtual users
/// can share one `Workload` (or cheap clones of it) and call `iteration`
/// concurrently, with the dataset and template read-only behind it.
#[derive(Debug, Clone)]
pub struct Workload {
    dataset: Dataset,
    builder: BatchBuilder,
    dispatcher: Dispatcher,
}

impl Workload {
    pub fn new(
        config: WorkloadConfig,
        dataset: Dataset,
        client: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        if config.endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if config.max_in_flight == Some(0) {
            return Err(ConfigError::ZeroInFlight);
        }
        PROFILE_QUERY.validate()?;

        let builder = BatchBuilder::new(config.endpoint, PROFILE_QUERY);
        let mut dispatcher = Dispatcher::new(client);
        if let Some(limit) = config.max_in_flight {
            dispatcher = dispatcher.with_max_in_flight(limit);
        }

        Ok(Self {
            dataset,
            builder,
            dispatcher,
        })
    }

    /// One virtual-user iteration: build the batch, fire it, wait for every
    /// request in it to finish. Allocates only iteration-local state.
    #[instrument(name = "iteration", skip_all)]
    pub async fn iteration(&self) -> BatchSummary {
        let batch = self.builder.build(&self.dataset);
        trace!(requests = batch.len(), "Dispatching batch");
        self.dispatcher.dispatch(batch).await
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}
