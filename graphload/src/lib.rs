#![doc = include_str!("../README.md")]

pub mod batch;
pub mod config;
pub mod dataset;
pub mod dispatch;
pub mod query;
pub mod workload;

pub use batch::{BatchBuilder, RequestDescriptor};
pub use config::{ConfigError, WorkloadConfig, DEFAULT_ENDPOINT};
pub use dataset::{Dataset, LoadError, DEFAULT_DATASET_PATH};
pub use dispatch::{BatchSummary, Dispatcher, RequestError};
pub use query::{QueryTemplate, PLATFORM, PROFILE_QUERY};
pub use workload::Workload;

pub mod prelude {
    pub use crate::batch::{BatchBuilder, RequestDescriptor};
    pub use crate::config::WorkloadConfig;
    pub use crate::dataset::Dataset;
    pub use crate::dispatch::{BatchSummary, Dispatcher};
    pub use crate::query::{QueryTemplate, PROFILE_QUERY};
    pub use crate::workload::Workload;
}
