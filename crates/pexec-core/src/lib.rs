//! Resolution, concurrent dispatch and aggregation for batch exec across workload instances.
//!
//! The pipeline is `WorkloadResolver -> InstanceLister -> Orchestrator -> summarize`;
//! cluster access and the exec transport are injected through [`ClusterApi`] and [`RemoteExecutor`].

pub mod error;
pub use error::CoreError;

mod cluster;
pub use cluster::ClusterApi;

mod executor;
pub use executor::RemoteExecutor;

mod invocation;
pub use invocation::{Invocation, RawInvocation};

mod resolver;
pub use resolver::WorkloadResolver;

mod lister;
pub use lister::InstanceLister;

pub mod orchestrator;
pub use orchestrator::{DispatchConfig, Orchestrator};

mod aggregator;
pub use aggregator::{summarize, summarize_elapsed};

pub mod render;
pub use render::{JsonRenderer, SummaryRenderer, TextRenderer};

mod pipeline;
pub use pipeline::run_pipeline;

#[cfg(test)]
mod testing;
