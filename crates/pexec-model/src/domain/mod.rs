mod workload;
pub use workload::{WorkloadKind, WorkloadReference};

mod labels;
pub use labels::LabelSet;

mod instance;
pub use instance::InstanceTarget;

mod request;
pub use request::ExecutionRequest;

mod task_status;
pub use task_status::TaskStatus;

mod exec_error;
pub use exec_error::ExecError;

mod result;
pub use result::ExecutionResult;

mod summary;
pub use summary::RunSummary;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Serde helper storing a [`std::time::Duration`] as fractional seconds.
pub(crate) mod secs_f64 {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
