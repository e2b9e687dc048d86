use async_trait::async_trait;
use pexec_model::{ExecError, ExecutionRequest, InstanceTarget};

/// Runs one command on one instance.
///
/// Called concurrently from many tasks, so implementations share nothing mutable.
/// When `request.disambiguate_output` is set, every output line must be
/// prefixed with the instance name before it is written.
#[async_trait]
pub trait RemoteExecutor: Send + Sync + 'static {
    /// Block until the remote command completes or the transport fails.
    async fn exec(&self, target: &InstanceTarget, request: &ExecutionRequest)
    -> Result<(), ExecError>;
}
