mod output;
mod status;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::{
    Client,
    api::{Api, AttachParams},
};
use pexec_core::RemoteExecutor;
use pexec_model::{ExecError, ExecutionRequest, InstanceTarget};
use tracing::{debug, trace};

use output::{Stream, pump_lines};
use status::outcome_from_status;

/// [`RemoteExecutor`] running commands through the pod `exec` subresource.
///
/// Stdout and stderr of every pod are forwarded line by line to the local
/// stdout and stderr. Stdin is not attached and no tty is allocated.
#[derive(Clone)]
pub struct KubeExecutor {
    client: Client,
}

impl KubeExecutor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteExecutor for KubeExecutor {
    async fn exec(
        &self,
        target: &InstanceTarget,
        request: &ExecutionRequest,
    ) -> Result<(), ExecError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), &target.namespace);

        let mut params = AttachParams::default()
            .stdin(false)
            .stdout(true)
            .stderr(true);
        if let Some(container) = &request.container {
            params = params.container(container.clone());
        }

        trace!(target: "pexec.kube.exec", pod = %target, command = ?request.command(), "exec");
        let mut process = pods
            .exec(&target.name, request.command().to_vec(), &params)
            .await
            .map_err(exec_error)?;

        let prefix = request.disambiguate_output.then_some(target.name.as_str());
        let stdout = process.stdout();
        let stderr = process.stderr();
        let status = process.take_status();

        let forward_out = async {
            match stdout {
                Some(reader) => pump_lines(reader, prefix, Stream::Stdout).await,
                None => Ok(()),
            }
        };
        let forward_err = async {
            match stderr {
                Some(reader) => pump_lines(reader, prefix, Stream::Stderr).await,
                None => Ok(()),
            }
        };
        let (out, err) = tokio::join!(forward_out, forward_err);

        let status = match status {
            Some(status) => status.await,
            None => None,
        };
        process
            .join()
            .await
            .map_err(|e| ExecError::transport(e.to_string()))?;
        out?;
        err?;

        let outcome = outcome_from_status(status);
        debug!(target: "pexec.kube.exec", pod = %target, ok = outcome.is_ok(), "exec finished");
        outcome
    }
}

/// Errors returned while opening the exec stream.
///
/// API rejections (unknown container, pod not running, forbidden) are remote
/// failures; everything else is a transport failure.
fn exec_error(e: kube::Error) -> ExecError {
    match e {
        kube::Error::Api(resp) => ExecError::remote(resp.message),
        other => ExecError::transport(other.to_string()),
    }
}
