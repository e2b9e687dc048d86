use k8s_openapi::apimachinery::pkg::apis::meta::v1::Status;
use pexec_model::ExecError;

const SUCCESS: &str = "Success";
const NON_ZERO_EXIT: &str = "NonZeroExitCode";
const EXIT_CODE_CAUSE: &str = "ExitCode";

/// Decode the status frame sent at the end of an exec stream.
pub(super) fn outcome_from_status(status: Option<Status>) -> Result<(), ExecError> {
    let Some(status) = status else {
        return Err(ExecError::transport("exec stream closed without a status"));
    };
    if status.status.as_deref() == Some(SUCCESS) {
        return Ok(());
    }

    if status.reason.as_deref() == Some(NON_ZERO_EXIT)
        && let Some(code) = exit_code(&status)
    {
        return Err(ExecError::NonZeroExit { code });
    }

    let reason = status
        .message
        .or(status.reason)
        .unwrap_or_else(|| "unknown failure".to_string());
    Err(ExecError::remote(reason))
}

fn exit_code(status: &Status) -> Option<i32> {
    status
        .details
        .as_ref()?
        .causes
        .as_ref()?
        .iter()
        .find(|cause| cause.reason.as_deref() == Some(EXIT_CODE_CAUSE))?
        .message
        .as_deref()?
        .trim()
        .parse()
        .ok()
}
