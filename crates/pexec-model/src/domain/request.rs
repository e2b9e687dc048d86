use serde::Serialize;

use crate::ModelError;

/// Command to run on every resolved instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    command: Vec<String>,
    /// Container to exec into.
    ///
    /// If `None`, the executor applies its own single-container default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// Prefix every output line with the instance name.
    pub disambiguate_output: bool,
}

impl ExecutionRequest {
    /// Build a request, rejecting an empty command.
    pub fn new(command: Vec<String>) -> Result<Self, ModelError> {
        if command.is_empty() {
            return Err(ModelError::EmptyCommand);
        }
        Ok(Self {
            command,
            container: None,
            disambiguate_output: true,
        })
    }

    pub fn with_container(mut self, container: Option<String>) -> Self {
        self.container = container;
        self
    }

    pub fn with_disambiguation(mut self, enabled: bool) -> Self {
        self.disambiguate_output = enabled;
        self
    }

    /// Command tokens; never empty.
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Command tokens joined with spaces, for display.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}
