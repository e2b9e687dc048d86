use std::path::{Path, PathBuf};

use kube::{
    Client, Config,
    config::{KubeConfigOptions, Kubeconfig},
};
use pexec_core::CoreError;
use tracing::debug;

/// How to reach the cluster.
#[derive(Debug, Clone, Default)]
pub struct ClusterConfig {
    /// Explicit kubeconfig path; takes precedence over `~/.kube/config`.
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use instead of the current one.
    pub context: Option<String>,
}

/// Pick the kubeconfig file to load.
///
/// An explicit path always wins. Otherwise `<home>/.kube/config` is used when it exists.
/// `None` means no file applies and the config should be inferred.
pub fn kubeconfig_path(explicit: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let default = home?.join(".kube").join("config");
    default.is_file().then_some(default)
}

/// Build a client from `cfg`, falling back to in-cluster / `KUBECONFIG` inference.
pub async fn connect(cfg: &ClusterConfig) -> Result<Client, CoreError> {
    let home = dirs::home_dir();
    let config = match kubeconfig_path(cfg.kubeconfig.as_deref(), home.as_deref()) {
        Some(path) => {
            debug!(target: "pexec.kube.config", path = %path.display(), "loading kubeconfig");
            let kubeconfig = Kubeconfig::read_from(&path)
                .map_err(|e| CoreError::Client(format!("{}: {e}", path.display())))?;
            let options = KubeConfigOptions {
                context: cfg.context.clone(),
                ..Default::default()
            };
            Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(|e| CoreError::Client(e.to_string()))?
        }
        None => {
            debug!(target: "pexec.kube.config", "no kubeconfig file; inferring configuration");
            Config::infer()
                .await
                .map_err(|e| CoreError::Client(e.to_string()))?
        }
    };
    debug!(target: "pexec.kube.config", cluster = %config.cluster_url, "cluster configured");
    Client::try_from(config).map_err(|e| CoreError::Client(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn explicit_path_wins_even_if_missing() {
        let home = tempfile::tempdir().unwrap();
        let explicit = Path::new("/nonexistent/kubeconfig");
        assert_eq!(
            kubeconfig_path(Some(explicit), Some(home.path())),
            Some(explicit.to_path_buf())
        );
    }

    #[test]
    fn falls_back_to_home_config_when_present() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".kube");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config"), "apiVersion: v1\nkind: Config\n").unwrap();

        assert_eq!(
            kubeconfig_path(None, Some(home.path())),
            Some(dir.join("config"))
        );
    }

    #[test]
    fn no_file_means_inference() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(kubeconfig_path(None, Some(home.path())), None);
        assert_eq!(kubeconfig_path(None, None), None);
    }

    #[tokio::test]
    async fn unreadable_kubeconfig_is_a_client_error() {
        let cfg = ClusterConfig {
            kubeconfig: Some(PathBuf::from("/nonexistent/kubeconfig")),
            context: None,
        };
        let Err(err) = connect(&cfg).await else {
            panic!("connecting with a missing kubeconfig must fail");
        };
        assert!(matches!(err, CoreError::Client(ref m) if m.contains("/nonexistent/kubeconfig")));
    }
}
