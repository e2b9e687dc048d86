use std::{ffi::OsString, path::PathBuf, time::Duration};

use clap::{CommandFactory, FromArgMatches, Parser, ValueEnum};
use pexec_core::{DispatchConfig, RawInvocation};
use pexec_kube::ClusterConfig;

const EXAMPLES: &str = "\
Examples:
  # Run a command in every pod of a deployment
  kubectl pexec deployment nginx cat /etc/nginx/nginx.conf

  # Without --, everything after the name is the command
  kubectl pexec ds -n logging fluentd ls -la /var/log

  # With --, flags may also follow the name
  kubectl pexec ds fluentd -n logging -- ls -la /var/log

  # Select pods directly by label
  kubectl pexec pod -l app=web,tier=frontend -- hostname";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Do batch execution in all pods of workloads.
#[derive(Debug, Parser)]
#[command(name = "kubectl-pexec", version, after_help = EXAMPLES)]
pub struct Cli {
    /// Workload kind: deployment|deploy, statefulset|ss, daemonset|ds, pod|po
    pub kind: String,

    /// Workload name (omitted for pods) followed by the command to run
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Do not prefix output lines with the pod name
    #[arg(long)]
    pub ignore_hostname: bool,

    /// Container to exec into, required when pods have several containers
    #[arg(short = 'c', long = "container-name", value_name = "NAME")]
    pub container: Option<String>,

    /// Label selector, required for pods: key1=value1,key2=value2
    #[arg(short = 'l', long, value_name = "SELECTOR")]
    pub labels: Option<String>,

    /// Namespace of the workload [default: default]
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Path to the kubeconfig file
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Per-pod timeout in seconds; 0 waits forever
    #[arg(long, value_name = "SECS", default_value_t = 0)]
    pub timeout: u64,

    /// Maximum number of pods executing at once; 0 is unbounded
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub max_concurrency: usize,

    /// Exit with status 1 when the command failed on any pod
    #[arg(long)]
    pub fail_on_error: bool,

    /// Summary format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log filter directive, e.g. `info` or `pexec=debug`
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Log format: text|json|journald
    #[arg(long, default_value = "text")]
    pub log_format: String,
}

impl Cli {
    /// Parse a full argv, program name included.
    ///
    /// Without a `--` separator the first positional value starts the command
    /// line and every later token belongs to it. With a separator, flags may
    /// also sit between the workload name and `--`.
    pub fn parse_from_argv<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let mut command = Self::command();
        if argv.iter().skip(1).any(|arg| arg == "--") {
            command = command.mut_arg("args", |arg| {
                arg.trailing_var_arg(false).allow_hyphen_values(false)
            });
        }
        let matches = command.try_get_matches_from(argv)?;
        Self::from_arg_matches(&matches)
    }

    pub fn invocation(&self) -> RawInvocation {
        RawInvocation {
            kind: self.kind.clone(),
            args: self.args.clone(),
            namespace: self.namespace.clone(),
            labels: self.labels.clone(),
            container: self.container.clone(),
            ignore_hostname: self.ignore_hostname,
        }
    }

    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig::default()
            .with_max_concurrency(self.max_concurrency)
            .with_task_timeout(Duration::from_secs(self.timeout))
    }

    pub fn cluster_config(&self) -> ClusterConfig {
        ClusterConfig {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from_argv(std::iter::once("kubectl-pexec").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_command_without_separator() {
        let cli = parse(&["deploy", "nginx", "cat", "/etc/nginx/nginx.conf"]);
        assert_eq!(cli.kind, "deploy");
        assert_eq!(cli.args, ["nginx", "cat", "/etc/nginx/nginx.conf"]);
        assert!(!cli.ignore_hostname);
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn flags_before_separator_and_command_after() {
        let cli = parse(&[
            "pod", "-l", "app=web", "-n", "shop", "-c", "main", "--ignore-hostname", "--", "ls",
            "-la",
        ]);
        assert_eq!(cli.kind, "pod");
        assert_eq!(cli.args, ["ls", "-la"]);
        assert_eq!(cli.labels.as_deref(), Some("app=web"));
        assert_eq!(cli.namespace.as_deref(), Some("shop"));
        assert_eq!(cli.container.as_deref(), Some("main"));
        assert!(cli.ignore_hostname);

        let raw = cli.invocation();
        assert_eq!(raw.args, ["ls", "-la"]);
        assert!(raw.ignore_hostname);
    }

    #[test]
    fn zero_limits_mean_unbounded() {
        let cli = parse(&["ds", "agent", "uptime"]);
        assert_eq!(cli.dispatch_config(), DispatchConfig::default());

        let cli = parse(&["ds", "--timeout", "30", "--max-concurrency", "5", "agent", "uptime"]);
        let cfg = cli.dispatch_config();
        assert_eq!(cfg.task_timeout, Some(Duration::from_secs(30)));
        assert_eq!(cfg.max_concurrency.map(|n| n.get()), Some(5));
    }

    #[test]
    fn json_output_and_connection_flags() {
        let cli = parse(&[
            "ss", "db", "-o", "json", "--kubeconfig", "/tmp/kc", "--context", "prod", "--", "id",
        ]);
        assert_eq!(cli.output, OutputFormat::Json);
        let cluster = cli.cluster_config();
        assert_eq!(cluster.kubeconfig, Some(PathBuf::from("/tmp/kc")));
        assert_eq!(cluster.context.as_deref(), Some("prod"));
    }

    #[test]
    fn hyphenated_command_needs_no_separator() {
        let cli = parse(&["deploy", "nginx", "ls", "-la", "/tmp"]);
        assert_eq!(cli.args, ["nginx", "ls", "-la", "/tmp"]);
        assert!(cli.labels.is_none());

        let cli = parse(&["deploy", "nginx", "ps", "-n", "1"]);
        assert_eq!(cli.args, ["nginx", "ps", "-n", "1"]);
        assert!(cli.namespace.is_none());
    }

    #[test]
    fn flags_after_the_name_need_a_separator() {
        let cli = parse(&["deploy", "nginx", "-n", "web", "--fail-on-error", "--", "ls", "-la"]);
        assert_eq!(cli.args, ["nginx", "ls", "-la"]);
        assert_eq!(cli.namespace.as_deref(), Some("web"));
        assert!(cli.fail_on_error);
    }
}
