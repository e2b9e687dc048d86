mod args;

use std::{io::IsTerminal, process::ExitCode, sync::Arc};

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pexec_core::{
    Invocation, JsonRenderer, Orchestrator, SummaryRenderer, TextRenderer, run_pipeline,
};
use pexec_model::RunSummary;
use pexec_kube::{KubeCluster, KubeExecutor, connect};
use pexec_observe::{LoggerConfig, logger_init};

use args::{Cli, OutputFormat};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_from_argv(std::env::args_os()).unwrap_or_else(|e| e.exit());
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let logger = LoggerConfig {
        format: cli.log_format.parse()?,
        level: cli.log_level.clone(),
        use_color: !cli.no_color && std::io::stderr().is_terminal(),
        ..Default::default()
    };
    logger_init(&logger)?;

    // validated before any network activity
    let invocation = Invocation::try_from(cli.invocation())?;
    debug!(workload = %invocation.workload, command = ?invocation.request.command(), "invocation parsed");

    let client = connect(&cli.cluster_config())
        .await
        .context("cannot reach the cluster")?;
    let cluster = KubeCluster::new(client.clone());
    let executor = Arc::new(KubeExecutor::new(client));

    let cancel = CancellationToken::new();
    tokio::spawn(watch_interrupts(cancel.clone()));

    let orchestrator = Orchestrator::new(cli.dispatch_config()).with_cancellation(cancel);
    let summary = run_pipeline(&cluster, executor, &orchestrator, &invocation).await?;
    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "run finished"
    );

    let renderer: Box<dyn SummaryRenderer> = match cli.output {
        OutputFormat::Text => Box::new(TextRenderer::new(
            !cli.no_color && std::io::stdout().is_terminal(),
        )),
        OutputFormat::Json => Box::new(JsonRenderer),
    };
    println!("{}", renderer.render(&summary));

    Ok(exit_code(&summary, cli.fail_on_error))
}

/// First Ctrl-C cancels the run; a second one exits at once.
async fn watch_interrupts(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    warn!("interrupted; cancelling, press Ctrl-C again to exit immediately");
    cancel.cancel();

    if tokio::signal::ctrl_c().await.is_ok() {
        eprintln!("interrupted twice; exiting");
        std::process::exit(INTERRUPTED_EXIT);
    }
}

const INTERRUPTED_EXIT: i32 = 130;

/// Per-pod failures only change the exit status when `fail_on_error` is set.
fn exit_code(summary: &RunSummary, fail_on_error: bool) -> ExitCode {
    if fail_on_error && summary.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
