//! # Application Host Daemon
//!
//! Runs the bundled demo application as one of its processes.

use anyhow::{Context, Result};
use apphost::demo::{DemoApplication, MAIN_PROCESS};
use apphost::{AppHost, EventScript, HostConfig};
use clap::Parser;
use ipc::RecordingConnector;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "apphost", version, about = "Multi-process application host")]
struct Args {
    /// Host configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Logical name of this process
    #[arg(short, long)]
    process: Option<String>,

    /// Take the process name from the command line (argv[0] basename)
    #[arg(long, conflicts_with = "process")]
    process_from_cmdline: bool,

    /// Lifecycle event script
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Force hub/spoke routing on, whatever the configuration says
    #[arg(long)]
    multi_process: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = HostConfig::resolve(args.config.as_deref())
        .context("Failed to load host configuration")?;
    let selector =
        config.process_selector(args.process.as_deref(), args.process_from_cmdline, MAIN_PROCESS);
    let process = selector
        .current_process_name()
        .context("Failed to resolve process name")?;

    let level = match &args.log_level {
        Some(name) => services_logger::parse_level(name)?,
        None => services_logger::effective_level(&config.log_level)?,
    };
    services_logger::init(level, process)?;

    let script = match &args.script {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read script file {}", path.display()))?;
            EventScript::from_text(&text)?
        }
        None => EventScript::new(),
    };

    let application = DemoApplication::new(true)
        .with_hub_process(config.hub_process.as_str())
        .with_spokes(config.topology());

    let mut host = AppHost::new(
        application,
        selector,
        Arc::new(RecordingConnector::new()),
    )
    .with_hub_process(config.hub_process.clone());
    if args.multi_process {
        host.set_multi_process_mode(true);
    } else if let Some(enabled) = config.multi_process {
        host.set_multi_process_mode(enabled);
    }

    let report = host.run_script(script).context("Application run failed")?;
    log::info!(
        "{} finished: {} unit(s) started, {} failed",
        report.process,
        report.started.len(),
        report.failed.len()
    );
    Ok(())
}
