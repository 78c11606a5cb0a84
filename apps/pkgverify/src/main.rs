#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! pkgverify - Verify installed package files against their mtree manifest
//!
//! Exit status is 0 when every entry verified, 1 when any entry failed or is
//! missing and 2 when the run could not be completed.

mod cli;
mod display;
mod error;
mod logging;

use crate::cli::Cli;
use crate::display::OutputRenderer;
use crate::error::CliError;
use clap::Parser;
use pkgv_config::{constants, Config};
use pkgv_events::{AppEvent, EventEmitter, EventReceiver, EventSender, GeneralEvent, GuardScope};
use pkgv_guard::{VerificationReport, Verifier, VerifierConfig};
use pkgv_manifest::ParseOptions;
use pkgv_platform::{Pacman, PlatformContext};
use pkgv_types::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::select;
use tracing::{error, info};

const EXIT_FAILED_ENTRIES: u8 = 1;
const EXIT_FATAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug());

    match run(cli).await {
        Ok(report) if report.is_valid() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_FAILED_ENTRIES),
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<VerificationReport, CliError> {
    info!("Starting pkgverify v{}", env!("CARGO_PKG_VERSION"));

    // Precedence: file (or defaults), then environment, then CLI flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli);

    let (event_sender, event_receiver) = pkgv_events::channel();
    event_sender.emit(AppEvent::General(GeneralEvent::ConfigurationLoaded {
        source: cli.global.config.as_ref().map_or_else(
            || "defaults".to_string(),
            |path| path.display().to_string(),
        ),
    }));

    let renderer = OutputRenderer::new(
        config.general.default_output,
        config.general.color,
        cli.global.verbose,
        cli.global.quiet,
    );

    let report =
        execute_with_events(verify(cli, &config, event_sender), event_receiver).await?;

    renderer.render_report(&report)?;
    Ok(report)
}

/// Drive `command` while logging its events as they arrive
async fn execute_with_events<F>(
    command: F,
    mut event_receiver: EventReceiver,
) -> Result<VerificationReport, CliError>
where
    F: std::future::Future<Output = Result<VerificationReport, CliError>>,
{
    let mut command = Box::pin(command);

    loop {
        select! {
            result = &mut command => {
                while let Ok(message) = event_receiver.try_recv() {
                    logging::log_event_with_tracing(&message);
                }
                return result;
            }

            message = event_receiver.recv() => {
                match message {
                    Some(message) => logging::log_event_with_tracing(&message),
                    None => { /* Channel closed: keep waiting for command to finish */ }
                }
            }
        }
    }
}

/// Resolve the manifest, parse it and verify every entry
async fn verify(
    cli: Cli,
    config: &Config,
    event_sender: EventSender,
) -> Result<VerificationReport, CliError> {
    let (scope, manifest_path, root) = if let Some(path) = cli.mtree {
        let scope = GuardScope::Manifest {
            path: path.display().to_string(),
        };
        (scope, path, config.verify.root.clone())
    } else {
        let name = cli.package.unwrap_or_default();
        let pacman = Pacman::new(&config.pacman.binary, &config.pacman.db_path);
        let ctx = PlatformContext::new(Some(event_sender.clone()));
        let (package, manifest_path) = pacman.resolve_manifest(&ctx, &name).await?;
        let scope = GuardScope::Package {
            name: package.name,
            version: package.version,
        };
        let root = config
            .verify
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::SYSTEM_ROOT));
        (scope, manifest_path, Some(root))
    };

    let mut options = ParseOptions::default().ignore_dir_mtime(config.verify.ignore_dir_mtime);
    if let Some(root) = root {
        options = options.with_root(root);
    }
    let entries = pkgv_manifest::load_manifest(&manifest_path, &options).await?;
    event_sender.emit(AppEvent::General(GeneralEvent::ManifestLoaded {
        path: manifest_path.display().to_string(),
        entries: entries.len(),
    }));
    if entries.is_empty() {
        event_sender.emit_warning(format!(
            "{} lists no entries to verify",
            manifest_path.display()
        ));
    }

    let verifier = Verifier::new(VerifierConfig {
        max_concurrency: config.verify_concurrency(),
        stat_errors: config.verify.stat_errors,
    })
    .with_event_sender(event_sender);

    Ok(verifier.verify_all(scope, entries).await?)
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_flag;

    if json_mode && !debug_enabled {
        // Keep stdout machine readable
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled {
        let default_filter = "info,pkgverify=debug,pkgv_guard=debug,pkgv_manifest=debug,pkgv_platform=debug,pkgv_config=debug";
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
        if json_mode {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if cli.global.json {
        config.general.default_output = OutputFormat::Json;
    }
    if let Some(color) = cli.global.color {
        config.general.color = color;
    }
    if let Some(root) = &cli.root {
        config.verify.root = Some(root.clone());
    }
    if cli.ignore_dir_mtime {
        config.verify.ignore_dir_mtime = true;
    }
    if let Some(jobs) = cli.jobs {
        config.verify.max_concurrency = jobs;
    }
    if let Some(policy) = cli.stat_errors {
        config.verify.stat_errors = policy;
    }
}
