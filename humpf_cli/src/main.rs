mod cli;
mod commands;
mod error_fmt;
mod graph;

use std::io::Write;

use clap::Parser;
use eyre::WrapErr;
use humpf_core::{PartialSpringConfig, SpringSequence};
use tracing_appender::non_blocking::WorkerGuard;

use crate::cli::{Cli, Commands, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(err) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        std::process::exit(exit_code_for_error(&err));
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    let cfg = match cli.config.as_deref() {
        Some(path) => Some(humpf_config::load_file(path)?),
        None => None,
    };

    let level = cli
        .log_level
        .clone()
        .or_else(|| cfg.as_ref().and_then(|c| c.logging.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    // Held until the command finishes so buffered file logs are flushed.
    let _log_guard = init_tracing(&level, cli.json, cli.log_file.as_deref())?;

    let seq = match (&cfg, cli.config.as_deref()) {
        (Some(cfg), Some(path)) => SpringSequence::try_from(cfg)
            .wrap_err_with(|| format!("build timeline from {}", path.display()))?,
        _ => default_timeline()?,
    };
    tracing::info!(
        steps = seq.len(),
        time_scale = seq.time_scale(),
        "timeline ready"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.cmd {
        Commands::Sample { from, to, step } => {
            commands::run_sample(&seq, from, to, step, cli.json, &mut out)?
        }
        Commands::Plot {
            from,
            to,
            width,
            height,
            velocity,
        } => commands::run_plot(&seq, from, to, (width, height), velocity, &mut out)?,
        Commands::Inspect => commands::run_inspect(&seq, cli.json, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

/// One default spring starting at 0, settling at 1.
fn default_timeline() -> eyre::Result<SpringSequence> {
    let mut seq = SpringSequence::new();
    seq.insert_at(0.0, PartialSpringConfig::new())?;
    Ok(seq)
}

fn init_tracing(
    level: &str,
    json: bool,
    log_file: Option<&std::path::Path>,
) -> eyre::Result<Option<WorkerGuard>> {
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .wrap_err_with(|| format!("invalid log level {level:?}"))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let mut file_guard = None;
    let result = match (log_file, json) {
        (Some(path), json) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("--log-file needs a file name: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(
                dir.unwrap_or_else(|| std::path::Path::new(".")),
                name,
            );
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            let builder = builder.with_writer(writer).with_ansi(false);
            if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
        (None, true) => builder.json().with_writer(std::io::stderr).try_init(),
        (None, false) => builder.with_writer(std::io::stderr).try_init(),
    };
    // A subscriber installed earlier (e.g. by a test harness) is fine.
    let _ = result;
    Ok(file_guard)
}
