//! upssh CLI - directory deployment over SSH
//!
//! Usage: upssh [--dir <PATH>] [--env-file <PATH>] [--play-file <PATH>] [-v...] [-q]

use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use upssh::config;
use upssh::domain::ports::RemoteFs;
use upssh::error::ConfigError;
use upssh::presentation::{create_deploy_use_case, Cli, TextRenderer};
use upssh::{DeployReport, UpsshError};

fn setup_logging(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, renderer: &TextRenderer) -> Result<DeployReport> {
    let working_dir = std::fs::canonicalize(&cli.dir).map_err(|source| {
        UpsshError::from(ConfigError::Read {
            path: cli.dir.clone(),
            source,
        })
    })?;
    tracing::info!("Local working directory: {}", working_dir.display());

    let mut use_case = create_deploy_use_case(&working_dir)?;
    let resolved = config::load(
        &working_dir,
        &cli.env_file_in(&working_dir),
        &cli.play_file_in(&working_dir),
        use_case.remote().separator(),
    )?;
    eprint!("{}", renderer.render_warnings(&resolved.warnings));

    let report = use_case.execute(&resolved.endpoint, &resolved.deployment, Utc::now())?;
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli);
    let renderer = TextRenderer::for_stdout(cli.verbose);

    match run(&cli, &renderer) {
        Ok(report) => {
            print!("{}", renderer.render_report(&report));
            tracing::info!("Bye");
            ExitCode::SUCCESS
        }
        Err(err) => match err.downcast_ref::<UpsshError>() {
            Some(upssh_err) => {
                eprint!("{}", renderer.render_error(upssh_err));
                ExitCode::from(upssh_err.exit_code())
            }
            None => {
                eprintln!("[ERROR] {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}
