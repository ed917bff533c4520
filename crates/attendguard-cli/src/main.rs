//! CLI entry point for attendguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `attendguard-app` crate.

#![forbid(unsafe_code)]

use anyhow::Context;
use attendguard_app::{CheckInput, ExplainOutput, decision_exit_code, run_check, run_explain};
use attendguard_repo::{InMemoryRepository, Snapshot};
use attendguard_settings::Overrides;
use attendguard_types::EligibilityRequest;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Parser, Debug)]
#[command(
    name = "attendguard",
    version,
    about = "Self check-in eligibility decisions for attendance sessions"
)]
struct Cli {
    /// Path to attendguard config TOML. A missing file means defaults.
    #[arg(long, global = true, default_value = "attendguard.toml")]
    config: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide whether a check-in request is eligible and print the result JSON.
    Check {
        /// JSON snapshot of the tables the engine reads.
        #[arg(long)]
        snapshot: Utf8PathBuf,

        /// JSON eligibility request.
        #[arg(long)]
        request: Utf8PathBuf,

        /// Evaluation time as RFC 3339 (defaults to the current time).
        #[arg(long)]
        now: Option<String>,

        /// Override repository.read_timeout_ms.
        #[arg(long)]
        read_timeout_ms: Option<u64>,

        /// Override geofence.default_radius_m.
        #[arg(long)]
        default_radius_m: Option<f64>,

        /// Also write the result JSON to this file.
        #[arg(long)]
        out: Option<Utf8PathBuf>,
    },

    /// Explain a reason code with remediation guidance.
    Explain {
        /// The reason code (e.g. "out_of_range").
        code: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the result JSON; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match cli.cmd {
        Commands::Check {
            ref snapshot,
            ref request,
            ref now,
            read_timeout_ms,
            default_radius_m,
            ref out,
        } => {
            let overrides = Overrides {
                read_timeout_ms,
                default_radius_m,
            };
            let result = cmd_check(
                &cli.config,
                snapshot,
                request,
                now.as_deref(),
                overrides,
                out.as_deref(),
            )
            .await;
            match result {
                Ok(code) => code,
                Err(err) => {
                    eprintln!("attendguard error: {err:#}");
                    1
                }
            }
        }
        Commands::Explain { ref code } => cmd_explain(code),
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

async fn cmd_check(
    config_path: &Utf8Path,
    snapshot_path: &Utf8Path,
    request_path: &Utf8Path,
    now: Option<&str>,
    overrides: Overrides,
    out: Option<&Utf8Path>,
) -> anyhow::Result<i32> {
    // Missing config file is allowed (defaults apply).
    let cfg_text = std::fs::read_to_string(config_path).unwrap_or_default();
    let cfg = if cfg_text.trim().is_empty() {
        attendguard_settings::AttendguardConfigV1::default()
    } else {
        attendguard_settings::parse_config_toml(&cfg_text)
            .with_context(|| format!("parse config: {config_path}"))?
    };
    let resolved =
        attendguard_settings::resolve_config(cfg, overrides).context("resolve config")?;

    let snapshot_text = std::fs::read_to_string(snapshot_path)
        .with_context(|| format!("read snapshot: {snapshot_path}"))?;
    let snapshot = Snapshot::from_json(&snapshot_text)
        .with_context(|| format!("parse snapshot: {snapshot_path}"))?;

    let request_text = std::fs::read_to_string(request_path)
        .with_context(|| format!("read request: {request_path}"))?;
    let request: EligibilityRequest = serde_json::from_str(&request_text)
        .with_context(|| format!("parse request: {request_path}"))?;

    let now = match now {
        Some(raw) => OffsetDateTime::parse(raw, &Rfc3339)
            .with_context(|| format!("parse --now as RFC 3339: {raw}"))?,
        None => OffsetDateTime::now_utc(),
    };

    let repo = InMemoryRepository::new(snapshot);
    let output = run_check(
        &repo,
        CheckInput {
            request: &request,
            now,
            config: &resolved,
        },
    )
    .await?;

    let mut json = serde_json::to_string_pretty(&output.result).context("serialize result")?;
    json.push('\n');
    if let Some(path) = out {
        write_text_file(path, &json).context("write result json")?;
    }
    print!("{json}");

    Ok(decision_exit_code(&output.result))
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

fn cmd_explain(code: &str) -> i32 {
    match run_explain(code) {
        ExplainOutput::Found(exp) => {
            print!("{}", attendguard_app::format_explanation(code, &exp));
            0
        }
        ExplainOutput::NotFound {
            code,
            available_codes,
        } => {
            eprint!(
                "{}",
                attendguard_app::format_not_found(&code, available_codes)
            );
            1
        }
    }
}
