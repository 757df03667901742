//! CLI entry point for govguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `govguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use govguard_app::{
    CheckInput, ExplainOutput, render_log, render_markdown, run_check, run_explain,
    serialize_report, verdict_exit_code,
};
use govguard_settings::Overrides;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "govguard",
    version,
    about = "Compliance rule evaluation for governed tabular datasets"
)]
struct Cli {
    /// Path to govguard config TOML. A missing file means defaults.
    #[arg(long, default_value = "govguard.toml")]
    config: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate every compliance rule and print the dashboard log.
    Check {
        /// Override the rules file (relative to the current directory).
        #[arg(long)]
        rules: Option<Utf8PathBuf>,

        /// Override the database queries are scoped to.
        #[arg(long)]
        database: Option<String>,

        /// Override the per-query timeout in seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Override how many rules are evaluated at the same time.
        #[arg(long)]
        concurrency: Option<usize>,

        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Where to write a Markdown summary.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,

        /// Also write the dashboard log to this file.
        #[arg(long)]
        log_out: Option<Utf8PathBuf>,
    },

    /// Explain a rule kind and the parameters it accepts.
    Explain {
        /// The rule kind (e.g., "access_policy_violation").
        identifier: String,
    },
}

struct CheckArgs {
    rules: Option<Utf8PathBuf>,
    database: Option<String>,
    timeout_secs: Option<u64>,
    concurrency: Option<usize>,
    report_out: Option<Utf8PathBuf>,
    markdown_out: Option<Utf8PathBuf>,
    log_out: Option<Utf8PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "govguard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Check {
            rules,
            database,
            timeout_secs,
            concurrency,
            report_out,
            markdown_out,
            log_out,
        } => {
            let args = CheckArgs {
                rules,
                database,
                timeout_secs,
                concurrency,
                report_out,
                markdown_out,
                log_out,
            };
            match cmd_check(&cli.config, args).await {
                Ok(0) => Ok(()),
                Ok(code) => std::process::exit(code),
                Err(err) => {
                    tracing::error!(error = %format!("{err:#}"), "check aborted");
                    eprintln!("govguard error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

async fn cmd_check(config: &Utf8Path, args: CheckArgs) -> anyhow::Result<i32> {
    // Load config if present; missing file is allowed (defaults apply).
    let cfg_text = std::fs::read_to_string(config).unwrap_or_default();
    let base_dir = match config.parent() {
        Some(p) if !p.as_str().is_empty() => p.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };

    let rules = match args.rules {
        Some(path) => Some(absolute(&path)?.into_string()),
        None => None,
    };
    let overrides = Overrides {
        rules,
        database: args.database,
        timeout_secs: args.timeout_secs,
        concurrency: args.concurrency,
    };

    let output = run_check(CheckInput {
        base_dir: &base_dir,
        config_text: &cfg_text,
        overrides,
        store: None,
    })
    .await?;

    let log = render_log(&output.report);
    print!("{log}");

    if let Some(path) = &args.log_out {
        write_text_file(path, &log).context("write log")?;
    }
    if let Some(path) = &args.report_out {
        let data = serialize_report(&output.report)?;
        write_bytes_file(path, &data).context("write report json")?;
    }
    if let Some(path) = &args.markdown_out {
        write_text_file(path, &render_markdown(&output.report)).context("write markdown")?;
    }

    Ok(verdict_exit_code(
        &output.report,
        output.resolved_config.fail_on_violation,
    ))
}

fn absolute(path: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("read current directory")?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("current directory is not UTF-8: {}", p.display()))?;
    Ok(cwd.join(path))
}

fn write_bytes_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data).with_context(|| format!("write file: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes_file(path, text.as_bytes())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", govguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_kinds,
        } => {
            eprint!(
                "{}",
                govguard_app::format_not_found(&identifier, available_kinds)
            );
            std::process::exit(1);
        }
    }
}
