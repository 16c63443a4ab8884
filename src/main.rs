use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use support_matrix::catalog::EolCatalogClient;
use support_matrix::catalog::fallback::fallback_versions;
use support_matrix::config::resolve_config;
use support_matrix::constraint::{normalize, parse_constraints};
use support_matrix::matrix::{SupportMatrix, compute_offline_support_matrix, compute_support_matrix};
use support_matrix::tool_version::detect_tool_version;

#[derive(Parser)]
#[command(name = "support-matrix")]
#[command(version, about = "Resolve the runtime versions a project should be tested against")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON config file (defaults to $XDG_CONFIG_HOME/support-matrix/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the end-of-life feed URL
    #[arg(long, global = true)]
    feed_url: Option<String>,

    /// Skip the feed and use the built-in fallback list
    #[arg(long, global = true)]
    offline: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a constraint expression into a support matrix
    Resolve {
        expr: String,
        #[arg(long)]
        json: bool,
    },
    /// List release lines that have not reached end of life
    Supported {
        #[arg(long)]
        json: bool,
    },
    /// Show the end-of-life status of a single release line
    Eol { cycle: String },
    /// Print the normalized form of a constraint expression
    Normalize { expr: String },
    /// Report the version of a local runtime
    ToolVersion {
        #[arg(default_value = "python3")]
        program: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_logging(format: LogFormat, log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let (non_blocking, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none());

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }

    Ok(guard)
}

fn print_versions(versions: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(versions)?);
    } else {
        for version in versions {
            println!("{version}");
        }
    }
    Ok(())
}

fn print_matrix(matrix: &SupportMatrix, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(matrix)?);
        Ok(())
    } else {
        print_versions(&matrix.versions, false)
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(feed_url) = cli.feed_url {
        config.feed_url = feed_url;
    }

    match cli.command {
        Command::Resolve { expr, json } if cli.offline => {
            print_matrix(&compute_offline_support_matrix(&expr)?, json)
        }
        Command::Resolve { expr, json } => {
            let client = EolCatalogClient::from_config(&config)?;
            print_matrix(&compute_support_matrix(&expr, &client).await?, json)
        }
        Command::Supported { json } if cli.offline => print_versions(&fallback_versions(), json),
        Command::Supported { json } => {
            let client = EolCatalogClient::from_config(&config)?;
            print_versions(&client.supported_versions().await?, json)
        }
        Command::Eol { .. } if cli.offline => {
            anyhow::bail!("The eol command needs the feed and cannot run with --offline")
        }
        Command::Eol { cycle } => {
            let client = EolCatalogClient::from_config(&config)?;
            let catalog = client.fetch().await?;
            let status = client.is_eol(&cycle, &catalog);
            let support = match client.active_support_ended(&cycle, &catalog) {
                Some(true) => ", active support ended",
                Some(false) => ", in active support",
                None => "",
            };
            if status.is_eol() {
                println!("{cycle}: end of life ({}){support}", status.since());
            } else {
                println!("{cycle}: supported{support}");
            }
            Ok(())
        }
        Command::Normalize { expr } => {
            let normalized = normalize(&expr);
            parse_constraints(&normalized)?;
            println!("{normalized}");
            Ok(())
        }
        Command::ToolVersion { program } => {
            let version = detect_tool_version(&program, &["--version"])
                .with_context(|| format!("Failed to run {program} --version"))?;
            println!("{version}");
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_format, cli.log_file.as_deref())?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
