//! Lark CLI - document and whiteboard operations from the terminal

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use lark_lib::drive::{
    ContentType, ConvertDocxBlockReq, CreateWhiteboardPlantUmlReq, DownloadWhiteboardImageReq,
};
use lark_lib::{ApiClient, ApiError, ClientConfig, EnvTokenProvider};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lark")]
#[command(about = "Call Lark document and whiteboard APIs", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown or HTML into document blocks and print them as JSON
    Convert {
        /// Source file (use "-" to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Format of the source
        #[arg(long, value_name = "TYPE", default_value = "markdown")]
        content_type: ContentType,
    },

    /// Add a PlantUML diagram to a whiteboard
    Plantuml {
        #[arg(value_name = "WHITEBOARD_ID")]
        whiteboard_id: String,

        /// PlantUML source file (use "-" to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Download a whiteboard as an image
    Download {
        #[arg(value_name = "WHITEBOARD_ID")]
        whiteboard_id: String,

        /// Output path [default: filename sent by the server]
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,lark_lib=info".to_string(),
            2 => "info,lark_lib=debug".to_string(),
            _ => "debug,lark_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .wrap_err("failed to read stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}

/// Adds the envelope code and log id to domain errors so they can be
/// quoted to Lark support.
fn explain(error: ApiError) -> color_eyre::Report {
    let context = match &error {
        ApiError::Domain(domain) => Some(format!(
            "Lark rejected the call (code {}, log id {})",
            domain.code,
            domain.log_id().unwrap_or("-")
        )),
        _ => None,
    };

    let report = eyre!(error);
    match context {
        Some(context) => report.wrap_err(context),
        None => report,
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::from_env().wrap_err("invalid Lark configuration")?;
    tracing::debug!(base_url = %config.base_url, "using Lark endpoint");

    let client = ApiClient::from_config(config, EnvTokenProvider::default()).map_err(explain)?;
    let drive = client.drive();

    match cli.command {
        Commands::Convert { file, content_type } => {
            let content = read_source(&file)?;
            let request = ConvertDocxBlockReq::new(content_type, content);
            let reply = drive
                .convert_docx_block(&request, None)
                .await
                .map_err(explain)?;

            let payload = reply.into_data().unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }

        Commands::Plantuml {
            whiteboard_id,
            file,
        } => {
            let code = read_source(&file)?;
            let request = CreateWhiteboardPlantUmlReq::new(&whiteboard_id, code);
            let reply = drive
                .create_whiteboard_plantuml(&request, None)
                .await
                .map_err(explain)?;

            tracing::info!(whiteboard_id = %whiteboard_id, log_id = ?reply.meta.log_id, "PlantUML node created");
            println!("{}", serde_json::to_string_pretty(&reply.into_data().unwrap_or_default())?);
        }

        Commands::Download { whiteboard_id, out } => {
            let request = DownloadWhiteboardImageReq::new(&whiteboard_id);
            let file = drive
                .download_whiteboard_image(&request, None)
                .await
                .map_err(explain)?
                .into_data()
                .ok_or_else(|| eyre!("server returned no image for {whiteboard_id}"))?;

            let target = match out {
                Some(path) => path,
                None if !file.filename.is_empty() => PathBuf::from(&file.filename),
                None => PathBuf::from(format!("{whiteboard_id}.png")),
            };

            file.write_to(&target)
                .wrap_err_with(|| format!("failed to write {}", target.display()))?;
            println!("{} ({} bytes)", target.display(), file.len());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    run(cli).await
}
