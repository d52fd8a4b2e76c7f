use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod config;
mod media;
mod server;

use config::Config;
use media::MediaResolver;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP extraction service (default)
    Serve {
        /// Address to bind, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overrides the config file and PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Resolve a single page URL and print the stream as JSON
    Resolve {
        /// Page URL to resolve
        url: String,
    },
}

fn load_config(args: &Args) -> Result<(Config, Option<String>)> {
    let path = config::find_config_path(args.config.as_deref());
    let mut config = match &path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => Config::default(),
    };
    config.apply_env_overrides()?;
    Ok((config, path))
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    // stdout is reserved for `resolve` output
    if config.get_logging_format() == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (mut config, config_path) = load_config(&args)?;

    init_logging(&config);

    info!("Starting Fluxo...");
    match &config_path {
        Some(path) => info!("Loaded config from: {}", path),
        None => info!("No config file found, using defaults"),
    }

    let resolver = MediaResolver::new(&config.extractor);

    match args.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            config.server.override_with(host, port);

            if let Err(e) = resolver.test_setup().await {
                warn!("Metadata extractor test failed: {}", e);
            }

            server::run(&config.server, resolver).await
        }
        Command::Resolve { url } => {
            let stream = resolver.resolve(&url).await?;
            println!("{}", serde_json::to_string_pretty(&stream)?);
            Ok(())
        }
    }
}
