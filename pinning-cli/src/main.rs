//! Pinning CLI
//!
//! Command-line interface for IPFS pinning providers, backed by Pinata.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pinning_core::{ContentOpts, ContentStream, ItemStatistics, PinningError, Provider};
use pinning_pinata::{GatewayResolver, PinataConfig, PinataProvider};

/// Pin, list, and resolve IPFS content on a pinning service
#[derive(Parser, Debug)]
#[command(name = "pinning")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Pinata account credentials.
#[derive(Args, Debug)]
struct Credentials {
    /// Pinata API key
    #[arg(long, env = "PINATA_API_KEY", hide_env_values = true)]
    api_key: String,
    /// Pinata API secret
    #[arg(long, env = "PINATA_API_SECRET", hide_env_values = true)]
    api_secret: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the service accepts the credentials
    Ping {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// List all pinned content
    List {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Show a single pinned item
    Stat {
        /// Content hash
        hash: String,
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Show account totals
    Stats {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Upload and pin a file
    Add {
        /// File to upload
        file: PathBuf,
        /// Display name (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
        /// Wrap the file in a directory
        #[arg(long)]
        wrap_with_directory: bool,
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Pin existing content by hash
    Pin {
        /// Content hash
        hash: String,
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Remove a pin
    Unpin {
        /// Content hash
        hash: String,
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Resolve a content address to a gateway URL (no credentials needed)
    Gateway {
        /// CID, multiaddr, ipfs:// or ipns:// URI, or another gateway's URL
        input: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pinning=debug,info"
    } else {
        "pinning=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PinataConfig::from_env().context("Invalid Pinata configuration")?;
    let json = cli.json;

    match cli.command {
        Commands::Ping { credentials } => cmd_ping(&credentials, config).await,
        Commands::List { credentials } => {
            let provider = connect(&credentials, config).await?;
            cmd_list(&*provider, json).await
        }
        Commands::Stat { hash, credentials } => {
            let provider = connect(&credentials, config).await?;
            cmd_stat(&*provider, &hash, json).await
        }
        Commands::Stats { credentials } => {
            let provider = connect(&credentials, config).await?;
            cmd_stats(&*provider, json).await
        }
        Commands::Add {
            file,
            name,
            wrap_with_directory,
            credentials,
        } => {
            let provider = connect(&credentials, config).await?;
            let opts = ContentOpts {
                store_in_directory: wrap_with_directory,
            };
            cmd_add(&*provider, &file, name, opts, json).await
        }
        Commands::Pin { hash, credentials } => {
            let provider = connect(&credentials, config).await?;
            provider.pin(&hash).await.context("Failed to pin hash")?;
            println!("{} {}", "✅ Pinned".green(), hash);
            Ok(())
        }
        Commands::Unpin { hash, credentials } => {
            let provider = connect(&credentials, config).await?;
            provider.unpin(&hash).await.context("Failed to unpin hash")?;
            println!("{} {}", "✅ Unpinned".green(), hash);
            Ok(())
        }
        Commands::Gateway { input } => cmd_gateway(&config, &input),
    }
}

async fn connect(credentials: &Credentials, config: PinataConfig) -> Result<Box<dyn Provider>> {
    let provider = open(credentials, config).await?;
    Ok(Box::new(provider))
}

async fn open(credentials: &Credentials, config: PinataConfig) -> Result<PinataProvider> {
    let provider = PinataProvider::with_config(&credentials.api_key, &credentials.api_secret, config)
        .await
        .map_err(|e| {
            let context = connect_failure(&e);
            anyhow::Error::new(e).context(context)
        })?;

    let config = provider.config();
    tracing::debug!(
        api_url = %config.api_url,
        gateway_url = %config.gateway_url,
        timeout_seconds = ?config.timeout_seconds,
        "Connected"
    );
    Ok(provider)
}

fn connect_failure(err: &PinningError) -> &'static str {
    if err.is_service_error() {
        "Pinata rejected the credentials"
    } else if err.is_recoverable() {
        "Pinata is unreachable; try again later"
    } else {
        "Failed to connect to Pinata"
    }
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Check credentials
async fn cmd_ping(credentials: &Credentials, config: PinataConfig) -> Result<()> {
    open(credentials, config).await?;
    println!("{}", "✅ Credentials accepted".green().bold());
    Ok(())
}

/// List pinned content
async fn cmd_list(provider: &dyn Provider, json: bool) -> Result<()> {
    let pb = spinner("Listing pins...")?;
    let items = provider.list().await;
    pb.finish_and_clear();
    let items = items.context("Failed to list pins")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("{}", "No pinned content.".yellow());
        return Ok(());
    }

    for item in &items {
        print_item(item);
    }
    println!("\n{} {}", "Total:".dimmed(), items.len());
    Ok(())
}

/// Show one pinned item
async fn cmd_stat(provider: &dyn Provider, hash: &str, json: bool) -> Result<()> {
    let item = match provider.item_stats(hash).await {
        Ok(item) => item,
        Err(e) if e.is_not_found() => {
            println!("{} {}", "Not pinned:".yellow(), hash);
            return Ok(());
        }
        Err(e) => return Err(anyhow::Error::new(e).context(format!("Failed to look up {}", hash))),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        print_item(&item);
    }
    Ok(())
}

/// Show account totals
async fn cmd_stats(provider: &dyn Provider, json: bool) -> Result<()> {
    let stats = provider.service_stats().await.context("Failed to read statistics")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("   {} {}", "Pinned items:".dimmed(), stats.items);
        println!("   {} {} bytes", "Total size:".dimmed(), stats.size);
    }
    Ok(())
}

/// Upload a file
async fn cmd_add(
    provider: &dyn Provider,
    file: &Path,
    name: Option<String>,
    opts: ContentOpts,
    json: bool,
) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .context("Cannot derive a name from the file path; pass --name")?,
    };

    let stream: ContentStream = Box::new(
        tokio::fs::File::open(file)
            .await
            .with_context(|| format!("Failed to open {}", file.display()))?,
    );

    let pb = spinner("Uploading...")?;
    let hash = provider.pin_content(&name, Some(stream), Some(&opts)).await;
    pb.finish_and_clear();
    let hash = hash.context("Failed to pin content")?;

    if json {
        println!("{}", serde_json::json!({ "name": name, "hash": hash }));
    } else {
        println!("{} {}", "✅ Pinned".green().bold(), name);
        println!("   {} {}", "Hash:".dimmed(), hash);
        if let Ok(url) = provider.gateway_url(&hash) {
            println!("   {} {}", "URL:".dimmed(), url);
        }
    }
    Ok(())
}

/// Resolve a gateway URL
fn cmd_gateway(config: &PinataConfig, input: &str) -> Result<()> {
    let resolver = GatewayResolver::new(&config.gateway_url);
    let url = resolver
        .resolve(input)
        .with_context(|| format!("Cannot resolve '{}'", input))?;
    println!("{}", url);
    Ok(())
}

fn print_item(item: &ItemStatistics) {
    match &item.name {
        Some(name) => println!("{}  {:>12}  {}", item.hash.yellow(), item.size, name),
        None => println!("{}  {:>12}", item.hash.yellow(), item.size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gateway_without_credentials() {
        let cli = Cli::try_parse_from(["pinning", "gateway", "ipfs://QmHash"]).unwrap();
        assert!(matches!(cli.command, Commands::Gateway { ref input } if input == "ipfs://QmHash"));
    }

    #[test]
    fn test_parse_add_with_flags() {
        let cli = Cli::try_parse_from([
            "pinning",
            "--json",
            "add",
            "notes.txt",
            "--name",
            "my notes",
            "--wrap-with-directory",
            "--api-key",
            "k",
            "--api-secret",
            "s",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Add {
                file,
                name,
                wrap_with_directory,
                credentials,
            } => {
                assert_eq!(file, PathBuf::from("notes.txt"));
                assert_eq!(name.as_deref(), Some("my notes"));
                assert!(wrap_with_directory);
                assert_eq!(credentials.api_key, "k");
                assert_eq!(credentials.api_secret, "s");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_connect_failure_context() {
        assert_eq!(
            connect_failure(&PinningError::Authentication("Invalid API key / secret key combo".into())),
            "Pinata rejected the credentials"
        );
        assert_eq!(
            connect_failure(&PinningError::HttpError("connection refused".into())),
            "Pinata is unreachable; try again later"
        );
        assert_eq!(
            connect_failure(&PinningError::ConfigError("bad url".into())),
            "Failed to connect to Pinata"
        );
    }

    #[test]
    fn test_gateway_command_resolves_offline() {
        let config = PinataConfig::default();
        assert!(cmd_gateway(&config, "QmbydiPQXL6YYMbsArTVVg9jjK9RzUbjUYX1xiw6XYwDoD").is_ok());
        assert!(cmd_gateway(&config, "bad").is_err());
    }
}
