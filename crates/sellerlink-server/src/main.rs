use anyhow::Result;
use clap::{Parser, Subcommand};
use sellerlink_client::SessionManager;
use sellerlink_core::TokenStore;
use sellerlink_mcp::Gateway;
use sellerlink_server::AppState;
use sellerlink_store::{FallbackTokenStore, MemoryTokenStore, RedisTokenStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sellerlink")]
#[command(about = "SellerLink - MCP tool gateway for seller-commerce APIs", version)]
struct Cli {
    /// Base URL of the seller-commerce API
    #[arg(long, env = "SELLERLINK_API_BASE")]
    api_base: String,

    /// Redis URL for the durable token cache; in-memory only when omitted
    #[arg(long, env = "SELLERLINK_REDIS_URL")]
    redis_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio
    Stdio,
    /// Serve MCP over HTTP (POST /mcp)
    Http {
        #[arg(long, env = "SELLERLINK_BIND", default_value = "127.0.0.1:8787")]
        addr: String,
    },
    /// Serve the REST auxiliary surface (probes and login/logout)
    Rest {
        #[arg(long, env = "SELLERLINK_BIND", default_value = "127.0.0.1:8788")]
        addr: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for the stdio MCP channel.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store: Arc<dyn TokenStore> = match cli.redis_url.as_deref() {
        Some(url) => {
            tracing::info!(url, "using Redis-backed token store with in-memory fallback");
            Arc::new(FallbackTokenStore::new(RedisTokenStore::open(url)?))
        }
        None => {
            tracing::info!("using in-memory token store");
            Arc::new(MemoryTokenStore::new())
        }
    };
    let sessions = Arc::new(SessionManager::new(store, cli.api_base));

    match cli.command {
        Commands::Stdio => {
            sellerlink_mcp::serve_stdio(Arc::new(Gateway::new(sessions))).await?;
        }
        Commands::Http { addr } => {
            sellerlink_mcp::serve_http(Arc::new(Gateway::new(sessions)), &addr).await?;
        }
        Commands::Rest { addr } => {
            sellerlink_server::restapi::serve(AppState::new(sessions), &addr).await?;
        }
    }
    Ok(())
}
