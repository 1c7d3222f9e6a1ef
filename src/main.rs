use crate::config::AppConfig;
use crate::server::create_server;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod agent;
pub mod config;
pub mod firecrawl;
pub mod handlers;
pub mod llm;
pub mod prompts;
pub mod server;
pub mod tools;

#[derive(Parser, Debug)]
#[command(name = "media-kit-search")]
#[command(about = "Media kit search API for Korean media outlets")]
struct Args {
    #[arg(long, env = "MEDIA_KIT_SERVER_PORT", default_value_t = 8000)]
    port: u16,
    /// Allow search-engine results, aggregator hubs and social pages as
    /// answers instead of official-site pages only.
    #[arg(long, env = "MEDIA_KIT_FLEXIBLE_POLICY")]
    flexible: bool,
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let app_config = AppConfig::from_env(args.flexible);
    info!(
        port = args.port,
        policy = ?app_config.policy,
        model = %app_config.model,
        "starting media kit search server"
    );

    let rocket_config = rocket::Config::figment().merge(("port", args.port));
    create_server(app_config).configure(rocket_config).launch().await?;
    Ok(())
}
