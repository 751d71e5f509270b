use clap::Parser;
use depot_core::{Config, ConfigOverrides};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Asset lifecycle service: reserve ids, sign upload and download URLs.
#[derive(Parser, Debug)]
#[command(name = "depot-api", version, about)]
struct Args {
    /// Bucket holding asset objects (overrides S3_BUCKET)
    #[arg(long)]
    bucket: Option<String>,

    /// Record store table (overrides ASSET_TABLE)
    #[arg(long)]
    table: Option<String>,

    /// Listen port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let config = Config::from_env()?.with_overrides(ConfigOverrides {
        bucket: args.bucket,
        table: args.table,
        port: args.port,
    });

    let (_state, router) = depot_api::setup::initialize_app(config.clone()).await?;

    depot_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
