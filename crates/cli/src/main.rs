use burrow_dns_infrastructure::dns::{
    run_udp_server, CacheMaintenance, NetExchange, RecordCache, RecursiveResolver,
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "burrow-dns")]
#[command(version)]
#[command(about = "Recursive DNS resolver")]
struct Cli {
    /// Address to listen on for DNS queries
    #[arg(short, long, default_value = "0.0.0.0:53")]
    bind: SocketAddr,

    /// Upstream exchange timeout in seconds
    #[arg(long, default_value_t = 3)]
    timeout_secs: u64,

    /// Cache sweep interval in seconds
    #[arg(long, default_value_t = 60)]
    sweep_interval_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    info!("starting burrow-dns v{}", env!("CARGO_PKG_VERSION"));

    let cache = Arc::new(RecordCache::new());
    let exchange = Arc::new(NetExchange::new(Duration::from_secs(cli.timeout_secs)));
    let resolver = Arc::new(RecursiveResolver::new(Arc::clone(&cache), exchange));

    let shutdown = CancellationToken::new();
    CacheMaintenance::new(Arc::clone(&cache))
        .with_interval(Duration::from_secs(cli.sweep_interval_secs))
        .with_cancellation(shutdown.clone())
        .spawn();

    tokio::select! {
        result = run_udp_server(cli.bind, resolver) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    shutdown.cancel();
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
