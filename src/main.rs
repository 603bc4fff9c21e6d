use std::path::PathBuf;

use library_mcp::config::LibraryConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdoutはMCPプロトコル専用のため、ログはstderrへ
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = LibraryConfig::from_env(std::env::args().nth(1).map(PathBuf::from));

    library_mcp::interface::mcp::run(config).await
}
