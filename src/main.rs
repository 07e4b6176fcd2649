use std::sync::Arc;

use clap::Parser;
use tracing::info;

use stockroom::{App, Config, PhotoStore, Server, routes};

#[tokio::main]
async fn main() -> stockroom::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::parse();

    let cache_dir = std::path::absolute(&config.cache)?;
    if !cache_dir.exists() {
        std::fs::create_dir_all(&cache_dir)?;
        info!(dir = %cache_dir.display(), "created cache directory");
    }

    let app = Arc::new(App::new(PhotoStore::new(cache_dir)));
    Server::bind(config.addr()).serve(routes::router(), app).await
}
