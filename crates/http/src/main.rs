mod route;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use camino::{Utf8Path, Utf8PathBuf};
use htmlblog_lib::{BlogConfig, BlogIndex};
use tracing::info;

async fn run() -> Result<()> {
    let mut args = std::env::args();
    let port = args
        .nth(1)
        .ok_or_else(|| anyhow!("Expected a port number as a first argument"))?;

    let config = match args.next() {
        Some(config_path) => BlogConfig::from_yaml_path(Utf8Path::new(&config_path))?,
        None => {
            let current_dir = Utf8PathBuf::try_from(std::env::current_dir()?)?;
            BlogConfig::new(current_dir)?
        }
    };

    let index = Arc::new(BlogIndex::new(config));
    let post_count = tokio::task::spawn_blocking({
        let index = index.clone();
        move || index.refresh()
    })
    .await??;
    info!("Indexed {post_count} posts");

    let app = route::router(index);

    let socket_addr_string = format!("0.0.0.0:{port}");
    info!("Binding to {socket_addr_string}");
    axum::Server::bind(&socket_addr_string.parse()?)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
