//! Binary entry point for the report generation service.

use std::env;

use tracing_subscriber::EnvFilter;

use reportgen::routes;
use reportgen::state::AppState;
use reportgen::store::ArtifactStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let output_dir =
        env::var("REPORTGEN_OUTPUT_DIR").unwrap_or_else(|_| "generated_reports".to_string());
    let addr = env::var("REPORTGEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let store = ArtifactStore::open(&output_dir)?;
    tracing::info!(dir = %store.dir().display(), "artifact store ready");

    let app = routes::router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
