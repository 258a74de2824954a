use std::sync::Arc;

use anyhow::Result;
use foyer_core::assets::EmbeddedTree;
use foyer_core::config::load_config;
use foyer_core::resolver::SpaResolver;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use foyer_web::assets::{spa_handler, Assets};
use foyer_web::routes::api_router;
use foyer_web::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = load_config()?;
    let resolver = SpaResolver::new(config, EmbeddedTree::<Assets>::new())?;
    if resolver.dev_mode() {
        tracing::info!(
            "running in dev mode; frontend requests proxied to {}",
            resolver.proxy_target()
        );
    }

    let state = AppState {
        resolver: Arc::new(resolver),
        client: reqwest::Client::new(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api_router()
        .fallback(spa_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
