use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;
use usermgmt::{
    Config, InMemoryUserStore, RequestDispatcher, UserService, api::handlers::api_routes,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration is read once and handed down explicitly
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("Starting with {:?}", config);

    let storage = InMemoryUserStore::new(config.store.clone());
    let service = UserService::new(storage);
    let dispatcher = Arc::new(RequestDispatcher::new(service, config.transport_mode));

    let app = api_routes(dispatcher)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
