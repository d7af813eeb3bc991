use mock_server::ServiceConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "4567".to_string());
    let addr = format!("127.0.0.1:{port}");
    let defaults = ServiceConfig::default();
    let config = ServiceConfig {
        api_key: std::env::var("API_KEY").unwrap_or(defaults.api_key),
        site_url: std::env::var("SITE_URL").unwrap_or_else(|_| format!("http://{addr}")),
    };

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    mock_server::run(listener, config).await
}
