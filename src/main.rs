// --- Generador de RPS / RPM / RUB - Archivo principal ---

use rpsgen::{run_server, AppConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("=== Generador RPS (API) ===");
    tracing::info!("Iniciando servidor en http://{}", config.bind_addr);
    run_server(config).await
}
