use tracing_subscriber::EnvFilter;

use agenthub_server::build_app;
use agenthub_server::config::ServerConfig;

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::load();
    init_tracing(&config.log_format);

    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            tracing::error!("{problem}");
        }
        std::process::exit(1);
    }

    let listen_addr = config.listen_addr.clone();
    let (app, state) = build_app(config);

    let listener = match tokio::net::TcpListener::bind(&listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %listen_addr, "Failed to bind: {e}");
            std::process::exit(1);
        },
    };
    tracing::info!(addr = %listen_addr, "AgentHub server listening");

    let shutdown = state.shutdown.clone();
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
            shutdown.cancel();
        })
        .await;
    if let Err(e) = result {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}
