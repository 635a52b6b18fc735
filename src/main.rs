use std::sync::Arc;

use tokio::sync::RwLock;

use chatfunnel::chat::{self, ChatBackendConfig, PreviewBridge};
use chatfunnel::config::FunnelConfig;
use chatfunnel::funnel::routes::{FunnelRouteState, funnel_routes};
use chatfunnel::funnel::{ConfigurationStore, WizardController};
use chatfunnel::plans::SubscriptionSelector;
use chatfunnel::store::{KeyValueStore, LibSqlStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = FunnelConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export CHATBOT_BACKEND_URL=http://...");
        std::process::exit(1);
    });

    eprintln!("🚀 chatfunnel v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.backend_endpoint);
    eprintln!("   Trial quota: {} messages", config.trial_max_messages);
    eprintln!("   API: http://0.0.0.0:{}/api/funnel/status", config.port);

    // ── Durable store ────────────────────────────────────────────────
    let store: Arc<dyn KeyValueStore> = Arc::new(
        LibSqlStore::new_local(std::path::Path::new(&config.db_path))
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error: Failed to open store at {}: {}", config.db_path, e);
                std::process::exit(1);
            }),
    );
    eprintln!("   Store: {}", config.db_path);

    // ── Funnel core ──────────────────────────────────────────────────
    let configuration = ConfigurationStore::new(store);
    let controller = Arc::new(
        WizardController::new(configuration.clone(), config.trial_max_messages).await,
    );

    let backend = chat::create_backend(&ChatBackendConfig {
        endpoint: config.backend_endpoint.clone(),
        api_key: config.backend_api_key.clone(),
        timeout: config.backend_timeout,
    })?;
    let bridge = Arc::new(PreviewBridge::new(
        backend,
        configuration,
        controller.guard(),
    ));

    let state = FunnelRouteState {
        controller,
        bridge,
        selector: Arc::new(RwLock::new(SubscriptionSelector::new())),
    };

    // ── Server ───────────────────────────────────────────────────────
    let app = funnel_routes(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Funnel server started");
    axum::serve(listener, app).await?;

    Ok(())
}
