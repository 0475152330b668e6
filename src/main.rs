//! Focus Timer - a single countdown timer controller
//!
//! This is the main entry point for the focus-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::expiry_alert_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, minutes={:?}, tick={}ms, clock={:?}",
        config.host, config.port, config.minutes, config.tick_ms, config.clock
    );

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.timer_settings(),
    ));

    // Present expiry alerts as they happen
    tokio::spawn(expiry_alert_task(state.controller.subscribe_expiry()));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  PUT  /duration - Set the duration input (minutes)");
    info!("  POST /start    - Start the countdown");
    info!("  POST /pause    - Pause or resume the countdown");
    info!("  POST /reset    - Reset the countdown");
    info!("  GET  /status   - Current timer state");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.controller.reset() {
        tracing::warn!("Failed to stop timer on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
