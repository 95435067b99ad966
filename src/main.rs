//! Student Spot development shell
//!
//! Serves the session core over HTTP against the in-memory identity
//! provider so a browser router can be developed without a real provider.

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use student_spot::adapters::http::{shell_router, ShellState};
use student_spot::adapters::{LoggingNavigator, MockIdentityGateway};
use student_spot::application::SessionStore;
use student_spot::config::{AppConfig, ServerConfig};
use student_spot::ports::IdentityGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    let dev_identity = config.auth.dev_identity()?;
    let mut gateway = MockIdentityGateway::new()
        .with_identity(dev_identity.clone())
        .with_latency(config.auth.popup_latency());
    if config.auth.restore_session {
        gateway = gateway.with_signed_in(dev_identity);
    }
    let gateway = Arc::new(gateway);

    let store = SessionStore::start(gateway.as_ref());

    // The provider confirms its initial state asynchronously.
    let announcer = Arc::clone(&gateway);
    let confirm_delay = config.auth.confirm_delay();
    tokio::spawn(async move {
        tokio::time::sleep(confirm_delay).await;
        announcer.announce();
    });

    let gateway: Arc<dyn IdentityGateway> = gateway;
    let state = ShellState::new(store.clone(), gateway, Arc::new(LoggingNavigator));
    let app = shell_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "shell listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.teardown();
    tracing::info!("shell stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.log_json {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "ctrl-c handler unavailable, running until killed");
        std::future::pending::<()>().await;
    }
}
