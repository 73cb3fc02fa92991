use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alinea_api::config::ServerConfig;
use alinea_api::router::build_app_router;
use alinea_api::state::AppState;
use alinea_notify::{
    ReminderService, TodoistClient, TodoistConfig, TodoistSyncScheduler, TwilioConfig,
    TwilioGateway,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alinea_api=debug,alinea_notify=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = alinea_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    alinea_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    alinea_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- WhatsApp reminder scheduler ---
    let reminder_cancel = CancellationToken::new();
    let reminder_handle = match TwilioConfig::from_env() {
        Some(twilio_config) => {
            let service = ReminderService::new(pool.clone(), TwilioGateway::new(twilio_config));
            let interval = Duration::from_secs(config.reminder_check_interval_secs);
            let cancel = reminder_cancel.clone();
            tracing::info!(
                interval_secs = config.reminder_check_interval_secs,
                "Aligner reminder scheduler started"
            );
            Some(tokio::spawn(async move {
                service.run(interval, cancel).await;
            }))
        }
        None => {
            tracing::warn!(
                "Twilio credentials not configured; aligner change reminders are disabled"
            );
            None
        }
    };

    // --- Todoist integration ---
    let todoist_config = TodoistConfig::from_env();
    let todoist_client = todoist_config
        .clone()
        .map(|c| Arc::new(TodoistClient::new(c)));

    let sync_cancel = CancellationToken::new();
    let sync_handle = match todoist_config {
        Some(todoist_config) => {
            let scheduler =
                TodoistSyncScheduler::new(pool.clone(), TodoistClient::new(todoist_config));
            let interval = Duration::from_secs(config.todoist_sync_interval_secs);
            let cancel = sync_cancel.clone();
            tracing::info!(
                interval_secs = config.todoist_sync_interval_secs,
                "Todoist sync scheduler started"
            );
            Some(tokio::spawn(async move {
                scheduler.run(interval, cancel).await;
            }))
        }
        None => {
            tracing::warn!("TODOIST_API_TOKEN not set; Todoist task sync is disabled");
            None
        }
    };

    // --- App state and router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        todoist: todoist_client,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    reminder_cancel.cancel();
    if let Some(handle) = reminder_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Reminder scheduler stopped");
    }

    sync_cancel.cancel();
    if let Some(handle) = sync_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Todoist sync scheduler stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
