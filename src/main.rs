use std::{net::SocketAddr, sync::Arc, time::Duration};

use korsvagen_server::{
    app,
    config::AppConfig,
    db::{connect, sync_schema},
    logging::init_tracing,
    services::auth_service,
    state::AppState,
};

const SESSION_REAPER_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env()?;
    init_tracing(&cfg.logging.rust_log);

    let database = cfg
        .database
        .clone()
        .ok_or_else(|| anyhow::anyhow!("database configuration is required"))?;
    let auth = cfg
        .auth
        .clone()
        .ok_or_else(|| anyhow::anyhow!("auth configuration is required"))?;

    let db = connect(&database).await?;
    sync_schema(&db).await?;

    let state = AppState::new(auth, db);
    auth_service::seed_admin(&state).await?;

    spawn_session_reaper(Arc::clone(&state));

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port).parse()?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

/// Expired and revoked sessions are cleaned up here on a timer, never while
/// serving a request.
fn spawn_session_reaper(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_REAPER_INTERVAL);
        loop {
            ticker.tick().await;
            match state.daos.sessions.delete_dead_sessions().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "pruned dead sessions"),
                Err(err) => tracing::warn!("session pruning failed: {err}"),
            }
        }
    });
}
