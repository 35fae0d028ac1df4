use myflix::app::{build_app, serve};
use myflix::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "myflix=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init().await?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&state.db).await {
        tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
    }

    // Provision the bucket before the listener binds so early uploads never
    // race startup. Best effort: a failure is logged and not retried, later
    // uploads fail individually until the bucket exists.
    if let Err(e) = state.storage.ensure_bucket().await {
        tracing::warn!(error = %e, "bucket provisioning failed; uploads will fail until the bucket exists");
    }

    let host = state.config.host.clone();
    let port = state.config.port;
    let app = build_app(state);
    serve(app, &host, port).await
}
