mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    let file_root = std::env::var("FILE_STORE_ROOT").unwrap_or_else(|_| "./files".into());
    let base_url = std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));
    let files = Arc::new(services::storage::LocalStore::new(file_root.clone().into()));
    tracing::info!(root = %file_root, "file store ready");

    let state = state::AppState::new(pool, files, base_url);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "redline gateway listening");
    axum::serve(listener, app).await.expect("server failed");
}
