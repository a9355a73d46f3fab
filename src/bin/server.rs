//! Schedule-Match HTTP Server Binary
//!
//! This is the main entry point for the schedule-match REST API server.
//! It initializes the repository, sets up the HTTP router, and starts
//! serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin schedmatch-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use schedmatch_rust::db::repositories::LocalRepository;
use schedmatch_rust::db::repository::FullRepository;
use schedmatch_rust::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Schedule-Match HTTP Server");

    // In-memory storage; state lives for the lifetime of the process.
    let repository = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
    info!("Repository initialized successfully");

    // Create application state
    let state = AppState::new(repository);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
