#![forbid(unsafe_code)]

mod cors;
pub mod error;
mod extract;
mod handlers;
mod routes;

use std::future::Future;

use tokio::net::TcpListener;

pub use error::ApiError;
pub use routes::{AppState, router};

/// Serve the trivia API on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an I/O error if the listener fails.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "trivia api listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
