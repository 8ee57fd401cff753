//! HTTP surface: four routes over a shared [`Bridge`].

pub mod handlers;
pub mod views;

// std
use std::net::SocketAddr;
// crates.io
use axum::{
	Router,
	routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
// self
use crate::{_prelude::*, flows::Bridge};

/// Builds the application router.
pub fn router(bridge: Arc<Bridge>) -> Router {
	Router::new()
		.route("/", get(handlers::index))
		.route("/create_link_token", post(handlers::create_link_token))
		.route("/exchange_public_token", post(handlers::exchange_public_token))
		.route("/transactions", get(handlers::transactions))
		.layer(TraceLayer::new_for_http())
		.with_state(bridge)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(addr: SocketAddr, bridge: Arc<Bridge>) -> std::io::Result<()> {
	let listener = TcpListener::bind(addr).await?;

	tracing::info!(addr = %listener.local_addr()?, "Listening.");

	axum::serve(listener, router(bridge)).with_graceful_shutdown(shutdown_signal()).await
}

async fn shutdown_signal() {
	match tokio::signal::ctrl_c().await {
		Ok(()) => tracing::info!("Shutdown signal received."),
		Err(e) => tracing::error!(error = %e, "Failed to listen for the shutdown signal."),
	}
}
