pub mod handlers;
pub mod types;

use axum::{routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::account::AccountStore;
use crate::commands::CommandAdapter;

/// Shared handles every request handler sees. The store serializes all
/// account access internally, so handlers run concurrently without any
/// locking of their own.
#[derive(Clone)]
pub struct RpcState {
    pub store: Arc<AccountStore>,
    pub adapter: Arc<CommandAdapter>,
    pub default_starting_credits: u64,
}

pub struct RpcServer {
    state: RpcState,
    bind_addr: String,
}

impl RpcServer {
    pub fn new(
        store: Arc<AccountStore>,
        adapter: Arc<CommandAdapter>,
        default_starting_credits: u64,
        port: u16,
    ) -> Self {
        Self {
            state: RpcState {
                store,
                adapter,
                default_starting_credits,
            },
            bind_addr: format!("0.0.0.0:{}", port),
        }
    }

    pub async fn start(self) {
        let app = Router::new()
            .route("/", post(handlers::handle_rpc_request))
            .layer(CorsLayer::permissive())
            .with_state(self.state);

        let listener = tokio::net::TcpListener::bind(&self.bind_addr)
            .await
            .expect("Failed to bind RPC server");

        info!("RPC server listening on {}", self.bind_addr);
        axum::serve(listener, app).await.expect("RPC server failed");
    }
}
