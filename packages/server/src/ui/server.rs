//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use hiroba_shared::time::Clock;
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::trace::TraceLayer;

use crate::{
    domain::{BroadcastScope, Registry},
    infrastructure::message_pusher::WebSocketMessagePusher,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetChannelDetailUseCase,
        GetChannelsUseCase, Notifier, SendMessageUseCase,
    },
};

use super::{
    handler::{get_channel_detail, get_channels, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Lobby relay server
///
/// # Example
///
/// ```ignore
/// let registry = Arc::new(Mutex::new(Registry::new(channels)));
/// let server = Server::new(registry, BroadcastScope::ProcessWide, Arc::new(SystemClock));
/// server.run("0.0.0.0".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    /// Wire the use cases around a shared registry.
    ///
    /// # Arguments
    ///
    /// * `registry` - The registry instance owned by this server
    /// * `scope` - Fanout scope for chat and membership broadcasts
    /// * `clock` - Time source for message timestamps
    pub fn new(registry: Arc<Mutex<Registry>>, scope: BroadcastScope, clock: Arc<dyn Clock>) -> Self {
        let notifier = Arc::new(Notifier::new(Arc::new(WebSocketMessagePusher::new()), scope));

        let app_state = Arc::new(AppState {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                registry.clone(),
                notifier.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                registry.clone(),
                notifier.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                registry.clone(),
                notifier,
                clock,
            )),
            get_channels_usecase: Arc::new(GetChannelsUseCase::new(registry.clone())),
            get_channel_detail_usecase: Arc::new(GetChannelDetailUseCase::new(registry)),
        });

        Self { app_state }
    }

    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/channels", get(get_channels))
            .route("/api/channels/{name}", get(get_channel_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the server until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Lobby relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?name=..&lobby=global&avatar=..", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
