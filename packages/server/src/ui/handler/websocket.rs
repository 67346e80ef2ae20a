//! WebSocket connection handlers.
//!
//! Every upgrade is accepted; the handshake parameters are validated once the
//! socket is open. A rejected handshake is answered with a close frame and
//! nothing else.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        rejection::QueryRejection,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::{ClientEvent, FrameDecodeError},
    ui::state::AppState,
    usecase::JoinRequest,
};

/// Query parameters for WebSocket connection
///
/// All fields are optional here so that a missing one is rejected by the
/// handshake (close frame) rather than by the extractor. A repeated key keeps
/// its first value; unknown keys are ignored.
#[derive(Debug, Default)]
pub struct ConnectQuery {
    pub name: Option<String>,
    pub lobby: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

impl FromIterator<(String, String)> for ConnectQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "lobby" => &mut query.lobby,
                "avatar" => &mut query.avatar,
                "password" => &mut query.password,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

impl From<ConnectQuery> for JoinRequest {
    fn from(query: ConnectQuery) -> Self {
        Self {
            name: query.name,
            lobby: query.lobby,
            avatar: query.avatar,
            password: query.password,
        }
    }
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> impl IntoResponse {
    let query: ConnectQuery = match query {
        Ok(Query(pairs)) => pairs.into_iter().collect(),
        Err(e) => {
            // Handled like missing parameters: the socket is closed after the upgrade.
            tracing::debug!("Unreadable query string: {}", e);
            ConnectQuery::default()
        }
    };
    ws.on_upgrade(move |socket| handle_socket(socket, state, query.into()))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the queue is closed (the connection left the registry)
/// or the socket can no longer be written to.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, request: JoinRequest) {
    // Create a queue for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();

    let connection_id = match state
        .connect_participant_usecase
        .execute(request, tx)
        .await
    {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Handshake rejected: {}", e);
            if let Err(e) = socket.send(Message::Close(None)).await {
                tracing::debug!("Failed to send close frame: {}", e);
            }
            return;
        }
    };

    let (sender, mut receiver) = socket.split();

    // setup-client is already queued; the writer delivers it first
    let mut send_task = pusher_loop(rx, sender);

    let connection_id_clone = connection_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive frames from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            let event = match msg {
                Message::Text(text) => ClientEvent::decode_text(text.as_str()),
                Message::Binary(bytes) => ClientEvent::decode_bytes(&bytes),
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    continue;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
            };

            handle_client_event(&state_clone, &connection_id_clone, event).await;
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await;
}

/// Apply one decoded inbound frame. Failures are logged and the frame dropped.
async fn handle_client_event(
    state: &AppState,
    connection_id: &ConnectionId,
    event: Result<ClientEvent, FrameDecodeError>,
) {
    match event {
        Ok(ClientEvent::NewClientMessage(content)) => {
            if let Err(e) = state
                .send_message_usecase
                .execute(connection_id, content.message)
                .await
            {
                tracing::warn!("Failed to send message from '{}': {}", connection_id, e);
            }
        }
        Err(e) => {
            tracing::warn!("Dropping frame from '{}': {}", connection_id, e);
        }
    }
}
