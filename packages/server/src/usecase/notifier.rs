//! Broadcast primitives over the registry.
//!
//! Events are encoded once and the same payload is pushed to every target.
//! Targets missing from the registry are skipped silently.

use std::sync::Arc;

use crate::{
    domain::{BroadcastScope, ChannelName, ConnectionId, MessagePusher, Registry},
    infrastructure::dto::websocket::ServerEvent,
};

pub struct Notifier {
    message_pusher: Arc<dyn MessagePusher>,
    scope: BroadcastScope,
}

impl Notifier {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, scope: BroadcastScope) -> Self {
        Self {
            message_pusher,
            scope,
        }
    }

    /// Push `event` to a single connection.
    ///
    /// Returns `false` when the connection is gone or its transport is closed.
    pub fn notify_one(&self, registry: &Registry, id: &ConnectionId, event: &ServerEvent) -> bool {
        let Some(connection) = registry.lookup_connection(id) else {
            tracing::debug!("Connection '{}' is gone, skipping {}", id, event.type_name());
            return false;
        };
        let Some(payload) = encode(event) else {
            return false;
        };

        match self.message_pusher.push_to(connection, &payload) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{}", e);
                false
            }
        }
    }

    /// Push `event` to every connection in scope.
    ///
    /// With [`BroadcastScope::ProcessWide`] every registered connection is a
    /// target regardless of channel; with [`BroadcastScope::Channel`] only
    /// connections bound to `origin` are. Returns the number of successful pushes.
    pub fn notify_all(&self, registry: &Registry, origin: &ChannelName, event: &ServerEvent) -> usize {
        let Some(payload) = encode(event) else {
            return 0;
        };

        let mut delivered = 0;
        for connection in registry
            .connections()
            .filter(|connection| self.in_scope(&connection.channel, origin))
        {
            // 一部の送信失敗は許容
            match self.message_pusher.push_to(connection, &payload) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("{}", e),
            }
        }

        tracing::debug!(
            "Broadcasted {} from '{}' to {} connection(s)",
            event.type_name(),
            origin,
            delivered
        );
        delivered
    }

    fn in_scope(&self, channel: &ChannelName, origin: &ChannelName) -> bool {
        match self.scope {
            BroadcastScope::ProcessWide => true,
            BroadcastScope::Channel => channel == origin,
        }
    }
}

fn encode(event: &ServerEvent) -> Option<String> {
    match event.encode() {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::error!("Failed to encode {}: {}", event.type_name(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Avatar, Channel, Connection, ConnectionIdFactory, DisplayName, MessagePushError,
    };
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    // 送信内容を記録するだけの MessagePusher
    #[derive(Default)]
    struct RecordingPusher {
        pushed: Mutex<Vec<(ConnectionId, String)>>,
    }

    impl MessagePusher for RecordingPusher {
        fn push_to(&self, connection: &Connection, content: &str) -> Result<(), MessagePushError> {
            self.pushed
                .lock()
                .unwrap()
                .push((connection.id.clone(), content.to_string()));
            Ok(())
        }
    }

    fn register(registry: &mut Registry, channel: &ChannelName) -> ConnectionId {
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = ConnectionIdFactory::generate();
        registry.add_member(channel, id.clone()).unwrap();
        registry.register_connection(Connection::new(
            id.clone(),
            DisplayName::try_from("Alice").unwrap(),
            Avatar::try_from("a1").unwrap(),
            channel.clone(),
            tx,
        ));
        id
    }

    fn create_test_registry() -> (Registry, ChannelName, ChannelName) {
        let other = ChannelName::try_from("other").unwrap();
        let registry = Registry::new(vec![Channel::new(other.clone(), "Other")]);
        (registry, ChannelName::global(), other)
    }

    #[test]
    fn test_notify_one_pushes_to_target_only() {
        // テスト項目: notify_one は指定した接続にのみ送信する
        // given (前提条件):
        let (mut registry, global, _) = create_test_registry();
        let alice = register(&mut registry, &global);
        let _bob = register(&mut registry, &global);
        let pusher = Arc::new(RecordingPusher::default());
        let notifier = Notifier::new(pusher.clone(), BroadcastScope::ProcessWide);
        let event =
            ServerEvent::update_client_connections(registry.get_channel(&global).unwrap());

        // when (操作):
        let delivered = notifier.notify_one(&registry, &alice, &event);

        // then (期待する結果):
        assert!(delivered);
        let pushed = pusher.pushed.lock().unwrap();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].0, alice);
    }

    #[test]
    fn test_notify_one_skips_stale_target() {
        // テスト項目: 既に存在しない接続への送信は何もしない
        // given (前提条件):
        let (registry, global, _) = create_test_registry();
        let pusher = Arc::new(RecordingPusher::default());
        let notifier = Notifier::new(pusher.clone(), BroadcastScope::ProcessWide);
        let event =
            ServerEvent::update_client_connections(registry.get_channel(&global).unwrap());

        // when (操作):
        let delivered = notifier.notify_one(&registry, &ConnectionIdFactory::generate(), &event);

        // then (期待する結果):
        assert!(!delivered);
        assert!(pusher.pushed.lock().unwrap().is_empty());
    }

    #[test]
    fn test_notify_all_process_wide_reaches_every_channel() {
        // テスト項目: ProcessWide では全チャンネルの接続に同一のペイロードが届く
        // given (前提条件):
        let (mut registry, global, other) = create_test_registry();
        register(&mut registry, &global);
        register(&mut registry, &global);
        register(&mut registry, &other);
        let pusher = Arc::new(RecordingPusher::default());
        let notifier = Notifier::new(pusher.clone(), BroadcastScope::ProcessWide);
        let event = ServerEvent::send_client_message(registry.get_channel(&global).unwrap());

        // when (操作):
        let delivered = notifier.notify_all(&registry, &global, &event);

        // then (期待する結果):
        assert_eq!(delivered, 3);
        let pushed = pusher.pushed.lock().unwrap();
        assert_eq!(pushed.len(), 3);
        assert!(pushed.iter().all(|(_, payload)| payload == &pushed[0].1));
    }

    #[test]
    fn test_notify_all_channel_scope_stays_in_channel() {
        // テスト項目: Channel スコープでは発生元チャンネルの接続にのみ届く
        // given (前提条件):
        let (mut registry, global, other) = create_test_registry();
        let alice = register(&mut registry, &global);
        register(&mut registry, &other);
        let pusher = Arc::new(RecordingPusher::default());
        let notifier = Notifier::new(pusher.clone(), BroadcastScope::Channel);
        let event = ServerEvent::send_client_message(registry.get_channel(&global).unwrap());

        // when (操作):
        let delivered = notifier.notify_all(&registry, &global, &event);

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(pusher.pushed.lock().unwrap()[0].0, alice);
    }

    #[test]
    fn test_notify_all_tolerates_closed_transport() {
        // テスト項目: 一部の送信キューが閉じていても残りの接続には届く
        // given (前提条件):
        let (mut registry, global, _) = create_test_registry();
        let (closed_tx, closed_rx) = mpsc::unbounded_channel();
        drop(closed_rx);
        let closed = ConnectionIdFactory::generate();
        registry.add_member(&global, closed.clone()).unwrap();
        registry.register_connection(Connection::new(
            closed,
            DisplayName::try_from("Ghost").unwrap(),
            Avatar::try_from("a0").unwrap(),
            global.clone(),
            closed_tx,
        ));
        let (open_tx, mut open_rx) = mpsc::unbounded_channel();
        let open = ConnectionIdFactory::generate();
        registry.add_member(&global, open.clone()).unwrap();
        registry.register_connection(Connection::new(
            open,
            DisplayName::try_from("Alice").unwrap(),
            Avatar::try_from("a1").unwrap(),
            global.clone(),
            open_tx,
        ));
        let notifier = Notifier::new(
            Arc::new(crate::infrastructure::message_pusher::WebSocketMessagePusher::new()),
            BroadcastScope::ProcessWide,
        );
        let event =
            ServerEvent::update_client_connections(registry.get_channel(&global).unwrap());

        // when (操作):
        let delivered = notifier.notify_all(&registry, &global, &event);

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert!(open_rx.try_recv().is_ok());
    }
}
