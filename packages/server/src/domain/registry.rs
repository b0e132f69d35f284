//! The registry of admitted clients and the fan-out over it.
//!
//! `Registry` is a plain synchronous model. It is never shared directly; the
//! infrastructure layer keeps it behind a single lock so that insertion,
//! removal and fan-out are each one critical section.

use std::collections::HashMap;

use hiroba_shared::protocol::frame_line;
use tokio::sync::mpsc::error::TrySendError;

use super::{ClientEntry, ConnectionId, DisplayName, RegistryError, RelayMessage};

/// Outcome of one fan-out pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FanOut {
    /// Number of recipients the payload was queued for
    pub delivered: usize,
    /// Recipients whose outbox was closed or full; they are due for removal
    pub failed: Vec<ConnectionId>,
}

/// Outcome of removing a registered client
#[derive(Debug, PartialEq, Eq)]
pub struct Departure {
    /// Name of the client that left
    pub name: DisplayName,
    /// Recipients the departure notice could not be delivered to
    pub failed: Vec<ConnectionId>,
}

/// Mapping of live connections to their client entries.
///
/// A connection is present iff it completed its handshake and has not been
/// removed yet.
#[derive(Debug, Default)]
pub struct Registry {
    clients: HashMap<ConnectionId, ClientEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a connection that completed its handshake.
    pub fn insert(&mut self, id: ConnectionId, entry: ClientEntry) -> Result<(), RegistryError> {
        if self.clients.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        self.clients.insert(id, entry);
        Ok(())
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.clients.contains_key(id)
    }

    pub fn name_of(&self, id: &ConnectionId) -> Option<&DisplayName> {
        self.clients.get(id).map(|entry| &entry.name)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Queue `message` for every registered client except `exclude`.
    ///
    /// Queueing never waits: a closed outbox means the recipient's writer is
    /// gone, a full one means the recipient stopped draining. Both are
    /// reported in [`FanOut::failed`] and nothing is removed here.
    pub fn fan_out(&self, message: &RelayMessage, exclude: Option<&ConnectionId>) -> FanOut {
        let payload = frame_line(&message.to_string());
        let mut result = FanOut::default();

        for (id, entry) in self
            .clients
            .iter()
            .filter(|(id, _)| Some(*id) != exclude)
        {
            match entry.outbox.try_send(payload.clone()) {
                Ok(()) => result.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Outbox of '{}' ({}) is full, dropping message",
                        entry.name,
                        entry.peer
                    );
                    result.failed.push(*id);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::warn!(
                        "Connection of '{}' ({}) is closed, dropping message",
                        entry.name,
                        entry.peer
                    );
                    result.failed.push(*id);
                }
            }
        }

        result
    }

    /// Announce the departure of `id` to the others, then drop its entry.
    ///
    /// Dropping the entry drops its outbox, which closes the transport once
    /// the writer has flushed. Returns `None` when `id` is not registered.
    pub fn depart(&mut self, id: &ConnectionId) -> Option<Departure> {
        let name = self.clients.get(id)?.name.clone();
        let fan_out = self.fan_out(&RelayMessage::Left(name.clone()), Some(id));
        self.clients.remove(id);

        Some(Departure {
            name,
            failed: fan_out.failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn create_test_entry(name: &str, capacity: usize) -> (ClientEntry, mpsc::Receiver<String>) {
        let (outbox, rx) = mpsc::channel(capacity);
        let entry = ClientEntry::new(
            DisplayName::new(name).unwrap(),
            "127.0.0.1:50000".parse().unwrap(),
            outbox,
        );
        (entry, rx)
    }

    fn chat(from: &str, text: &str) -> RelayMessage {
        RelayMessage::Chat {
            from: DisplayName::new(from).unwrap(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_insert_rejects_duplicate_connection() {
        // テスト項目: 同じ接続を 2 回登録するとエラーになる
        // given (前提条件):
        let mut registry = Registry::new();
        let id = ConnectionId::generate();
        let (first, _rx1) = create_test_entry("alice", 4);
        let (second, _rx2) = create_test_entry("alice", 4);
        registry.insert(id, first).unwrap();

        // when (操作):
        let result = registry.insert(id, second);

        // then (期待する結果):
        assert_eq!(result, Err(RegistryError::AlreadyRegistered(id)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_fan_out_excludes_sender() {
        // テスト項目: 送信者以外の全クライアントにちょうど 1 回ずつ配送される
        // given (前提条件):
        let mut registry = Registry::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let charlie = ConnectionId::generate();
        let (alice_entry, mut alice_rx) = create_test_entry("alice", 4);
        let (bob_entry, mut bob_rx) = create_test_entry("bob", 4);
        let (charlie_entry, mut charlie_rx) = create_test_entry("charlie", 4);
        registry.insert(alice, alice_entry).unwrap();
        registry.insert(bob, bob_entry).unwrap();
        registry.insert(charlie, charlie_entry).unwrap();

        // when (操作):
        let result = registry.fan_out(&chat("alice", "hi"), Some(&alice));

        // then (期待する結果):
        assert_eq!(result.delivered, 2);
        assert!(result.failed.is_empty());
        assert_eq!(bob_rx.try_recv().unwrap(), "<alice> hi\n");
        assert_eq!(charlie_rx.try_recv().unwrap(), "<alice> hi\n");
        assert!(bob_rx.try_recv().is_err());
        assert!(charlie_rx.try_recv().is_err());
        assert!(alice_rx.try_recv().is_err());
    }

    #[test]
    fn test_fan_out_without_exclusion_reaches_everyone() {
        // テスト項目: 除外なしのファンアウトは全クライアントに届く
        // given (前提条件):
        let mut registry = Registry::new();
        let (alice_entry, mut alice_rx) = create_test_entry("alice", 4);
        let (bob_entry, mut bob_rx) = create_test_entry("bob", 4);
        registry.insert(ConnectionId::generate(), alice_entry).unwrap();
        registry.insert(ConnectionId::generate(), bob_entry).unwrap();

        // when (操作):
        let joined = RelayMessage::Joined(DisplayName::new("carol").unwrap());
        let result = registry.fan_out(&joined, None);

        // then (期待する結果):
        assert_eq!(result.delivered, 2);
        assert_eq!(alice_rx.try_recv().unwrap(), "carol joined\n");
        assert_eq!(bob_rx.try_recv().unwrap(), "carol joined\n");
    }

    #[test]
    fn test_fan_out_collects_closed_recipients_without_removing_them() {
        // テスト項目: 切断済みの受信者は失敗として収集されるが、レジストリからは削除されない
        // given (前提条件):
        let mut registry = Registry::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let (alice_entry, alice_rx) = create_test_entry("alice", 4);
        let (bob_entry, mut bob_rx) = create_test_entry("bob", 4);
        registry.insert(alice, alice_entry).unwrap();
        registry.insert(bob, bob_entry).unwrap();
        drop(alice_rx);

        // when (操作):
        let result = registry.fan_out(&chat("carol", "hey"), None);

        // then (期待する結果):
        assert_eq!(result.delivered, 1);
        assert_eq!(result.failed, vec![alice]);
        assert!(registry.contains(&alice));
        assert_eq!(bob_rx.try_recv().unwrap(), "<carol> hey\n");
    }

    #[test]
    fn test_fan_out_treats_full_outbox_as_failure() {
        // テスト項目: キューが満杯の受信者は配送失敗として扱われる
        // given (前提条件):
        let mut registry = Registry::new();
        let slow = ConnectionId::generate();
        let (slow_entry, _slow_rx) = create_test_entry("slow", 1);
        registry.insert(slow, slow_entry).unwrap();
        registry.fan_out(&chat("bob", "first"), None);

        // when (操作):
        let result = registry.fan_out(&chat("bob", "second"), None);

        // then (期待する結果):
        assert_eq!(result.delivered, 0);
        assert_eq!(result.failed, vec![slow]);
    }

    #[test]
    fn test_depart_announces_to_remaining_clients_and_removes_entry() {
        // テスト項目: 退出時に残りのクライアントへ通知し、エントリが削除される
        // given (前提条件):
        let mut registry = Registry::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let (alice_entry, mut alice_rx) = create_test_entry("alice", 4);
        let (bob_entry, mut bob_rx) = create_test_entry("bob", 4);
        registry.insert(alice, alice_entry).unwrap();
        registry.insert(bob, bob_entry).unwrap();

        // when (操作):
        let departure = registry.depart(&alice).unwrap();

        // then (期待する結果):
        assert_eq!(departure.name.as_str(), "alice");
        assert!(departure.failed.is_empty());
        assert!(!registry.contains(&alice));
        assert_eq!(bob_rx.try_recv().unwrap(), "alice left the chat\n");
        // alice の送信キューは閉じられている
        assert!(matches!(
            alice_rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn test_depart_unknown_connection_is_noop() {
        // テスト項目: 未登録の接続の退出は何もしない
        // given (前提条件):
        let mut registry = Registry::new();
        let (bob_entry, mut bob_rx) = create_test_entry("bob", 4);
        registry.insert(ConnectionId::generate(), bob_entry).unwrap();

        // when (操作):
        let departure = registry.depart(&ConnectionId::generate());

        // then (期待する結果):
        assert!(departure.is_none());
        assert_eq!(registry.len(), 1);
        assert!(bob_rx.try_recv().is_err());
    }

    #[test]
    fn test_depart_twice_announces_once() {
        // テスト項目: 同じ接続を 2 回退出させても通知は 1 回だけ
        // given (前提条件):
        let mut registry = Registry::new();
        let alice = ConnectionId::generate();
        let (alice_entry, _alice_rx) = create_test_entry("alice", 4);
        let (bob_entry, mut bob_rx) = create_test_entry("bob", 4);
        registry.insert(alice, alice_entry).unwrap();
        registry.insert(ConnectionId::generate(), bob_entry).unwrap();

        // when (操作):
        let first = registry.depart(&alice);
        let second = registry.depart(&alice);

        // then (期待する結果):
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(bob_rx.try_recv().unwrap(), "alice left the chat\n");
        assert!(bob_rx.try_recv().is_err());
    }
}
