use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use tokio::sync::mpsc;

/// Registry of connected websocket sessions keyed by username. A user may
/// hold several sessions (multiple tabs/devices); closed senders are pruned
/// lazily on broadcast.
#[derive(Clone, Default)]
pub struct ChatHub {
    sessions: Arc<RwLock<HashMap<String, Vec<mpsc::UnboundedSender<String>>>>>,
}

impl ChatHub {
    fn read_sessions(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<String, Vec<mpsc::UnboundedSender<String>>>> {
        self.sessions.read().expect("chat hub read lock poisoned")
    }

    fn write_sessions(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<mpsc::UnboundedSender<String>>>> {
        self.sessions.write().expect("chat hub write lock poisoned")
    }

    pub fn register(&self, username: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sessions = self.write_sessions();
        sessions.entry(username.to_string()).or_default().push(tx);
        rx
    }

    pub fn prune_user(&self, username: &str) {
        let mut sessions = self.write_sessions();
        if let Some(user_sessions) = sessions.get_mut(username) {
            user_sessions.retain(|sender| !sender.is_closed());
            if user_sessions.is_empty() {
                sessions.remove(username);
            }
        }
    }

    pub fn broadcast_to_users(&self, usernames: &[String], payload: &str) {
        let snapshot: Vec<(String, Vec<mpsc::UnboundedSender<String>>)> = {
            let sessions = self.read_sessions();
            usernames
                .iter()
                .filter_map(|username| {
                    sessions
                        .get(username)
                        .cloned()
                        .map(|items| (username.clone(), items))
                })
                .collect()
        };

        let mut prune_targets = Vec::new();
        for (username, senders) in snapshot {
            let mut had_closed = false;
            for sender in &senders {
                if sender.send(payload.to_string()).is_err() {
                    had_closed = true;
                }
            }
            if had_closed {
                prune_targets.push(username);
            }
        }

        for username in prune_targets {
            self.prune_user(&username);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_then_broadcast_delivers_payload() {
        let hub = ChatHub::default();
        let mut rx = hub.register("alice");

        hub.broadcast_to_users(&["alice".to_string()], "hello");

        assert_eq!(rx.try_recv().expect("payload expected"), "hello");
    }

    #[tokio::test]
    async fn broadcast_skips_users_without_sessions() {
        let hub = ChatHub::default();
        let mut rx = hub.register("alice");

        hub.broadcast_to_users(&["bob".to_string()], "hello");

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn dropped_receiver_is_pruned_on_broadcast() {
        let hub = ChatHub::default();
        let rx = hub.register("alice");
        drop(rx);

        hub.broadcast_to_users(&["alice".to_string()], "hello");

        assert!(hub.read_sessions().get("alice").is_none());
    }

    #[tokio::test]
    async fn multiple_sessions_per_user_all_receive() {
        let hub = ChatHub::default();
        let mut first = hub.register("alice");
        let mut second = hub.register("alice");

        hub.broadcast_to_users(&["alice".to_string()], "hello");

        assert!(first.try_recv().is_ok());
        assert!(second.try_recv().is_ok());
    }
}
