//! SessionState - observable authentication flag
//!
//! A single `tokio::sync::watch` pair: [`crate::auth::AuthFlow`] is the
//! only writer, consumers subscribe and receive the current value plus
//! every subsequent change. No global singleton - the flag is owned here
//! and handed to consumers explicitly.

use tokio::sync::watch;

/// Observable "is a valid, non-expired session present" flag
#[derive(Debug)]
pub struct SessionState {
    tx: watch::Sender<bool>,
}

impl SessionState {
    /// Create a new session flag, initially unauthenticated
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Current value
    pub fn is_authenticated(&self) -> bool {
        *self.tx.borrow()
    }

    /// Subscribe to the flag
    ///
    /// The receiver sees the value at subscription time and every change
    /// after it - no polling.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Publish a new value (writer: AuthFlow only)
    ///
    /// Subscribers are only woken on actual transitions.
    pub(crate) fn set(&self, authenticated: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == authenticated {
                false
            } else {
                *current = authenticated;
                true
            }
        });
        if changed {
            tracing::debug!(authenticated, "Session state changed");
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_current_value_and_changes() {
        let session = SessionState::new();
        assert!(!session.is_authenticated());

        let mut rx = session.subscribe();
        assert!(!*rx.borrow());

        session.set(true);
        rx.changed().await.expect("sender alive");
        assert!(*rx.borrow());
        assert!(session.is_authenticated());

        // A late subscriber still gets the latest value immediately
        let late = session.subscribe();
        assert!(*late.borrow());

        session.set(false);
        assert!(!session.is_authenticated());
    }
}
