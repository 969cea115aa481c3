//! Producer → UI handoff channel.
//!
//! A single-slot channel: the producer computes a full update off the
//! UI thread, then blocks here until the UI side has taken the
//! previous one. That serializes updates (one in flight at a time) and
//! preserves the order they were computed in.

use tokio::sync::mpsc;

use screenlate_core::PlacedBox;

/// One instruction for the overlay set manager.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayUpdate {
    /// Swap in a freshly computed overlay set.
    Replace(Vec<PlacedBox>),
    /// Blank the overlay (used around frame capture).
    HideAll,
    /// Restore visibility.
    ShowAll,
}

/// Create the single-slot update channel.
pub fn update_channel() -> (UpdateSender, UpdateReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (UpdateSender { tx }, UpdateReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct UpdateSender {
    tx: mpsc::Sender<OverlayUpdate>,
}

impl UpdateSender {
    /// Queue an update, waiting for the slot to free up. Returns false
    /// once the UI side is gone.
    pub async fn send(&self, update: OverlayUpdate) -> bool {
        self.tx.send(update).await.is_ok()
    }
}

#[derive(Debug)]
pub struct UpdateReceiver {
    rx: mpsc::Receiver<OverlayUpdate>,
}

impl UpdateReceiver {
    /// Next update, in send order. `None` when all senders are gone.
    pub async fn recv(&mut self) -> Option<OverlayUpdate> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn updates_arrive_in_send_order() {
        let (tx, mut rx) = update_channel();
        let sender = tokio::spawn(async move {
            assert!(tx.send(OverlayUpdate::HideAll).await);
            assert!(tx.send(OverlayUpdate::ShowAll).await);
            assert!(tx.send(OverlayUpdate::Replace(Vec::new())).await);
        });

        assert_eq!(rx.recv().await, Some(OverlayUpdate::HideAll));
        assert_eq!(rx.recv().await, Some(OverlayUpdate::ShowAll));
        assert_eq!(rx.recv().await, Some(OverlayUpdate::Replace(Vec::new())));
        sender.await.unwrap();
    }

    #[tokio::test]
    async fn send_reports_closed_receiver() {
        let (tx, rx) = update_channel();
        drop(rx);
        assert!(!tx.send(OverlayUpdate::HideAll).await);
    }

    #[tokio::test]
    async fn receiver_ends_when_sender_drops() {
        let (tx, mut rx) = update_channel();
        drop(tx);
        assert_eq!(rx.recv().await, None);
    }
}
