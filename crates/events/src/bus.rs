//! In-process flyer digest bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`FlyerBus`] is the monitor's publish/subscribe hub for
//! [`FlyerDigest`]s. Publication is fire-and-forget -- no acknowledgement,
//! retry, or queuing beyond the channel buffer -- but the bus retains the
//! most recent digest so a subscriber attaching after a publication can
//! still read it via [`FlyerBus::latest`].

use std::sync::RwLock;

use tokio::sync::broadcast;
use vitrine_core::FlyerDigest;

/// Default buffer capacity for the broadcast channel.
///
/// Digests are published once a day (plus manual triggers), so a small
/// buffer is plenty.
const DEFAULT_CAPACITY: usize = 16;

/// Publish/subscribe hub for daily flyer digests.
///
/// Owned by the monitor service; subscribers hold a
/// [`broadcast::Receiver`] and unsubscribe by dropping it.
pub struct FlyerBus {
    sender: broadcast::Sender<FlyerDigest>,
    latest: RwLock<Option<FlyerDigest>>,
}

impl FlyerBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed digests are
    /// dropped and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            latest: RwLock::new(None),
        }
    }

    /// Publish a digest to all current subscribers and retain it as the
    /// latest known digest.
    ///
    /// With zero subscribers the broadcast itself is a no-op; the digest
    /// is still retained for [`FlyerBus::latest`].
    pub fn publish(&self, digest: FlyerDigest) {
        *self.latest.write().expect("flyer bus lock poisoned") = Some(digest.clone());

        if self.sender.send(digest).is_err() {
            tracing::debug!("Flyer digest published with no subscribers attached");
        }
    }

    /// Subscribe to all digests published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<FlyerDigest> {
        self.sender.subscribe()
    }

    /// The most recently published digest, if any.
    pub fn latest(&self) -> Option<FlyerDigest> {
        self.latest
            .read()
            .expect("flyer bus lock poisoned")
            .clone()
    }
}

impl Default for FlyerBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use vitrine_core::digest::assemble_digest;

    use super::*;

    fn empty_digest() -> FlyerDigest {
        assemble_digest(&[], 0, None, Utc::now())
    }

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = FlyerBus::default();
        let mut rx = bus.subscribe();

        let digest = empty_digest();
        bus.publish(digest.clone());

        let received = rx.recv().await.expect("should receive the digest");
        assert_eq!(received.date, digest.date);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_the_same_digest() {
        let bus = FlyerBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(empty_digest());

        let d1 = rx1.recv().await.expect("subscriber 1 should receive");
        let d2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(d1.date, d2.date);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = FlyerBus::default();
        // No subscribers -- this must not panic.
        bus.publish(empty_digest());
    }

    #[test]
    fn latest_is_empty_before_any_publication() {
        let bus = FlyerBus::default();
        assert!(bus.latest().is_none());
    }

    #[test]
    fn late_subscribers_can_read_the_retained_digest() {
        let bus = FlyerBus::default();
        let digest = empty_digest();
        bus.publish(digest.clone());

        // Attached after the fact: the broadcast is gone, the retained
        // digest is not.
        let latest = bus.latest().expect("digest retained");
        assert_eq!(latest.date, digest.date);
    }

    #[test]
    fn latest_tracks_the_most_recent_publication() {
        let bus = FlyerBus::default();
        let first = empty_digest();
        bus.publish(first.clone());
        let second = assemble_digest(&[], 3, None, Utc::now());
        bus.publish(second.clone());

        let latest = bus.latest().expect("digest retained");
        assert_eq!(latest.stats.total_stores, 3);
        assert_eq!(latest.date, second.date);
    }
}
