//! Per-section page synchronization.
//!
//! A paged section usually has two views of the same page state: the
//! content strip the user swipes, and some indicator elsewhere (a dot
//! footer, a "3 / 7" badge) that both displays the page and can be tapped
//! to jump. [`PagerChannel`] is the small pub/sub fabric between them,
//! one channel per section, carrying [`PagerEvent`]s both ways:
//!
//! - the content side calls [`PagerChannel::publish_page_changed`] when a
//!   swipe settles; indicators listen via [`PagerChannel::page_changed`]
//! - an indicator calls [`PagerChannel::request_page`] on a tap; the
//!   content side listens via [`PagerChannel::page_requested`] and scrolls
//!
//! # Echo suppression
//!
//! The channel remembers the current page and drops publishes and
//! requests that name it. That is what breaks the feedback cycle: a
//! request scrolls the content, the settled scroll publishes the same
//! page back, and the publish updates the indicator without re-triggering
//! a request. Both directions converge on the same page with no residual
//! traffic.
//!
//! Events are fire-and-forget. A subscriber connected after an event was
//! published sees nothing until the next one; late joiners read
//! [`PagerChannel::current_page`] instead.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use horizon_mosaic_core::{ConnectionId, Signal};

/// A page event on one section's channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerEvent {
    /// The page the event names.
    pub page: usize,
}

/// Bidirectional page-sync channel for one paged section.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_mosaic::PagerChannel;
///
/// let channel = Arc::new(PagerChannel::new());
/// channel.page_changed().connect(|event| {
///     println!("now on page {}", event.page);
/// });
///
/// assert!(channel.publish_page_changed(2));
/// // Same page again: suppressed, nobody is notified.
/// assert!(!channel.publish_page_changed(2));
/// ```
#[derive(Default)]
pub struct PagerChannel {
    page_changed: Signal<PagerEvent>,
    page_requested: Signal<PagerEvent>,
    current_page: AtomicUsize,
}

impl PagerChannel {
    /// A channel sitting on page zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The page the content last settled on.
    #[inline]
    pub fn current_page(&self) -> usize {
        self.current_page.load(Ordering::SeqCst)
    }

    /// Announce that the content settled on `page`.
    ///
    /// Updates the current page and notifies [`PagerChannel::page_changed`]
    /// subscribers. Returns `false`, notifying nobody, when `page` is
    /// already current.
    pub fn publish_page_changed(&self, page: usize) -> bool {
        let previous = self.current_page.swap(page, Ordering::SeqCst);
        if previous == page {
            return false;
        }
        tracing::trace!(
            target: "horizon_mosaic::pager",
            from = previous,
            to = page,
            "page changed"
        );
        self.page_changed.emit(PagerEvent { page });
        true
    }

    /// Ask the content side to scroll to `page`.
    ///
    /// Notifies [`PagerChannel::page_requested`] subscribers. The current
    /// page is *not* updated here; it changes when the resulting scroll
    /// settles and publishes. Returns `false`, notifying nobody, when
    /// `page` is already current.
    pub fn request_page(&self, page: usize) -> bool {
        if self.current_page.load(Ordering::SeqCst) == page {
            return false;
        }
        tracing::trace!(target: "horizon_mosaic::pager", page, "page requested");
        self.page_requested.emit(PagerEvent { page });
        true
    }

    /// Signal fired when the content settles on a new page.
    #[inline]
    pub fn page_changed(&self) -> &Signal<PagerEvent> {
        &self.page_changed
    }

    /// Signal fired when an indicator asks for a page.
    #[inline]
    pub fn page_requested(&self) -> &Signal<PagerEvent> {
        &self.page_requested
    }
}

impl fmt::Debug for PagerChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerChannel")
            .field("current_page", &self.current_page())
            .field("changed_subscribers", &self.page_changed.connection_count())
            .field(
                "requested_subscribers",
                &self.page_requested.connection_count(),
            )
            .finish()
    }
}

enum SubscribedSignal {
    Changed,
    Requested,
}

/// A connection to one side of a [`PagerChannel`], severed on drop.
///
/// Holding the subscription keeps the slot alive; dropping it disconnects,
/// so wiring that is rebuilt per refresh cannot leak stale slots.
pub struct PagerSubscription {
    channel: Arc<PagerChannel>,
    signal: SubscribedSignal,
    id: ConnectionId,
}

impl PagerSubscription {
    /// Subscribe to [`PagerChannel::page_changed`].
    pub fn page_changed<F>(channel: Arc<PagerChannel>, slot: F) -> Self
    where
        F: Fn(&PagerEvent) + Send + Sync + 'static,
    {
        let id = channel.page_changed.connect(slot);
        Self {
            channel,
            signal: SubscribedSignal::Changed,
            id,
        }
    }

    /// Subscribe to [`PagerChannel::page_requested`].
    pub fn page_requested<F>(channel: Arc<PagerChannel>, slot: F) -> Self
    where
        F: Fn(&PagerEvent) + Send + Sync + 'static,
    {
        let id = channel.page_requested.connect(slot);
        Self {
            channel,
            signal: SubscribedSignal::Requested,
            id,
        }
    }

    /// The channel this subscription listens to.
    pub fn channel(&self) -> &Arc<PagerChannel> {
        &self.channel
    }
}

impl Drop for PagerSubscription {
    fn drop(&mut self) {
        match self.signal {
            SubscribedSignal::Changed => self.channel.page_changed.disconnect(self.id),
            SubscribedSignal::Requested => self.channel.page_requested.disconnect(self.id),
        };
    }
}

impl fmt::Debug for PagerSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.signal {
            SubscribedSignal::Changed => "page_changed",
            SubscribedSignal::Requested => "page_requested",
        };
        f.debug_struct("PagerSubscription")
            .field("signal", &side)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn test_publish_updates_current_and_notifies() {
        let channel = Arc::new(PagerChannel::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner = seen.clone();
        let _sub = PagerSubscription::page_changed(channel.clone(), move |event| {
            inner.lock().push(event.page);
        });

        assert!(channel.publish_page_changed(3));
        assert_eq!(channel.current_page(), 3);
        assert_eq!(*seen.lock(), vec![3]);
    }

    #[test]
    fn test_publishing_the_current_page_is_suppressed() {
        let channel = Arc::new(PagerChannel::new());
        let count = Arc::new(Mutex::new(0));

        let inner = count.clone();
        let _sub = PagerSubscription::page_changed(channel.clone(), move |_| {
            *inner.lock() += 1;
        });

        assert!(!channel.publish_page_changed(0));
        assert!(channel.publish_page_changed(1));
        assert!(!channel.publish_page_changed(1));
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_requesting_the_current_page_is_suppressed() {
        let channel = Arc::new(PagerChannel::new());
        let count = Arc::new(Mutex::new(0));

        let inner = count.clone();
        let _sub = PagerSubscription::page_requested(channel.clone(), move |_| {
            *inner.lock() += 1;
        });

        assert!(!channel.request_page(0));
        assert!(channel.request_page(2));
        // Not settled yet, so the same request goes out again.
        assert!(channel.request_page(2));
        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn test_round_trip_settles_without_echo() {
        // Indicator tap -> content scrolls -> settle publishes back.
        let channel = Arc::new(PagerChannel::new());
        let scrolls = Arc::new(Mutex::new(Vec::new()));
        let displays = Arc::new(Mutex::new(Vec::new()));

        let content = channel.clone();
        let scroll_log = scrolls.clone();
        let _content_sub = PagerSubscription::page_requested(channel.clone(), move |event| {
            scroll_log.lock().push(event.page);
            content.publish_page_changed(event.page);
        });

        let display_log = displays.clone();
        let _indicator_sub = PagerSubscription::page_changed(channel.clone(), move |event| {
            display_log.lock().push(event.page);
        });

        assert!(channel.request_page(4));
        // Exactly one scroll and one display update; the settle publish
        // did not bounce back into another request.
        assert_eq!(*scrolls.lock(), vec![4]);
        assert_eq!(*displays.lock(), vec![4]);
        assert_eq!(channel.current_page(), 4);
        assert!(!channel.request_page(4));
    }

    #[test]
    fn test_events_fan_out_to_all_subscribers() {
        let channel = Arc::new(PagerChannel::new());
        let first = Arc::new(Mutex::new(0));
        let second = Arc::new(Mutex::new(0));

        let a = first.clone();
        let _sub_a = PagerSubscription::page_changed(channel.clone(), move |event| {
            *a.lock() = event.page;
        });
        let b = second.clone();
        let _sub_b = PagerSubscription::page_changed(channel.clone(), move |event| {
            *b.lock() = event.page;
        });

        channel.publish_page_changed(6);
        assert_eq!(*first.lock(), 6);
        assert_eq!(*second.lock(), 6);
    }

    #[test]
    fn test_late_subscriber_sees_no_replay() {
        let channel = Arc::new(PagerChannel::new());
        channel.publish_page_changed(5);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let inner = seen.clone();
        let _sub = PagerSubscription::page_changed(channel.clone(), move |event| {
            inner.lock().push(event.page);
        });

        assert!(seen.lock().is_empty());
        // State is still readable directly.
        assert_eq!(channel.current_page(), 5);

        channel.publish_page_changed(6);
        assert_eq!(*seen.lock(), vec![6]);
    }

    #[test]
    fn test_dropping_a_subscription_disconnects() {
        let channel = Arc::new(PagerChannel::new());
        let count = Arc::new(Mutex::new(0));

        let inner = count.clone();
        let sub = PagerSubscription::page_changed(channel.clone(), move |_| {
            *inner.lock() += 1;
        });
        channel.publish_page_changed(1);
        assert_eq!(channel.page_changed().connection_count(), 1);

        drop(sub);
        assert_eq!(channel.page_changed().connection_count(), 0);
        channel.publish_page_changed(2);
        assert_eq!(*count.lock(), 1);
    }
}
