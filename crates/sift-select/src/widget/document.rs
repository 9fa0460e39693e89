//! Document-level click dispatch.
//!
//! The dropdown collapses when the user clicks anywhere in the host
//! document outside the widget. Instead of a process-wide mutable listener
//! list, [`DocumentClicks`] is an explicit, shareable dispatcher: each
//! widget instance subscribes once at attach time and holds a
//! [`ClickSubscription`] guard whose drop releases the subscription on a
//! single teardown path. Multiple widget instances compose without leaks
//! across repeated create/destroy cycles.

use std::sync::Arc;

use sift_select_core::{ConnectionGuard, Signal};

use super::events::MousePressEvent;

/// Dispatches document-level clicks to subscribed widgets.
///
/// Cloning is cheap and shares the underlying subscriber list, so the
/// application hands the same dispatcher to every widget that needs
/// outside-click behavior.
///
/// Subscribers observe events in subscription order, mirroring DOM
/// propagation order.
#[derive(Clone, Default)]
pub struct DocumentClicks {
    clicked: Arc<Signal<MousePressEvent>>,
}

impl DocumentClicks {
    /// Creates a dispatcher with no subscribers.
    pub fn new() -> Self {
        Self {
            clicked: Arc::new(Signal::new()),
        }
    }

    /// Fans a click event out to all subscribers.
    pub fn dispatch(&self, event: MousePressEvent) {
        tracing::trace!(
            target: "sift_select::document",
            x = event.global_pos.x,
            y = event.global_pos.y,
            ignore_collapse = event.ignore_collapse,
            "dispatching document click"
        );
        self.clicked.emit(event);
    }

    /// Subscribes a handler, returning the guard that owns the
    /// subscription.
    pub fn subscribe<F>(&self, handler: F) -> ClickSubscription
    where
        F: Fn(&MousePressEvent) + Send + Sync + 'static,
    {
        ClickSubscription {
            _guard: self.clicked.clone().connect_scoped(handler),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.clicked.connection_count()
    }
}

/// A live subscription to [`DocumentClicks`].
///
/// Dropping the guard unsubscribes exactly once.
pub struct ClickSubscription {
    _guard: ConnectionGuard<MousePressEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::geometry::Point;
    use parking_lot::Mutex;

    #[test]
    fn test_dispatch_reaches_subscribers() {
        let document = DocumentClicks::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let recv = received.clone();
        let _subscription = document.subscribe(move |event| {
            recv.lock().push(event.global_pos);
        });

        document.dispatch(MousePressEvent::left_click(Point::new(5.0, 6.0)));

        let events = received.lock();
        assert_eq!(events.as_slice(), &[Point::new(5.0, 6.0)]);
    }

    #[test]
    fn test_subscription_released_on_drop() {
        let document = DocumentClicks::new();
        assert_eq!(document.subscriber_count(), 0);

        {
            let _subscription = document.subscribe(|_| {});
            assert_eq!(document.subscriber_count(), 1);
        }

        assert_eq!(document.subscriber_count(), 0);
    }

    #[test]
    fn test_repeated_create_destroy_does_not_leak() {
        let document = DocumentClicks::new();

        for _ in 0..10 {
            let _subscription = document.subscribe(|_| {});
        }

        assert_eq!(document.subscriber_count(), 0);
    }

    #[test]
    fn test_clone_shares_subscribers() {
        let document = DocumentClicks::new();
        let clone = document.clone();

        let received = Arc::new(Mutex::new(0));
        let recv = received.clone();
        let _subscription = document.subscribe(move |_| {
            *recv.lock() += 1;
        });

        clone.dispatch(MousePressEvent::left_click(Point::ZERO));
        assert_eq!(*received.lock(), 1);
    }

    #[test]
    fn test_subscribers_observe_in_subscription_order() {
        let document = DocumentClicks::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = order.clone();
        let _a = document.subscribe(move |_| first.lock().push("first"));
        let second = order.clone();
        let _b = document.subscribe(move |_| second.lock().push("second"));

        document.dispatch(MousePressEvent::left_click(Point::ZERO));
        assert_eq!(*order.lock(), vec!["first", "second"]);
    }
}
