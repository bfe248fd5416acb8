//! Observer / Observable pattern.
//!
//! An **Observable** notifies registered **Observer**s whenever its state
//! changes; observers react in [`Observer::update`].  The observer list lives
//! behind a `Mutex` so that process-wide observables such as
//! [`Settings`](crate::settings::Settings) can be shared between threads.

use std::sync::{Arc, Mutex, PoisonError, Weak};

/// An object that can notify interested parties when it changes.
///
/// All methods take `&self`; the observer list uses interior mutability.
pub trait Observable {
    /// Register an observer to receive future change notifications.
    fn register_observer(&self, observer: Weak<dyn Observer>);

    /// Remove a previously registered observer.
    fn unregister_observer(&self, observer: &Weak<dyn Observer>);

    /// Notify all currently registered observers.
    fn notify_observers(&self);
}

/// An object that reacts to changes in the [`Observable`]s it subscribed to.
pub trait Observer: Send + Sync {
    /// Called by an observable when it changes state.
    fn update(&self);
}

/// Observer-list bookkeeping that can be embedded in any observable type.
#[derive(Default)]
pub struct ObservableImpl {
    observers: Mutex<Vec<Weak<dyn Observer>>>,
}

impl ObservableImpl {
    /// Create an empty observer list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.  Registering the same observer twice is a no-op.
    pub fn register(&self, observer: Weak<dyn Observer>) {
        let mut list = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        if !list.iter().any(|o| Weak::ptr_eq(o, &observer)) {
            list.push(observer);
        }
    }

    /// Remove an observer (by pointer equality of the `Weak`).
    pub fn unregister(&self, observer: &Weak<dyn Observer>) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|o| !Weak::ptr_eq(o, observer));
    }

    /// Number of live observers.
    pub fn len(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Whether no live observer is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notify all live observers, pruning dead references.
    ///
    /// The lock is released before any `update()` runs, so observers may
    /// register or unregister from inside their callback.
    pub fn notify(&self) {
        let live: Vec<Arc<dyn Observer>> = {
            let mut list = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
            list.retain(|w| w.strong_count() > 0);
            list.iter().filter_map(Weak::upgrade).collect()
        };
        for obs in live {
            obs.update();
        }
    }
}
