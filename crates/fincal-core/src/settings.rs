//! Process-wide library settings.
//!
//! [`Settings`] holds the **evaluation date**, the "today" used when a
//! schedule has no effective date.  It is a process-wide singleton accessed via a
//! `std::sync::OnceLock`; all state sits behind a `Mutex` so that it can be
//! read and changed from any thread.
//!
//! Changing the evaluation date notifies every observer registered through
//! [`Observable::register_observer`].  Tests that change settings should hold a
//! [`SavedSettings`] guard, which restores the previous values on drop.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use tracing::debug;

use crate::patterns::observable::{Observable, ObservableImpl, Observer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct State {
    evaluation_date: Option<i32>,
}

/// Process-wide settings.
pub struct Settings {
    state: Mutex<State>,
    observers: ObservableImpl,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            state: Mutex::new(State::default()),
            observers: ObservableImpl::new(),
        })
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The evaluation date as a serial number, or `None` if it was never set
    /// (callers then fall back to today's date).
    pub fn evaluation_date_serial(&self) -> Option<i32> {
        self.state().evaluation_date
    }

    /// Set the evaluation date as a serial number.
    ///
    /// Observers are notified only if the value actually changes.
    pub fn set_evaluation_date_serial(&self, serial: i32) {
        self.replace_evaluation_date(Some(serial));
    }

    /// Clear the evaluation date, reverting to "use today".
    pub fn reset_evaluation_date(&self) {
        self.replace_evaluation_date(None);
    }

    /// Pin the evaluation date to `today` if none is set yet.
    pub fn anchor_evaluation_date(&self, today: i32) {
        let unset = self.state().evaluation_date.is_none();
        if unset {
            self.replace_evaluation_date(Some(today));
        }
    }

    fn replace_evaluation_date(&self, new: Option<i32>) {
        let changed = {
            let mut state = self.state();
            let changed = state.evaluation_date != new;
            state.evaluation_date = new;
            changed
        };
        if changed {
            debug!(serial = ?new, "evaluation date changed");
            self.observers.notify();
        }
    }

    fn snapshot(&self) -> State {
        *self.state()
    }

    fn restore(&self, saved: State) {
        self.replace_evaluation_date(saved.evaluation_date);
    }
}

/// Observers registered here are notified when the evaluation date changes.
impl Observable for Settings {
    fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.observers.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.observers.unregister(observer);
    }

    fn notify_observers(&self) {
        self.observers.notify();
    }
}

/// RAII guard that captures every setting on construction and restores them
/// when dropped.
///
/// ```
/// use fincal_core::{SavedSettings, Settings};
///
/// let before = Settings::instance().evaluation_date_serial();
/// {
///     let _guard = SavedSettings::new();
///     Settings::instance().set_evaluation_date_serial(44_000);
/// }
/// assert_eq!(Settings::instance().evaluation_date_serial(), before);
/// ```
#[must_use = "settings are restored when the guard is dropped"]
pub struct SavedSettings {
    saved: State,
}

impl SavedSettings {
    /// Capture the current settings.
    pub fn new() -> Self {
        Self {
            saved: Settings::instance().snapshot(),
        }
    }
}

impl Default for SavedSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SavedSettings {
    fn drop(&mut self) {
        Settings::instance().restore(self.saved);
    }
}
