#![forbid(unsafe_code)]

//! Theme synchronizer.
//!
//! One [`ThemeSynchronizer`] per UI thread holds the page's [`Theme`]. It
//! reads the host's color-scheme preference at start, follows change
//! notifications for its whole lifetime, and mirrors every change to the
//! document's `data-theme` attribute.
//!
//! Consumers never reach the value through ambient state. They receive a
//! [`ThemeHandle`] from the synchronizer and read through it; a handle whose
//! synchronizer is gone (or that was never attached to one) reports
//! [`ThemeError::MissingProvider`].
//!
//! # Lifecycle
//!
//! 1. [`ThemeSynchronizer::start`] claims the per-thread slot, queries the
//!    host, publishes the initial value, and subscribes to changes.
//! 2. Host notifications update the value; repeats of the current value are
//!    ignored.
//! 3. Dropping (or [`ThemeSynchronizer::shutdown`]) releases the host
//!    subscription, detaches every handle, and frees the slot.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use folio_core::{ColorSchemeHost, PresentationSink, Subscription, Theme};

thread_local! {
    static ACTIVE: Cell<bool> = const { Cell::new(false) };
}

type Listener = Box<dyn FnMut(Theme)>;

/// Claim on this thread's synchronizer slot, released on drop.
struct ActiveSlot(());

impl ActiveSlot {
    fn claim() -> Result<Self, ThemeError> {
        if ACTIVE.with(|active| active.replace(true)) {
            return Err(ThemeError::AlreadyActive);
        }
        Ok(Self(()))
    }
}

impl Drop for ActiveSlot {
    fn drop(&mut self) {
        ACTIVE.with(|active| active.set(false));
    }
}

struct ThemeState {
    theme: Cell<Theme>,
    changes: Cell<u64>,
    sink: Rc<dyn PresentationSink>,
    listeners: RefCell<Vec<Listener>>,
}

impl ThemeState {
    fn apply(&self, next: Theme) -> bool {
        let prev = self.theme.replace(next);
        if prev == next {
            tracing::trace!(theme = %next, "color scheme notification without change");
            return false;
        }
        tracing::debug!(from = %prev, to = %next, "theme changed");
        self.publish(next);
        true
    }

    fn publish(&self, theme: Theme) {
        self.changes.set(self.changes.get() + 1);
        self.sink
            .set_document_attribute(Theme::ATTRIBUTE, theme.as_str());

        // Listeners may register further listeners; those run from the next change.
        let mut running = std::mem::take(&mut *self.listeners.borrow_mut());
        for listener in &mut running {
            listener(theme);
        }
        let mut slot = self.listeners.borrow_mut();
        running.append(&mut slot);
        *slot = running;
    }
}

/// Per-thread owner of the current theme.
pub struct ThemeSynchronizer {
    state: Rc<ThemeState>,
    subscription: Option<Subscription>,
    // Last, so the slot frees only after the rest is torn down.
    _slot: ActiveSlot,
}

impl ThemeSynchronizer {
    /// Start synchronizing with `host`, writing the attribute through `sink`.
    ///
    /// Fails with [`ThemeError::AlreadyActive`] if another synchronizer is
    /// live on this thread. A host without color-scheme support yields
    /// [`Theme::Light`] and no subscription.
    pub fn start(
        host: &dyn ColorSchemeHost,
        sink: Rc<dyn PresentationSink>,
    ) -> Result<Self, ThemeError> {
        // Held across every host and sink call; any unwind frees the slot.
        let slot = ActiveSlot::claim()?;

        let initial = match host.query() {
            Ok(theme) => theme,
            Err(err) => {
                tracing::warn!(error = %err, "color scheme query unsupported; using light theme");
                Theme::Light
            }
        };

        let mut sync = Self {
            state: Rc::new(ThemeState {
                theme: Cell::new(initial),
                changes: Cell::new(0),
                sink,
                listeners: RefCell::new(Vec::new()),
            }),
            subscription: None,
            _slot: slot,
        };
        sync.state.publish(initial);
        tracing::debug!(theme = %initial, "theme synchronizer started");

        let weak = Rc::downgrade(&sync.state);
        match host.watch(Box::new(move |reported| {
            if let Some(state) = weak.upgrade() {
                state.apply(reported);
            }
        })) {
            Ok(subscription) => sync.subscription = Some(subscription),
            Err(err) => {
                tracing::warn!(error = %err, "color scheme changes will not be followed");
            }
        }

        Ok(sync)
    }

    /// Whether a synchronizer is live on the current thread.
    pub fn is_active() -> bool {
        ACTIVE.with(Cell::get)
    }

    #[inline]
    pub fn current(&self) -> Theme {
        self.state.theme.get()
    }

    /// Number of times the value has been published, including the initial one.
    #[inline]
    pub fn change_count(&self) -> u64 {
        self.state.changes.get()
    }

    /// Whether host change notifications are being followed.
    pub fn is_following(&self) -> bool {
        self.subscription.is_some()
    }

    /// Read handle for consumers.
    pub fn handle(&self) -> ThemeHandle {
        ThemeHandle {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Tear down now. Equivalent to dropping.
    pub fn shutdown(self) {}
}

impl Drop for ThemeSynchronizer {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.state.listeners.borrow_mut().clear();
        tracing::debug!("theme synchronizer stopped");
    }
}

impl fmt::Debug for ThemeSynchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSynchronizer")
            .field("theme", &self.current())
            .field("changes", &self.change_count())
            .field("following", &self.is_following())
            .finish()
    }
}

/// Read-only accessor handed to theme consumers.
#[derive(Clone, Default)]
pub struct ThemeHandle {
    state: Weak<ThemeState>,
}

impl ThemeHandle {
    /// A handle with no synchronizer behind it.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Whether the synchronizer behind this handle is still alive.
    pub fn is_attached(&self) -> bool {
        self.state.strong_count() > 0
    }

    /// Current theme.
    ///
    /// Returns [`ThemeError::MissingProvider`] if the handle is detached.
    pub fn current(&self) -> Result<Theme, ThemeError> {
        self.state
            .upgrade()
            .map(|state| state.theme.get())
            .ok_or(ThemeError::MissingProvider)
    }

    /// Current theme, panicking if the handle is detached.
    ///
    /// # Panics
    ///
    /// Panics with the [`ThemeError::MissingProvider`] message when no
    /// synchronizer is behind this handle.
    pub fn expect_current(&self) -> Theme {
        match self.current() {
            Ok(theme) => theme,
            Err(err) => panic!("{err}"),
        }
    }

    /// Run `listener` after every theme change until the synchronizer stops.
    pub fn on_change(&self, listener: impl FnMut(Theme) + 'static) -> Result<(), ThemeError> {
        let state = self.state.upgrade().ok_or(ThemeError::MissingProvider)?;
        state.listeners.borrow_mut().push(Box::new(listener));
        Ok(())
    }
}

impl fmt::Debug for ThemeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeHandle")
            .field("theme", &self.current().ok())
            .finish()
    }
}

/// Theme accessor misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeError {
    /// The accessor was used with no active synchronizer behind it.
    MissingProvider,
    /// A second synchronizer was started while one is active.
    AlreadyActive,
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProvider => {
                f.write_str("theme accessor used outside of an active ThemeSynchronizer")
            }
            Self::AlreadyActive => {
                f.write_str("a ThemeSynchronizer is already active on this thread")
            }
        }
    }
}

impl std::error::Error for ThemeError {}
