#![forbid(unsafe_code)]

//! Host-side `prefers-color-scheme` state.
//!
//! Watchers hear about a change only when the reported scheme actually
//! changes, once per change.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use folio_core::host::SchemeCallback;
use folio_core::{SubId, Subscription, Theme};

struct Watcher {
    id: SubId,
    callback: Option<SchemeCallback>,
}

struct SchemeState {
    current: Theme,
    watchers: Vec<Watcher>,
}

pub struct ColorScheme {
    state: Rc<RefCell<SchemeState>>,
    ids: Rc<Cell<SubId>>,
}

impl ColorScheme {
    pub(crate) fn new(initial: Theme, ids: Rc<Cell<SubId>>) -> Self {
        Self {
            state: Rc::new(RefCell::new(SchemeState {
                current: initial,
                watchers: Vec::new(),
            })),
            ids,
        }
    }

    pub fn current(&self) -> Theme {
        self.state.borrow().current
    }

    pub fn watcher_count(&self) -> usize {
        self.state.borrow().watchers.len()
    }

    /// Change the system scheme. Returns `false` (and notifies nobody) if it
    /// is already `theme`.
    pub fn set(&self, theme: Theme) -> bool {
        let ids: Vec<SubId> = {
            let mut state = self.state.borrow_mut();
            if state.current == theme {
                return false;
            }
            state.current = theme;
            state.watchers.iter().map(|w| w.id).collect()
        };
        tracing::debug!(%theme, watchers = ids.len(), "system color scheme changed");

        for id in ids {
            let taken = self
                .state
                .borrow_mut()
                .watchers
                .iter_mut()
                .find(|w| w.id == id)
                .and_then(|w| w.callback.take());
            let Some(mut callback) = taken else { continue };
            callback(theme);
            if let Some(w) = self
                .state
                .borrow_mut()
                .watchers
                .iter_mut()
                .find(|w| w.id == id)
            {
                w.callback = Some(callback);
            }
        }
        true
    }

    pub(crate) fn watch(&self, callback: SchemeCallback) -> Subscription {
        let id = self.ids.get();
        self.ids.set(id + 1);
        self.state.borrow_mut().watchers.push(Watcher {
            id,
            callback: Some(callback),
        });
        let registry: Weak<RefCell<SchemeState>> = Rc::downgrade(&self.state);
        Subscription::new(id, move || {
            if let Some(state) = registry.upgrade() {
                state.borrow_mut().watchers.retain(|w| w.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> ColorScheme {
        ColorScheme::new(Theme::Light, Rc::new(Cell::new(1)))
    }

    #[test]
    fn notifies_once_per_change() {
        let cs = scheme();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let _sub = cs.watch(Box::new(move |t| log.borrow_mut().push(t)));

        assert!(cs.set(Theme::Dark));
        assert!(!cs.set(Theme::Dark));
        assert!(cs.set(Theme::Light));
        assert_eq!(*seen.borrow(), vec![Theme::Dark, Theme::Light]);
    }

    #[test]
    fn dropped_watcher_is_silent() {
        let cs = scheme();
        let seen = Rc::new(Cell::new(0));
        let count = seen.clone();
        let sub = cs.watch(Box::new(move |_| count.set(count.get() + 1)));
        drop(sub);
        assert_eq!(cs.watcher_count(), 0);
        cs.set(Theme::Dark);
        assert_eq!(seen.get(), 0);
        assert_eq!(cs.current(), Theme::Dark);
    }
}
