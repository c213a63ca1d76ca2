#![forbid(unsafe_code)]

//! RAII handles for host-registered callbacks.
//!
//! A host capability hands back a [`Subscription`] whenever it registers a
//! callback. The handle owns the release action: calling [`Subscription::cancel`]
//! or dropping the handle unregisters the callback, after which the host must
//! never invoke it again.
//!
//! # Invariants
//!
//! 1. **Release once**: the release action runs at most once, whichever of
//!    `cancel` or `Drop` comes first.
//! 2. **Release on every exit path**: early returns and unwinding drop the
//!    handle, so no observation outlives its owner.
//! 3. **Idempotent host side**: releasing a registration the host already
//!    disconnected on its own is a no-op.

use std::fmt;

/// Identifier of a host registration, unique per host.
pub type SubId = u64;

/// Guard that unregisters a host callback when cancelled or dropped.
#[must_use = "dropping a Subscription immediately unregisters its callback"]
pub struct Subscription {
    id: SubId,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a host registration with the action that removes it.
    pub fn new(id: SubId, release: impl FnOnce() + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    /// A handle with nothing to release.
    pub fn detached(id: SubId) -> Self {
        Self { id, release: None }
    }

    #[inline]
    pub fn id(&self) -> SubId {
        self.id
    }

    /// Whether this handle still holds a release action.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.release.is_some()
    }

    /// Unregister the callback now.
    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::trace!(sub_id = self.id, "releasing host subscription");
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("held", &self.is_held())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting(id: SubId) -> (Subscription, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (Subscription::new(id, move || c.set(c.get() + 1)), count)
    }

    #[test]
    fn cancel_releases_once() {
        let (sub, count) = counting(1);
        assert!(sub.is_held());
        sub.cancel();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn drop_releases() {
        let (sub, count) = counting(2);
        drop(sub);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn release_runs_on_unwind() {
        let (sub, count) = counting(3);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _held = sub;
            panic!("section render failed");
        }));
        assert!(result.is_err());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn detached_has_nothing_to_release() {
        let sub = Subscription::detached(9);
        assert!(!sub.is_held());
        assert_eq!(sub.id(), 9);
        sub.cancel();
    }

    #[test]
    fn debug_shows_state() {
        let sub = Subscription::detached(4);
        assert_eq!(format!("{sub:?}"), "Subscription { id: 4, held: false }");
    }
}
