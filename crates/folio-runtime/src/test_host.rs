//! Scripted host used by unit tests in this crate.
//!
//! Reports are injected directly; there is no layout. The full viewport
//! model lives in `folio-web`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use folio_core::host::{IntersectionCallback, SchemeCallback};
use folio_core::{
    CapabilityError, ColorSchemeHost, ElementId, IntersectionEntry, IntersectionHost,
    ObserveFlow, PresentationSink, SubId, Subscription, Theme, Threshold,
};

struct Observer {
    id: SubId,
    target: ElementId,
    callback: Option<IntersectionCallback>,
}

struct Watcher {
    id: SubId,
    callback: Option<SchemeCallback>,
}

#[derive(Default)]
struct Registry {
    observers: Vec<Observer>,
    watchers: Vec<Watcher>,
}

pub(crate) struct ScriptedHost {
    registry: Rc<RefCell<Registry>>,
    next_id: Cell<SubId>,
    scheme: Cell<Option<Theme>>,
    intersection: bool,
    pub(crate) attributes: RefCell<Vec<(String, String)>>,
}

impl ScriptedHost {
    pub(crate) fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::default())),
            next_id: Cell::new(1),
            scheme: Cell::new(Some(Theme::Light)),
            intersection: true,
            attributes: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn without_intersection() -> Self {
        Self {
            intersection: false,
            ..Self::new()
        }
    }

    pub(crate) fn with_scheme(scheme: Option<Theme>) -> Self {
        let host = Self::new();
        host.scheme.set(scheme);
        host
    }

    fn alloc_id(&self) -> SubId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    pub(crate) fn observer_count(&self) -> usize {
        self.registry.borrow().observers.len()
    }

    pub(crate) fn watcher_count(&self) -> usize {
        self.registry.borrow().watchers.len()
    }

    pub(crate) fn theme_writes(&self) -> Vec<String> {
        self.attributes
            .borrow()
            .iter()
            .filter(|(name, _)| name == Theme::ATTRIBUTE)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Deliver a report to every live observer of `target`.
    pub(crate) fn report(&self, target: &str, ratio: f64) {
        let ids: Vec<SubId> = self
            .registry
            .borrow()
            .observers
            .iter()
            .filter(|o| o.target.as_str() == target)
            .map(|o| o.id)
            .collect();
        for id in ids {
            let taken = self
                .registry
                .borrow_mut()
                .observers
                .iter_mut()
                .find(|o| o.id == id)
                .and_then(|o| o.callback.take());
            let Some(mut callback) = taken else { continue };
            let flow = callback(&IntersectionEntry::new(target.into(), ratio));
            let mut registry = self.registry.borrow_mut();
            match flow {
                ObserveFlow::Continue => {
                    if let Some(o) = registry.observers.iter_mut().find(|o| o.id == id) {
                        o.callback = Some(callback);
                    }
                }
                ObserveFlow::Disconnect => registry.observers.retain(|o| o.id != id),
            }
        }
    }

    /// Deliver a scheme change notification to every live watcher.
    pub(crate) fn notify_scheme(&self, theme: Theme) {
        self.scheme.set(Some(theme));
        let ids: Vec<SubId> = self.registry.borrow().watchers.iter().map(|w| w.id).collect();
        for id in ids {
            let taken = self
                .registry
                .borrow_mut()
                .watchers
                .iter_mut()
                .find(|w| w.id == id)
                .and_then(|w| w.callback.take());
            let Some(mut callback) = taken else { continue };
            callback(theme);
            if let Some(w) = self
                .registry
                .borrow_mut()
                .watchers
                .iter_mut()
                .find(|w| w.id == id)
            {
                w.callback = Some(callback);
            }
        }
    }
}

fn release(registry: Weak<RefCell<Registry>>, id: SubId) -> impl FnOnce() {
    move || {
        if let Some(registry) = registry.upgrade() {
            let mut registry = registry.borrow_mut();
            registry.observers.retain(|o| o.id != id);
            registry.watchers.retain(|w| w.id != id);
        }
    }
}

impl IntersectionHost for ScriptedHost {
    fn observe(
        &self,
        target: &ElementId,
        _threshold: Threshold,
        callback: IntersectionCallback,
    ) -> Result<Subscription, CapabilityError> {
        if !self.intersection {
            return Err(CapabilityError::Unavailable("IntersectionObserver"));
        }
        let id = self.alloc_id();
        self.registry.borrow_mut().observers.push(Observer {
            id,
            target: target.clone(),
            callback: Some(callback),
        });
        Ok(Subscription::new(id, release(Rc::downgrade(&self.registry), id)))
    }
}

impl ColorSchemeHost for ScriptedHost {
    fn query(&self) -> Result<Theme, CapabilityError> {
        self.scheme
            .get()
            .ok_or(CapabilityError::Unavailable("matchMedia"))
    }

    fn watch(&self, callback: SchemeCallback) -> Result<Subscription, CapabilityError> {
        if self.scheme.get().is_none() {
            return Err(CapabilityError::Unavailable("matchMedia"));
        }
        let id = self.alloc_id();
        self.registry.borrow_mut().watchers.push(Watcher {
            id,
            callback: Some(callback),
        });
        Ok(Subscription::new(id, release(Rc::downgrade(&self.registry), id)))
    }
}

impl PresentationSink for ScriptedHost {
    fn set_document_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .push((name.to_owned(), value.to_owned()));
    }
}
