#![forbid(unsafe_code)]

//! Host-side viewport and intersection observation.
//!
//! Elements are placed in page coordinates; the viewport is a window of the
//! host-set size whose top edge sits at the scroll offset. Observers are
//! notified on delivery passes (scroll, resize, placement, explicit
//! [`Viewport::flush`]) when their element's visible fraction crosses the
//! registered threshold or the element enters or leaves the viewport. A newly
//! registered observer receives its first report on the next pass.
//!
//! Callbacks are taken out of the registry while they run, so a callback may
//! freely touch the viewport (including cancelling its own subscription).

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use folio_core::host::IntersectionCallback;
use folio_core::{ElementId, IntersectionEntry, ObserveFlow, Rect, SubId, Subscription, Threshold};

struct Observer {
    id: SubId,
    target: ElementId,
    threshold: Threshold,
    callback: Option<IntersectionCallback>,
    last_ratio: Option<f64>,
}

struct ViewportState {
    width: f64,
    height: f64,
    scroll_y: f64,
    elements: BTreeMap<ElementId, Rect>,
    observers: Vec<Observer>,
}

impl ViewportState {
    fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    fn ratio_of(&self, target: &ElementId) -> f64 {
        let viewport = self.rect();
        self.elements
            .get(target)
            .map_or(0.0, |el| el.visible_fraction(&viewport))
    }
}

fn crossed(threshold: Threshold, prev: f64, now: f64) -> bool {
    threshold.is_met(prev) != threshold.is_met(now) || (prev > 0.0) != (now > 0.0)
}

/// Scrollable viewport with intersection observers.
pub struct Viewport {
    state: Rc<RefCell<ViewportState>>,
    ids: Rc<Cell<SubId>>,
}

impl Viewport {
    pub(crate) fn new(width: f64, height: f64, ids: Rc<Cell<SubId>>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewportState {
                width: width.max(0.0),
                height: height.max(0.0),
                scroll_y: 0.0,
                elements: BTreeMap::new(),
                observers: Vec::new(),
            })),
            ids,
        }
    }

    /// Visible region in page coordinates.
    pub fn rect(&self) -> Rect {
        self.state.borrow().rect()
    }

    pub fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    /// Scroll so the viewport's top edge is at `y` (clamped at zero), then
    /// deliver reports.
    pub fn scroll_to(&self, y: f64) {
        self.state.borrow_mut().scroll_y = if y.is_finite() { y.max(0.0) } else { 0.0 };
        self.flush();
    }

    /// Change the viewport size, then deliver reports.
    pub fn resize(&self, width: f64, height: f64) {
        {
            let mut state = self.state.borrow_mut();
            state.width = width.max(0.0);
            state.height = height.max(0.0);
        }
        self.flush();
    }

    /// Place (or move) an element, then deliver reports.
    pub fn place(&self, id: impl Into<ElementId>, rect: Rect) {
        self.state.borrow_mut().elements.insert(id.into(), rect);
        self.flush();
    }

    /// Remove an element from the layout. Its observers see it leave.
    pub fn remove(&self, id: &ElementId) {
        self.state.borrow_mut().elements.remove(id);
        self.flush();
    }

    pub fn element(&self, id: &ElementId) -> Option<Rect> {
        self.state.borrow().elements.get(id).copied()
    }

    /// Current visible fraction of `id`; unplaced elements report `0.0`.
    pub fn ratio_of(&self, id: &ElementId) -> f64 {
        self.state.borrow().ratio_of(id)
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Deliver pending reports: first reports of new observers and threshold
    /// crossings since the previous pass.
    pub fn flush(&self) {
        let pending = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let viewport = state.rect();
            let mut pending = Vec::new();
            for observer in &mut state.observers {
                let ratio = state
                    .elements
                    .get(&observer.target)
                    .map_or(0.0, |el| el.visible_fraction(&viewport));
                let due = match observer.last_ratio {
                    None => true,
                    Some(prev) => crossed(observer.threshold, prev, ratio),
                };
                observer.last_ratio = Some(ratio);
                if due {
                    let entry = IntersectionEntry::new(observer.target.clone(), ratio);
                    pending.push((observer.id, entry));
                }
            }
            pending
        };
        self.deliver(pending);
    }

    /// Deliver `ratio` for `id` to its observers unconditionally, as if the
    /// host's own observer had reported it.
    pub fn report(&self, id: &ElementId, ratio: f64) {
        let pending: Vec<_> = {
            let mut state = self.state.borrow_mut();
            state
                .observers
                .iter_mut()
                .filter(|o| &o.target == id)
                .map(|o| {
                    let entry = IntersectionEntry::new(o.target.clone(), ratio);
                    o.last_ratio = Some(entry.ratio);
                    (o.id, entry)
                })
                .collect()
        };
        self.deliver(pending);
    }

    fn deliver(&self, pending: Vec<(SubId, IntersectionEntry)>) {
        for (id, entry) in pending {
            let taken = self
                .state
                .borrow_mut()
                .observers
                .iter_mut()
                .find(|o| o.id == id)
                .and_then(|o| o.callback.take());
            // Cancelled by an earlier callback in this pass.
            let Some(mut callback) = taken else { continue };

            tracing::trace!(
                sub_id = id,
                target = %entry.target,
                ratio = entry.ratio,
                "intersection report"
            );
            let flow = callback(&entry);

            let mut state = self.state.borrow_mut();
            match flow {
                ObserveFlow::Continue => {
                    if let Some(o) = state.observers.iter_mut().find(|o| o.id == id) {
                        o.callback = Some(callback);
                    }
                }
                ObserveFlow::Disconnect => {
                    state.observers.retain(|o| o.id != id);
                    tracing::trace!(sub_id = id, "observer disconnected");
                }
            }
        }
    }

    pub(crate) fn observe(
        &self,
        target: &ElementId,
        threshold: Threshold,
        callback: IntersectionCallback,
    ) -> Subscription {
        let id = self.ids.get();
        self.ids.set(id + 1);
        self.state.borrow_mut().observers.push(Observer {
            id,
            target: target.clone(),
            threshold,
            callback: Some(callback),
            last_ratio: None,
        });
        let registry: Weak<RefCell<ViewportState>> = Rc::downgrade(&self.state);
        Subscription::new(id, move || {
            if let Some(state) = registry.upgrade() {
                state.borrow_mut().observers.retain(|o| o.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 800.0, Rc::new(Cell::new(1)))
    }

    fn recording(log: &Rc<RefCell<Vec<f64>>>) -> IntersectionCallback {
        let log = log.clone();
        Box::new(move |entry| {
            log.borrow_mut().push(entry.ratio);
            ObserveFlow::Continue
        })
    }

    #[test]
    fn first_report_waits_for_flush() {
        let vp = viewport();
        vp.place("about", Rect::new(0.0, 0.0, 1000.0, 400.0));
        let log = Rc::new(RefCell::new(Vec::new()));
        let _sub = vp.observe(&"about".into(), Threshold::DEFAULT, recording(&log));
        assert!(log.borrow().is_empty());
        vp.flush();
        assert_eq!(*log.borrow(), vec![1.0]);
    }

    #[test]
    fn reports_only_on_crossings() {
        let vp = viewport();
        vp.place("skills", Rect::new(0.0, 1000.0, 1000.0, 1000.0));
        let log = Rc::new(RefCell::new(Vec::new()));
        let _sub = vp.observe(&"skills".into(), Threshold::new(0.5).unwrap(), recording(&log));
        vp.flush(); // initial: 0.0
        vp.scroll_to(100.0); // still hidden, no report
        vp.scroll_to(300.0); // 0.1 visible: enters viewport
        vp.scroll_to(400.0); // 0.2: no crossing
        vp.scroll_to(900.0); // 0.7: crosses 0.5
        assert_eq!(log.borrow().len(), 3);
        assert!((log.borrow()[2] - 0.7).abs() < 1e-9);
    }

    #[test]
    fn cancel_removes_observer() {
        let vp = viewport();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sub = vp.observe(&"contact".into(), Threshold::DEFAULT, recording(&log));
        assert_eq!(vp.observer_count(), 1);
        sub.cancel();
        assert_eq!(vp.observer_count(), 0);
        vp.report(&"contact".into(), 1.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn disconnect_flow_removes_observer() {
        let vp = viewport();
        let _sub = vp.observe(
            &"hero".into(),
            Threshold::DEFAULT,
            Box::new(|_| ObserveFlow::Disconnect),
        );
        vp.flush();
        assert_eq!(vp.observer_count(), 0);
    }

    #[test]
    fn scroll_is_clamped() {
        let vp = viewport();
        vp.scroll_to(-40.0);
        assert_eq!(vp.scroll_y(), 0.0);
        vp.scroll_to(f64::NAN);
        assert_eq!(vp.scroll_y(), 0.0);
    }

    #[test]
    fn removed_element_reads_hidden() {
        let vp = viewport();
        let id: ElementId = "education".into();
        vp.place(id.clone(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(vp.ratio_of(&id), 1.0);
        vp.remove(&id);
        assert_eq!(vp.ratio_of(&id), 0.0);
        assert_eq!(vp.element(&id), None);
    }
}
