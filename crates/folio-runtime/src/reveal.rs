#![forbid(unsafe_code)]

//! Reveal-on-scroll controller.
//!
//! Each page section owns one [`RevealController`]. The controller asks the
//! host to observe the section's element and flips a one-way visibility latch
//! the first time the reported visible fraction meets the threshold. After
//! that it disconnects and never changes state again.
//!
//! # Invariants
//!
//! 1. **Monotonic**: the flag goes `false → true` at most once and never back.
//! 2. **Hidden at mount**: the flag is `false` until a qualifying report
//!    arrives, unless the policy is [`RevealPolicy::Immediate`] or the host
//!    cannot observe intersections.
//! 3. **Scoped observation**: the host registration is released when the
//!    controller is unmounted or dropped, including before any reveal.
//!
//! # Failure Modes
//!
//! | Mode | Condition | Behavior |
//! |------|-----------|----------|
//! | Capability missing | host returns `Unavailable` | Visible immediately (fail open) |
//! | Target unset | no element reference at mount | Never visible, nothing observed |

use std::cell::Cell;
use std::rc::Rc;

use folio_core::{
    ElementId, IntersectionEntry, IntersectionHost, ObserveFlow, Subscription, Threshold,
};

/// Presentation class applied to revealed content.
pub const REVEAL_CLASS: &str = "fade-in";

/// How a section decides when to reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPolicy {
    /// Visible as soon as the section mounts.
    Immediate,
    /// Visible once the visible fraction reaches the threshold.
    OnIntersect(Threshold),
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self::OnIntersect(Threshold::DEFAULT)
    }
}

/// Why a controller is in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    /// Registered with the host, waiting for (or past) the threshold.
    Observing,
    /// Revealed at mount by policy.
    Immediate,
    /// Revealed at mount because the host cannot observe intersections.
    FailedOpen,
    /// No element reference; stays hidden.
    Unattached,
}

/// One-shot visibility latch for a section.
#[derive(Debug)]
pub struct RevealController {
    target: Option<ElementId>,
    visible: Rc<Cell<bool>>,
    mode: RevealMode,
    subscription: Option<Subscription>,
}

impl RevealController {
    /// Mount a controller with the given policy.
    pub fn mount_with_policy(
        host: &dyn IntersectionHost,
        target: Option<ElementId>,
        policy: RevealPolicy,
    ) -> Self {
        match policy {
            RevealPolicy::Immediate => Self::immediate(target),
            RevealPolicy::OnIntersect(threshold) => Self::mount(host, target, threshold),
        }
    }

    /// Mount a controller that observes `target` at `threshold`.
    pub fn mount(
        host: &dyn IntersectionHost,
        target: Option<ElementId>,
        threshold: Threshold,
    ) -> Self {
        let visible = Rc::new(Cell::new(false));

        let Some(element) = target.as_ref() else {
            tracing::debug!("reveal target unset; section will stay hidden");
            return Self {
                target,
                visible,
                mode: RevealMode::Unattached,
                subscription: None,
            };
        };

        let flag = Rc::clone(&visible);
        let callback = Box::new(move |entry: &IntersectionEntry| {
            if flag.get() {
                return ObserveFlow::Disconnect;
            }
            if threshold.is_met(entry.ratio) {
                flag.set(true);
                tracing::debug!(
                    section = %entry.target,
                    ratio = entry.ratio,
                    threshold = threshold.get(),
                    "section revealed"
                );
                ObserveFlow::Disconnect
            } else {
                ObserveFlow::Continue
            }
        });

        match host.observe(element, threshold, callback) {
            Ok(subscription) => {
                tracing::trace!(
                    section = %element,
                    sub_id = subscription.id(),
                    "observing section"
                );
                Self {
                    target,
                    visible,
                    mode: RevealMode::Observing,
                    subscription: Some(subscription),
                }
            }
            Err(err) => {
                tracing::warn!(
                    section = %element,
                    error = %err,
                    "revealing section without observation"
                );
                visible.set(true);
                Self {
                    target,
                    visible,
                    mode: RevealMode::FailedOpen,
                    subscription: None,
                }
            }
        }
    }

    /// A controller that is visible from mount and never observes.
    pub fn immediate(target: Option<ElementId>) -> Self {
        Self {
            target,
            visible: Rc::new(Cell::new(true)),
            mode: RevealMode::Immediate,
            subscription: None,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Class to apply to the section content, if any.
    #[inline]
    pub fn reveal_class(&self) -> Option<&'static str> {
        self.is_visible().then_some(REVEAL_CLASS)
    }

    /// Whether the controller is still waiting on the host.
    pub fn is_observing(&self) -> bool {
        self.subscription.is_some() && !self.is_visible()
    }

    #[inline]
    pub fn mode(&self) -> RevealMode {
        self.mode
    }

    pub fn target(&self) -> Option<&ElementId> {
        self.target.as_ref()
    }

    /// Release the host registration. Equivalent to dropping.
    pub fn unmount(mut self) {
        if let Some(subscription) = self.subscription.take() {
            tracing::trace!(
                sub_id = subscription.id(),
                revealed = self.is_visible(),
                "unmounting section"
            );
            subscription.cancel();
        }
    }
}
