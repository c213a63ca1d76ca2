#![forbid(unsafe_code)]

//! Fixed-duration loading gate.
//!
//! The page shows a splash screen for a fixed time before any section
//! mounts. Time is supplied by the host as a monotonic [`Duration`], so the
//! gate never reads a clock of its own.

use core::time::Duration;

/// Splash duration used when none is configured.
pub const DEFAULT_LOADING_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Loading,
    Ready,
}

/// One-way `Loading → Ready` gate.
#[derive(Debug, Clone)]
pub struct LoadingGate {
    started_at: Duration,
    duration: Duration,
    phase: LoadingPhase,
}

impl LoadingGate {
    /// Gate opened at `started_at` for `duration`. A zero duration is ready
    /// on the first [`advance`](Self::advance).
    pub fn new(started_at: Duration, duration: Duration) -> Self {
        Self {
            started_at,
            duration,
            phase: LoadingPhase::Loading,
        }
    }

    /// Move the gate to host time `now`.
    ///
    /// Returns `true` only on the call that transitions to `Ready`.
    pub fn advance(&mut self, now: Duration) -> bool {
        if self.phase == LoadingPhase::Ready {
            return false;
        }
        if now.saturating_sub(self.started_at) >= self.duration {
            self.phase = LoadingPhase::Ready;
            tracing::debug!(
                elapsed_ms = now.saturating_sub(self.started_at).as_millis() as u64,
                "loading gate opened"
            );
            return true;
        }
        false
    }

    #[inline]
    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.phase == LoadingPhase::Ready
    }

    /// Time left until the gate opens, zero once ready.
    pub fn remaining(&self, now: Duration) -> Duration {
        if self.is_ready() {
            return Duration::ZERO;
        }
        self.duration
            .saturating_sub(now.saturating_sub(self.started_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn opens_at_duration() {
        let mut gate = LoadingGate::new(Duration::ZERO, DEFAULT_LOADING_DURATION);
        assert!(!gate.advance(ms(2499)));
        assert_eq!(gate.phase(), LoadingPhase::Loading);
        assert!(gate.advance(ms(2500)));
        assert!(gate.is_ready());
    }

    #[test]
    fn transition_reported_once() {
        let mut gate = LoadingGate::new(Duration::ZERO, ms(100));
        assert!(gate.advance(ms(150)));
        assert!(!gate.advance(ms(200)));
        assert!(gate.is_ready());
    }

    #[test]
    fn stays_ready_if_time_goes_backwards() {
        let mut gate = LoadingGate::new(ms(1000), ms(100));
        gate.advance(ms(1100));
        gate.advance(ms(0));
        assert!(gate.is_ready());
    }

    #[test]
    fn measured_from_start() {
        let mut gate = LoadingGate::new(ms(1000), ms(500));
        assert!(!gate.advance(ms(1499)));
        assert_eq!(gate.remaining(ms(1200)), ms(300));
        assert!(gate.advance(ms(1500)));
        assert_eq!(gate.remaining(ms(1600)), Duration::ZERO);
    }

    #[test]
    fn zero_duration_opens_immediately() {
        let mut gate = LoadingGate::new(ms(10), Duration::ZERO);
        assert!(gate.advance(ms(10)));
    }
}
