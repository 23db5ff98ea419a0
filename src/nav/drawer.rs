//! Slide-in menu animation state.
//!
//! Time is passed in explicitly so the machine can be driven from a frame loop
//! or a test with synthetic instants.

use log::debug;
use std::time::{Duration, Instant};

/// Animation durations for the drawer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerTiming {
    pub open: Duration,
    pub close: Duration,
    /// Overlay dimming when the drawer is fully shown (0.0 - 1.0)
    pub overlay_opacity: f32,
}

impl Default for DrawerTiming {
    fn default() -> Self {
        Self {
            open: Duration::from_millis(280),
            close: Duration::from_millis(220),
            overlay_opacity: 0.5,
        }
    }
}

/// Phase of the drawer. `from` is the progress the animation started at, so a
/// reversed animation continues from where the previous one was interrupted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawerPhase {
    Closed,
    Opening { started: Instant, from: f32 },
    Open,
    Closing { started: Instant, from: f32 },
}

/// Reported by [`DrawerController::tick`] when an animation finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEvent {
    Opened,
    Closed,
}

#[derive(Debug, Clone)]
pub struct DrawerController {
    phase: DrawerPhase,
    timing: DrawerTiming,
}

impl DrawerController {
    pub fn new(timing: DrawerTiming) -> Self {
        Self {
            phase: DrawerPhase::Closed,
            timing,
        }
    }

    pub fn phase(&self) -> DrawerPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.phase, DrawerPhase::Closed)
    }

    /// Open or heading there
    pub fn is_opening_or_open(&self) -> bool {
        matches!(self.phase, DrawerPhase::Opening { .. } | DrawerPhase::Open)
    }

    /// Start opening. No-op when already open or opening; an in-flight close is
    /// cancelled and the drawer reverses from its current position.
    pub fn open(&mut self, now: Instant) {
        match self.phase {
            DrawerPhase::Open | DrawerPhase::Opening { .. } => {}
            DrawerPhase::Closed => {
                debug!("drawer: closed -> opening");
                self.phase = DrawerPhase::Opening { started: now, from: 0.0 };
            }
            DrawerPhase::Closing { .. } => {
                let from = self.progress(now);
                debug!("drawer: closing -> opening (from {:.2})", from);
                self.phase = DrawerPhase::Opening { started: now, from };
            }
        }
    }

    /// Start closing. No-op when already closed or closing.
    pub fn close(&mut self, now: Instant) {
        match self.phase {
            DrawerPhase::Closed | DrawerPhase::Closing { .. } => {}
            DrawerPhase::Open => {
                debug!("drawer: open -> closing");
                self.phase = DrawerPhase::Closing { started: now, from: 1.0 };
            }
            DrawerPhase::Opening { .. } => {
                let from = self.progress(now);
                debug!("drawer: opening -> closing (from {:.2})", from);
                self.phase = DrawerPhase::Closing { started: now, from };
            }
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_opening_or_open() {
            self.close(now);
        } else {
            self.open(now);
        }
    }

    /// Advance the animation, reporting when it settles
    pub fn tick(&mut self, now: Instant) -> Option<DrawerEvent> {
        match self.phase {
            DrawerPhase::Opening { .. } if self.progress(now) >= 1.0 => {
                self.phase = DrawerPhase::Open;
                Some(DrawerEvent::Opened)
            }
            DrawerPhase::Closing { .. } if self.progress(now) <= 0.0 => {
                self.phase = DrawerPhase::Closed;
                Some(DrawerEvent::Closed)
            }
            _ => None,
        }
    }

    /// How far the drawer is slid in, 0.0 (hidden) to 1.0 (fully shown)
    pub fn progress(&self, now: Instant) -> f32 {
        match self.phase {
            DrawerPhase::Closed => 0.0,
            DrawerPhase::Open => 1.0,
            DrawerPhase::Opening { started, from } => {
                (from + fraction(now.saturating_duration_since(started), self.timing.open)).min(1.0)
            }
            DrawerPhase::Closing { started, from } => {
                (from - fraction(now.saturating_duration_since(started), self.timing.close)).max(0.0)
            }
        }
    }

    /// Dimming of the content behind the drawer
    pub fn overlay_opacity(&self, now: Instant) -> f32 {
        self.progress(now) * self.timing.overlay_opacity
    }
}

impl Default for DrawerController {
    fn default() -> Self {
        Self::new(DrawerTiming::default())
    }
}

fn fraction(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    elapsed.as_secs_f32() / total.as_secs_f32()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> DrawerTiming {
        DrawerTiming {
            open: Duration::from_millis(200),
            close: Duration::from_millis(100),
            overlay_opacity: 0.5,
        }
    }

    #[test]
    fn test_full_cycle() {
        let t0 = Instant::now();
        let mut drawer = DrawerController::new(timing());

        drawer.open(t0);
        assert!(matches!(drawer.phase(), DrawerPhase::Opening { .. }));
        assert_eq!(drawer.tick(t0 + Duration::from_millis(100)), None);
        assert_eq!(drawer.tick(t0 + Duration::from_millis(200)), Some(DrawerEvent::Opened));
        assert_eq!(drawer.phase(), DrawerPhase::Open);

        let t1 = t0 + Duration::from_millis(300);
        drawer.close(t1);
        assert!(matches!(drawer.phase(), DrawerPhase::Closing { .. }));
        assert_eq!(drawer.tick(t1 + Duration::from_millis(50)), None);
        assert_eq!(drawer.tick(t1 + Duration::from_millis(100)), Some(DrawerEvent::Closed));
        assert!(drawer.is_closed());
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let now = Instant::now();
        let mut drawer = DrawerController::new(timing());
        drawer.close(now);
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
        assert_eq!(drawer.tick(now), None);
    }

    #[test]
    fn test_open_twice_equals_open_once() {
        let t0 = Instant::now();
        let mut once = DrawerController::new(timing());
        once.open(t0);

        let mut twice = DrawerController::new(timing());
        twice.open(t0);
        twice.open(t0 + Duration::from_millis(50));

        assert_eq!(once.phase(), twice.phase());
    }

    #[test]
    fn test_open_while_closing_reverses() {
        let t0 = Instant::now();
        let mut drawer = DrawerController::new(timing());
        drawer.open(t0);
        drawer.tick(t0 + Duration::from_millis(200));

        let t1 = t0 + Duration::from_millis(250);
        drawer.close(t1);
        let t2 = t1 + Duration::from_millis(50);
        drawer.open(t2);

        match drawer.phase() {
            DrawerPhase::Opening { started, from } => {
                assert_eq!(started, t2);
                assert!((from - 0.5).abs() < 0.01);
            }
            other => panic!("expected opening, got {:?}", other),
        }
        // The cancelled close never reports Closed
        assert_eq!(drawer.tick(t2 + Duration::from_millis(100)), Some(DrawerEvent::Opened));
    }

    #[test]
    fn test_overlay_follows_progress() {
        let t0 = Instant::now();
        let mut drawer = DrawerController::new(timing());
        assert_eq!(drawer.overlay_opacity(t0), 0.0);
        drawer.open(t0);
        let half = drawer.overlay_opacity(t0 + Duration::from_millis(100));
        assert!((half - 0.25).abs() < 0.01);
        drawer.tick(t0 + Duration::from_millis(200));
        assert_eq!(drawer.overlay_opacity(t0 + Duration::from_millis(200)), 0.5);
    }

    #[test]
    fn test_toggle() {
        let t0 = Instant::now();
        let mut drawer = DrawerController::new(timing());
        drawer.toggle(t0);
        assert!(drawer.is_opening_or_open());
        drawer.toggle(t0 + Duration::from_millis(10));
        assert!(matches!(drawer.phase(), DrawerPhase::Closing { .. }));
    }
}
