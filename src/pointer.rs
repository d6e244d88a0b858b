use std::time::Instant;

use crate::input::Impulse;

/// Force per pixel of pointer travel between two samples.
const DRAG_FORCE: f64 = 5.0;
/// Density per unit of drag force.
const DRAG_DENSITY: f64 = 6.0;
/// Density per millisecond the pointer is held still.
const HOLD_DENSITY: f64 = 20.0;

/// Turns pointer samples in display pixels into impulses. Dragging pushes
/// fluid along the motion; holding the button pours in density.
#[derive(Clone, Debug)]
pub struct DragTracker {
    cell_length: i64,
    last: Option<(i64, i64)>,
    held_since: Option<Instant>,
}

impl DragTracker {
    pub fn new(cell_length: u32) -> Self {
        DragTracker {
            cell_length: i64::from(cell_length.max(1)),
            last: None,
            held_since: None,
        }
    }

    /// Pixel to padded-grid cell.
    pub fn cell(&self, px: i64, py: i64) -> (i64, i64) {
        (px.div_euclid(self.cell_length) + 1, py.div_euclid(self.cell_length) + 1)
    }

    pub fn is_pressed(&self) -> bool {
        self.held_since.is_some()
    }

    pub fn press(&mut self, px: i64, py: i64, now: Instant) {
        self.last = Some((px, py));
        self.held_since = Some(now);
    }

    pub fn release(&mut self) {
        self.held_since = None;
    }

    pub fn drag(&mut self, px: i64, py: i64, now: Instant) -> Impulse {
        let (force_x, force_y) = match self.last {
            Some((lx, ly)) => (DRAG_FORCE * (px - lx) as f64, DRAG_FORCE * (py - ly) as f64),
            None => (0.0, 0.0),
        };
        self.last = Some((px, py));
        if self.held_since.is_some() {
            self.held_since = Some(now);
        }

        let (x, y) = self.cell(px, py);
        Impulse::new(x, y, force_x, force_y, DRAG_DENSITY * force_x.hypot(force_y))
    }

    /// Density poured in since the last drag or hold while the pointer is
    /// down and not moving.
    pub fn hold(&mut self, now: Instant) -> Option<Impulse> {
        let since = self.held_since?;
        let (px, py) = self.last?;
        self.held_since = Some(now);

        let held_ms = now.saturating_duration_since(since).as_millis() as f64;
        let (x, y) = self.cell(px, py);
        Some(Impulse::new(x, y, 0.0, 0.0, HOLD_DENSITY * held_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cell_mapping() {
        let tracker = DragTracker::new(5);
        assert_eq!(tracker.cell(0, 0), (1, 1));
        assert_eq!(tracker.cell(4, 9), (1, 2));
        assert_eq!(tracker.cell(599, 499), (120, 100));
        assert_eq!(tracker.cell(-1, -6), (0, -1));
    }

    #[test]
    fn test_first_drag_has_no_force() {
        let mut tracker = DragTracker::new(5);
        let imp = tracker.drag(50, 50, Instant::now());
        assert_eq!(imp, Impulse::new(11, 11, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_drag_force_and_density() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::new(5);
        tracker.press(100, 100, t0);
        let imp = tracker.drag(103, 96, t0 + Duration::from_millis(10));
        assert_eq!(imp.x, 21);
        assert_eq!(imp.y, 20);
        assert_eq!(imp.force_x, 15.0);
        assert_eq!(imp.force_y, -20.0);
        assert!((imp.density - 6.0 * 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_hold_pours_density_over_time() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::new(5);
        assert!(tracker.hold(t0).is_none());

        tracker.press(20, 30, t0);
        let imp = tracker.hold(t0 + Duration::from_millis(50)).unwrap();
        assert_eq!((imp.x, imp.y), (5, 7));
        assert_eq!((imp.force_x, imp.force_y), (0.0, 0.0));
        assert_eq!(imp.density, 1000.0);

        // Clock restarts after each hold.
        let imp = tracker.hold(t0 + Duration::from_millis(60)).unwrap();
        assert_eq!(imp.density, 200.0);

        tracker.release();
        assert!(!tracker.is_pressed());
        assert!(tracker.hold(t0 + Duration::from_millis(90)).is_none());
    }

    #[test]
    fn test_drag_resets_hold_clock() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::new(5);
        tracker.press(20, 30, t0);
        tracker.drag(25, 30, t0 + Duration::from_millis(40));
        let imp = tracker.hold(t0 + Duration::from_millis(45)).unwrap();
        assert_eq!(imp.density, 100.0);
        assert_eq!((imp.x, imp.y), (6, 7));
    }
}
