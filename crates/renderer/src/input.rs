use std::time::{Duration, Instant};

/// How long the pointer may rest before injection is suppressed.
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(500);

/// Tracks pointer movement in surface space for the simulation pass.
///
/// Positions are stored bottom-left origin to match the shader convention, so
/// the Y coordinate is flipped on the way in. Handlers only ever replace the
/// whole record; the frame driver reads one 4-tuple per tick via [`sample`],
/// so the last write before a tick wins.
///
/// [`sample`]: PointerTracker::sample
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    current: [f32; 2],
    previous: [f32; 2],
    last_move: Option<Instant>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer movement at window position `(x, y)` (top-left origin).
    pub fn pointer_moved(&mut self, x: f32, y: f32, surface_height: f32, now: Instant) {
        self.previous = self.current;
        self.current = [x, surface_height - y];
        self.last_move = Some(now);
    }

    /// Zeroes the pointer immediately; an explicit signal, not a timeout.
    pub fn pointer_left(&mut self) {
        self.current = [0.0, 0.0];
        self.previous = [0.0, 0.0];
        self.last_move = None;
    }

    /// Resolves the `(currentX, currentY, previousX, previousY)` tuple fed to
    /// the simulation. Returns the zero vector once the pointer has rested
    /// longer than [`IDLE_TIMEOUT`], so the field decays to quiescence instead
    /// of freezing an injection at a stale position.
    pub fn sample(&self, now: Instant) -> [f32; 4] {
        match self.last_move {
            Some(last_move) if now.saturating_duration_since(last_move) <= IDLE_TIMEOUT => [
                self.current[0],
                self.current[1],
                self.previous[0],
                self.previous[1],
            ],
            _ => [0.0; 4],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_y_to_bottom_left_origin() {
        let mut pointer = PointerTracker::new();
        let now = Instant::now();
        pointer.pointer_moved(10.0, 30.0, 600.0, now);
        assert_eq!(pointer.sample(now), [10.0, 570.0, 0.0, 0.0]);
    }

    #[test]
    fn tracks_previous_position() {
        let mut pointer = PointerTracker::new();
        let now = Instant::now();
        pointer.pointer_moved(10.0, 20.0, 600.0, now);
        pointer.pointer_moved(40.0, 50.0, 600.0, now);
        assert_eq!(pointer.sample(now), [40.0, 550.0, 10.0, 580.0]);
    }

    #[test]
    fn idle_timeout_zeroes_sample() {
        let mut pointer = PointerTracker::new();
        let start = Instant::now();
        pointer.pointer_moved(100.0, 100.0, 600.0, start);

        let just_before = start + Duration::from_millis(499);
        assert_eq!(pointer.sample(just_before), [100.0, 500.0, 0.0, 0.0]);

        let just_after = start + Duration::from_millis(501);
        assert_eq!(pointer.sample(just_after), [0.0; 4]);
    }

    #[test]
    fn leave_zeroes_immediately() {
        let mut pointer = PointerTracker::new();
        let now = Instant::now();
        pointer.pointer_moved(100.0, 100.0, 600.0, now);
        pointer.pointer_left();
        assert_eq!(pointer.sample(now), [0.0; 4]);
    }

    #[test]
    fn quiescent_before_first_movement() {
        let pointer = PointerTracker::new();
        assert_eq!(pointer.sample(Instant::now()), [0.0; 4]);
    }
}
