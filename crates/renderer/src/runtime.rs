use std::time::{Duration, Instant};

/// Snapshot of the time state supplied to the shader uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Elapsed wall-clock time since the clock was created, in seconds.
    pub seconds: f32,
    /// Frame counter for the running session; resets on viewport resize.
    pub frame_index: u32,
}

/// Monotonic clock plus frame counter for the frame driver.
///
/// Elapsed time is never reset — it tracks the wall clock from construction —
/// while the frame counter restarts at zero whenever the viewport resizes, so
/// shaders never treat stale, mismatched-resolution history as valid.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
    frame: u32,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            origin: now,
            frame: 0,
        }
    }

    pub fn sample(&self, now: Instant) -> TimeSample {
        TimeSample {
            seconds: now.saturating_duration_since(self.origin).as_secs_f32(),
            frame_index: self.frame,
        }
    }

    /// Advances the frame counter; called once per completed tick.
    pub fn advance(&mut self) {
        self.frame = self.frame.saturating_add(1);
    }

    /// Restarts the frame counter without touching elapsed time.
    pub fn reset_frames(&mut self) {
        self.frame = 0;
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

/// Deadline-based throttle layered on top of the redraw loop.
///
/// With no FPS cap every redraw opportunity is taken and vsync paces the
/// loop. With a cap, redraws are withheld until the next deadline; the loop
/// parks on `next_deadline` instead of spinning.
#[derive(Debug, Clone, Copy)]
pub struct FrameScheduler {
    interval: Option<Duration>,
    next_frame: Option<Instant>,
}

impl FrameScheduler {
    pub fn new(target_fps: Option<f32>) -> Self {
        let interval = target_fps
            .filter(|fps| *fps > 0.0)
            .map(|fps| Duration::from_secs_f32(1.0 / fps));
        Self {
            interval,
            next_frame: None,
        }
    }

    pub fn ready_for_frame(&self, now: Instant) -> bool {
        match (self.interval, self.next_frame) {
            (None, _) | (_, None) => true,
            (Some(_), Some(deadline)) => now >= deadline,
        }
    }

    pub fn mark_rendered(&mut self, now: Instant) {
        self.next_frame = self.interval.map(|interval| now + interval);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.interval.and(self.next_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_counts_frames_and_seconds() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        assert_eq!(clock.sample(start).frame_index, 0);
        clock.advance();
        clock.advance();
        let sample = clock.sample(start + Duration::from_millis(1500));
        assert_eq!(sample.frame_index, 2);
        assert!((sample.seconds - 1.5).abs() < 1e-3);
    }

    #[test]
    fn frame_reset_preserves_elapsed_time() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        for _ in 0..10 {
            clock.advance();
        }
        assert_eq!(clock.frame(), 10);

        clock.reset_frames();
        let sample = clock.sample(start + Duration::from_secs(2));
        assert_eq!(sample.frame_index, 0);
        assert!(sample.seconds >= 2.0);
    }

    #[test]
    fn uncapped_scheduler_is_always_ready() {
        let mut scheduler = FrameScheduler::new(None);
        let now = Instant::now();
        assert!(scheduler.ready_for_frame(now));
        scheduler.mark_rendered(now);
        assert!(scheduler.ready_for_frame(now));
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn capped_scheduler_waits_for_deadline() {
        let mut scheduler = FrameScheduler::new(Some(50.0));
        let now = Instant::now();
        assert!(scheduler.ready_for_frame(now));
        scheduler.mark_rendered(now);
        assert!(!scheduler.ready_for_frame(now + Duration::from_millis(10)));
        assert!(scheduler.ready_for_frame(now + Duration::from_millis(20)));
        assert_eq!(
            scheduler.next_deadline(),
            Some(now + Duration::from_millis(20))
        );
    }

    #[test]
    fn zero_fps_treated_as_uncapped() {
        let scheduler = FrameScheduler::new(Some(0.0));
        assert!(scheduler.ready_for_frame(Instant::now()));
        assert!(scheduler.next_deadline().is_none());
    }
}
