//! Frame timing and delta time.
//!
//! The [`FrameClock`] is advanced by the loop driver at the start of each
//! tick. Update callbacks read it for the time-scaled, clamped delta and
//! the running total.

use std::time::Instant;

/// A frame longer than this is assumed to be a stall (backgrounded window,
/// debugger break), not real gameplay time.
const MAX_FRAME_DELTA: f32 = 0.1;

/// Delta substituted for a stalled frame: one 60 Hz step. The lost wall
/// time is dropped, not accumulated — the simulation resumes instead of
/// fast-forwarding through the pause.
const FALLBACK_DELTA: f32 = 0.016;

/// Frame clock: scaled delta, running total, previous frame timestamp.
#[derive(Clone, Copy)]
pub struct FrameClock {
    delta: f32,
    total: f32,
    prev_frame: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            delta: 0.0,
            total: 0.0,
            prev_frame: now,
        }
    }

    /// Advance to `now`. The raw delta is scaled by `time_speed` first,
    /// then clamped: anything over [`MAX_FRAME_DELTA`] becomes exactly
    /// [`FALLBACK_DELTA`].
    pub fn advance(&mut self, now: Instant, time_speed: f32) {
        let mut delta = (now - self.prev_frame).as_secs_f32() * time_speed;
        if delta > MAX_FRAME_DELTA {
            delta = FALLBACK_DELTA;
        }
        self.delta = delta;
        self.total += delta;
        self.prev_frame = now;
    }

    /// Seconds elapsed this frame (scaled, clamped).
    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    /// Total scaled seconds accumulated across all frames. Monotonic.
    pub fn total_secs(&self) -> f32 {
        self.total
    }

    /// Estimated FPS from the last frame's delta.
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 { 1.0 / self.delta } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn normal_frame_measures_elapsed_time() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        clock.advance(start + Duration::from_millis(50), 1.0);
        assert!((clock.delta_secs() - 0.05).abs() < 1e-4);
    }

    #[test]
    fn long_stall_clamps_to_one_sixty_hz_step() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        clock.advance(start + Duration::from_secs(2), 1.0);
        assert_eq!(clock.delta_secs(), 0.016); // exactly the fallback, not 2.0
        assert_eq!(clock.total_secs(), 0.016); // the stall is dropped
    }

    #[test]
    fn time_speed_scales_before_the_clamp() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        // 60 ms at double speed = 0.12 s scaled, which trips the clamp.
        clock.advance(start + Duration::from_millis(60), 2.0);
        assert_eq!(clock.delta_secs(), 0.016);

        // 60 ms at half speed stays under it.
        let mut clock = FrameClock::new(start);
        clock.advance(start + Duration::from_millis(60), 0.5);
        assert!((clock.delta_secs() - 0.03).abs() < 1e-4);
    }

    #[test]
    fn total_accumulates_across_frames() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        clock.advance(start + Duration::from_millis(20), 1.0);
        clock.advance(start + Duration::from_millis(40), 1.0);
        clock.advance(start + Duration::from_millis(60), 1.0);
        assert!((clock.total_secs() - 0.06).abs() < 1e-4);
    }

    #[test]
    fn fps_reads_from_last_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        assert_eq!(clock.fps(), 0.0); // before the first frame
        clock.advance(start + Duration::from_millis(20), 1.0);
        assert!((clock.fps() - 50.0).abs() < 0.5);
    }
}
