//! Frame clock for the driving loop.
//!
//! Tracks elapsed time, frame count and a periodically refreshed FPS
//! estimate. The simulation itself does not use wall time (one tick is one
//! timestep); the clock feeds camera motion and logging.

use std::time::{Duration, Instant};

/// Per-frame timing.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    elapsed_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Start a clock now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            elapsed_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_secs(1),
        }
    }

    /// Record a frame. Returns `true` when the FPS estimate was refreshed.
    pub fn update(&mut self) -> bool {
        let now = Instant::now();
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return true;
        }
        false
    }

    /// Seconds since the clock started, as of the last update.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_clock_update() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        clock.update();

        assert!(clock.elapsed() > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_fps_refresh() {
        let mut clock = FrameClock::new();
        clock.fps_update_interval = Duration::from_millis(5);
        thread::sleep(Duration::from_millis(10));
        assert!(clock.update());
        assert!(clock.fps() > 0.0);
    }
}
