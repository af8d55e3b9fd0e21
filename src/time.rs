//! Frame scheduling for effects.
//!
//! The host environment's animation clock delivers one callback per display
//! refresh; each callback runs to completion before the next is scheduled.
//! [`FrameClock`] wraps that model behind an explicit start/stop lifecycle so
//! an effect can also be driven deterministically in tests: call
//! [`FrameClock::advance`] with a synthetic delta instead of waiting on a
//! real refresh interval.
//!
//! # Example
//!
//! ```ignore
//! use marquee::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.start();
//!
//! // In the redraw handler:
//! if let Some((elapsed, delta)) = clock.tick() {
//!     field.update();
//! }
//! ```

use std::time::{Duration, Instant};

/// Explicit animation-clock abstraction.
///
/// Tracks elapsed time, per-frame delta, frame count, and a periodic FPS
/// estimate. While stopped, `tick()` yields nothing and elapsed time does not
/// accumulate.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created or last reset.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time in seconds (cached for fast access).
    elapsed_secs: f32,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update the FPS estimate.
    fps_update_interval: Duration,
    /// Whether the clock is currently delivering frames.
    running: bool,
    /// Time spent stopped, subtracted from elapsed.
    stopped_elapsed: Duration,
    /// Fixed delta time for deterministic updates (optional).
    fixed_delta: Option<f32>,
}

impl FrameClock {
    /// Create a stopped clock. Call [`start`](Self::start) to begin
    /// delivering frames.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            running: false,
            stopped_elapsed: Duration::ZERO,
            fixed_delta: None,
        }
    }

    /// Begin delivering frames. The stopped interval is excluded from
    /// elapsed time.
    pub fn start(&mut self) {
        if !self.running {
            let now = Instant::now();
            self.stopped_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.running = true;
        }
    }

    /// Stop delivering frames. Subsequent `tick()` calls return `None`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Toggle between running and stopped.
    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Whether the clock is currently running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one real-time frame. Call once per redraw.
    ///
    /// Returns `(elapsed, delta)` in seconds, or `None` while stopped.
    pub fn tick(&mut self) -> Option<(f32, f32)> {
        if !self.running {
            // Keep the stopped span accounted for even when the host polls
            // every redraw, so start() only adds the remainder.
            let now = Instant::now();
            self.stopped_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            return None;
        }

        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta);
        self.last_frame = now;

        let raw_elapsed = now.duration_since(self.start) - self.stopped_elapsed;
        self.elapsed_secs = raw_elapsed.as_secs_f32();
        self.frame_count += 1;

        // Update FPS periodically
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        Some((self.elapsed_secs, self.delta_secs))
    }

    /// Advance one synthetic frame by `delta` seconds, ignoring wall time.
    ///
    /// Works whether or not the clock is running. This is the deterministic
    /// driving path: tests step effects frame by frame without a real
    /// display-refresh clock.
    pub fn advance(&mut self, delta: f32) -> (f32, f32) {
        self.delta_secs = delta;
        self.elapsed_secs += delta;
        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed running time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames delivered since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Periodically updated frames-per-second estimate.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Force a fixed delta time regardless of wall time between ticks.
    ///
    /// Pass `None` to return to real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Reset to the initial stopped state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
