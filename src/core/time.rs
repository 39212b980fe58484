//! Frame timing utilities
//!
//! The host owns the real clock and feeds frame deltas in; nothing here reads
//! wall time, so a recorded sequence of deltas always replays identically.

use std::collections::VecDeque;

/// Seconds of history kept for rolling frame statistics
const HISTORY_SECS: f32 = 5.0;

/// Frame statistics over the recent history window
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameStats {
    pub avg_fps: f32,
    pub min_fps: f32,
    pub max_fps: f32,
    /// FPS as of the last one-second boundary
    pub current_fps: f32,
    pub frame_count: u64,
}

/// Accumulates frame deltas and derives FPS
#[derive(Debug, Clone)]
pub struct FrameClock {
    elapsed: f32,
    delta: f32,
    frame_count: u64,
    fps: f32,
    fps_window: f32,
    fps_frames: u32,
    /// (elapsed at frame end, frame_time_secs)
    history: VecDeque<(f32, f32)>,
}

impl FrameClock {
    /// Create a new clock at time zero
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_window: 0.0,
            fps_frames: 0,
            history: VecDeque::new(),
        }
    }

    /// Call once per frame with the seconds since the previous frame.
    /// Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.delta = dt;
        self.elapsed += dt;
        self.frame_count += 1;
        self.fps_frames += 1;
        self.fps_window += dt;

        self.history.push_back((self.elapsed, dt));
        let cutoff = self.elapsed - HISTORY_SECS;
        while let Some(&(at, _)) = self.history.front() {
            if at < cutoff {
                self.history.pop_front();
            } else {
                break;
            }
        }

        if self.fps_window >= 1.0 {
            self.fps = self.fps_frames as f32 / self.fps_window;
            self.fps_frames = 0;
            self.fps_window = 0.0;
        }

        dt
    }

    /// Total seconds advanced so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Delta of the most recent frame in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    /// FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Rolling statistics over the last few seconds
    pub fn stats(&self) -> FrameStats {
        let mut total = 0.0f32;
        let mut min_fps = f32::INFINITY;
        let mut max_fps = 0.0f32;

        for &(_, frame_time) in &self.history {
            total += frame_time;
            let fps = if frame_time > 0.0 { 1.0 / frame_time } else { 0.0 };
            min_fps = min_fps.min(fps);
            max_fps = max_fps.max(fps);
        }

        if self.history.is_empty() {
            min_fps = 0.0;
        }

        let avg_fps = if total > 0.0 {
            self.history.len() as f32 / total
        } else {
            0.0
        };

        FrameStats {
            avg_fps,
            min_fps,
            max_fps,
            current_fps: self.fps,
            frame_count: self.frame_count,
        }
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

    #[test]
    fn test_fps_updates_each_second() {
        let mut clock = FrameClock::new();
        for _ in 0..60 {
            clock.advance(1.0 / 60.0);
        }
        // Float accumulation may land just under 1.0; one more frame crosses it.
        clock.advance(1.0 / 60.0);
        assert!((clock.fps() - 60.0).abs() < 1.0, "fps = {}", clock.fps());
        assert_eq!(clock.frame_count(), 61);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_history_is_pruned() {
        let mut clock = FrameClock::new();
        for _ in 0..100 {
            clock.advance(0.1);
        }
        let stats = clock.stats();
        assert!((stats.avg_fps - 10.0).abs() < 0.01);
        assert!(clock.history.len() <= 52);
    }

    #[test]
    fn test_empty_stats() {
        let clock = FrameClock::new();
        let stats = clock.stats();
        assert_eq!(stats.avg_fps, 0.0);
        assert_eq!(stats.min_fps, 0.0);
        assert_eq!(stats.frame_count, 0);
    }
}
