//! Frame timing
//!
//! Turns the millisecond timestamps handed out by the display's frame
//! callback into simulation deltas in seconds.

use crate::consts::MAX_FRAME_DT;

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame, or `None` when the frame must be
    /// skipped: the very first frame, a stall longer than `MAX_FRAME_DT`,
    /// or a clock that ran backwards.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        let last = self.last_ms.replace(now_ms)?;
        let dt = ((now_ms - last) / 1000.0) as f32;
        if (0.0..=MAX_FRAME_DT).contains(&dt) {
            Some(dt)
        } else {
            log::debug!("Dropping frame with dt={dt:.3}s");
            None
        }
    }

    /// Forget the previous timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
