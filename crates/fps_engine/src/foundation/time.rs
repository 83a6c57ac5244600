//! Time management utilities

/// Elapsed-time counter gated by a threshold
///
/// The frame loop asks [`Accumulator::is_due`] before it adds the current
/// frame's delta, so a check sees the time accumulated over previous frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    elapsed: f32,
    threshold: f32,
}

impl Accumulator {
    /// Create an empty accumulator that becomes due after `threshold` seconds
    pub fn new(threshold: f32) -> Self {
        Self {
            elapsed: 0.0,
            threshold,
        }
    }

    /// Whether the accumulated time has reached the threshold
    pub fn is_due(&self) -> bool {
        self.elapsed >= self.threshold
    }

    /// Add elapsed seconds
    pub fn advance(&mut self, delta: f32) {
        self.elapsed += delta;
    }

    /// Start counting from zero again
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Seconds accumulated since the last reset
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
