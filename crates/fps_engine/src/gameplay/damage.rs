//! Damage capability for scene leaves

use std::fmt;

/// Outcome of taking one unit of damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    /// Health remaining after the hit
    Alive(u32),
    /// No health left
    Depleted,
}

/// A leaf that can receive combat damage
pub trait Damageable: fmt::Debug + Send + Sync {
    /// Take one unit of damage
    fn decrease_health(&mut self) -> HealthState;

    /// Current health
    fn health(&self) -> u32;

    /// Whether health has run out
    fn is_depleted(&self) -> bool {
        self.health() == 0
    }
}

/// Plain health pool saturating at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    /// Full health pool
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Maximum health
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Refill to maximum
    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

impl Damageable for Health {
    fn decrease_health(&mut self) -> HealthState {
        self.current = self.current.saturating_sub(1);
        match self.current {
            0 => HealthState::Depleted,
            left => HealthState::Alive(left),
        }
    }

    fn health(&self) -> u32 {
        self.current
    }
}
