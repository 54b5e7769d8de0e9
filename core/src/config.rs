//! Invocation configuration.
//!
//! The hosting environment supplies a single property: the fleet size,
//! as an optional string. Anything missing, non-numeric, or
//! non-positive falls back to the default — a bad property is never a
//! hard failure.

pub const DEFAULT_FLEET_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub fleet_size: usize,
}

impl SimConfig {
    pub fn from_property(raw: Option<&str>) -> Self {
        let fleet_size = raw
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_FLEET_SIZE);
        Self { fleet_size }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fleet_size: DEFAULT_FLEET_SIZE,
        }
    }
}
