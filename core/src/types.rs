//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one engine invocation.
pub type Tick = u64;

/// MMSI-style vessel identifier, assigned at creation, never reassigned.
pub type Mmsi = String;
