//! marisim-core — deterministic Baltic Sea ship-movement simulator.
//!
//! One tick = one invocation: load the persisted fleet, advance every
//! vessel toward its destination harbor, persist, emit one AIS-like
//! position report per vessel as NDJSON.
//!
//! RULES:
//!   - All randomness flows through an injected SimRng. Nothing in the
//!     simulation may call a platform RNG.
//!   - Only store.rs talks to the filesystem.
//!   - Errors never escape the engine boundary; tick() always returns
//!     a TickOutput.

pub mod config;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod harbor;
pub mod nav;
pub mod report;
pub mod rng;
pub mod store;
pub mod types;
pub mod vessel;
