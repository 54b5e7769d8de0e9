//! The tick orchestrator.
//!
//! EXECUTION ORDER (fixed, never reordered):
//!   1. Discard stale state if the configured fleet size changed.
//!   2. Load the fleet (initializing when no state exists).
//!   3. Advance every vessel by one tick.
//!   4. Persist the fleet.
//!   5. Emit one position report per vessel, newline-delimited.
//!
//! RULES:
//!   - tick() is the component boundary: every internal error is
//!     caught here and converted to a failure TickOutput, never
//!     propagated as a raw fault.
//!   - No retries. A failed tick is terminal for that invocation;
//!     the next invocation attempts a fresh load.
//!   - No transactional guarantee between load and save.

use crate::{
    error::SimResult,
    fleet,
    harbor::HarborCatalog,
    nav, report,
    rng::SimRng,
    store::StateStore,
    types::Tick,
};
use chrono::Utc;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// What one invocation hands back to the hosting pipeline: a UTF-8
/// payload plus descriptive attributes and a routing outcome.
#[derive(Debug)]
pub struct TickOutput {
    pub outcome:    Outcome,
    pub contents:   Vec<u8>,
    pub attributes: BTreeMap<String, String>,
}

impl TickOutput {
    fn success(ndjson: String) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert("format".to_string(), "ndjson".to_string());
        attributes.insert("ship.simulation".to_string(), "true".to_string());
        Self {
            outcome: Outcome::Success,
            contents: ndjson.into_bytes(),
            attributes,
        }
    }

    fn failure(message: String) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert("error".to_string(), message.clone());
        attributes.insert("ship.simulation.error".to_string(), "true".to_string());
        Self {
            outcome: Outcome::Failure,
            contents: format!("Error processing ship simulation: {message}").into_bytes(),
            attributes,
        }
    }
}

pub struct SimEngine<S: StateStore> {
    catalog:   HarborCatalog,
    store:     S,
    rng:       SimRng,
    ticks_run: Tick,
}

impl<S: StateStore> SimEngine<S> {
    pub fn new(catalog: HarborCatalog, store: S, seed: u64) -> Self {
        Self {
            catalog,
            store,
            rng: SimRng::seed_from(seed),
            ticks_run: 0,
        }
    }

    /// An engine over the canonical Baltic catalog.
    pub fn build(store: S, seed: u64) -> Self {
        Self::new(HarborCatalog::baltic(), store, seed)
    }

    pub fn ticks_run(&self) -> Tick {
        self.ticks_run
    }

    /// Direct store access, for tooling and tests.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advance the whole fleet by one tick. Never returns an error:
    /// internal failures become a failure TickOutput.
    pub fn tick(&mut self, fleet_size: usize) -> TickOutput {
        match self.run_tick(fleet_size) {
            Ok(ndjson) => TickOutput::success(ndjson),
            Err(e) => {
                log::error!("error during ship simulation: {e}");
                TickOutput::failure(e.to_string())
            }
        }
    }

    fn run_tick(&mut self, fleet_size: usize) -> SimResult<String> {
        fleet::reset_if_resized(&mut self.store, fleet_size)?;

        let mut vessels = fleet::load(&self.store, &self.catalog, &mut self.rng, fleet_size)?;
        for vessel in &mut vessels {
            nav::advance(vessel, &self.catalog, &mut self.rng);
        }
        fleet::save(&mut self.store, &vessels)?;

        let now = Utc::now();
        let mut ndjson = String::new();
        for vessel in &vessels {
            ndjson.push_str(&report::emit(vessel, now).to_ndjson()?);
        }

        self.ticks_run += 1;
        log::debug!("tick={} fleet={} reports emitted", self.ticks_run, vessels.len());
        Ok(ndjson)
    }
}
