//! Fleet load/save and initialization.
//!
//! The fleet lives in the store as a single JSON array under STATE_KEY,
//! with each destination flattened to its harbor name. A second small
//! blob under META_KEY tracks the fleet size last simulated: changing
//! the configured size invalidates the main state and forces a fresh
//! initialization at the new size.

use crate::{
    error::SimResult,
    harbor::HarborCatalog,
    nav,
    rng::SimRng,
    store::StateStore,
    vessel::{self, NavStatus, OperationalStatus, StoredVessel, SystemStatus, Vessel},
};
use serde::{Deserialize, Serialize};

pub const STATE_KEY: &str = "fleet.json";
pub const META_KEY: &str = "fleet_meta.json";

/// Jitter applied around the start harbor at initialization, degrees.
const START_JITTER: f64 = 1.0;

#[derive(Debug, Serialize, Deserialize)]
struct FleetMeta {
    fleet_size: usize,
}

/// Load the persisted fleet, repairing each record, or initialize a
/// fresh fleet of `fleet_size` vessels when no state exists.
pub fn load<S: StateStore>(
    store: &S,
    catalog: &HarborCatalog,
    rng: &mut SimRng,
    fleet_size: usize,
) -> SimResult<Vec<Vessel>> {
    match store.read(STATE_KEY)? {
        Some(blob) => {
            let raw: Vec<StoredVessel> = serde_json::from_str(&blob)?;
            Ok(raw
                .into_iter()
                .map(|stored| vessel::repair(stored, catalog, rng))
                .collect())
        }
        None => {
            log::info!("no persisted fleet, initializing {fleet_size} vessels");
            Ok(initialize(catalog, rng, fleet_size))
        }
    }
}

/// Persist the fleet, destinations flattened to harbor names.
pub fn save<S: StateStore>(store: &mut S, fleet: &[Vessel]) -> SimResult<()> {
    let stored: Vec<StoredVessel> = fleet.iter().map(StoredVessel::from_vessel).collect();
    store.write(STATE_KEY, &serde_json::to_string(&stored)?)
}

/// Discard the persisted fleet when the configured size differs from
/// the size last simulated. Returns true when a reset happened.
pub fn reset_if_resized<S: StateStore>(store: &mut S, fleet_size: usize) -> SimResult<bool> {
    // A missing or malformed marker reads as "unknown size".
    let last: Option<usize> = store
        .read(META_KEY)?
        .and_then(|blob| serde_json::from_str::<FleetMeta>(&blob).ok())
        .map(|meta| meta.fleet_size);

    if last == Some(fleet_size) {
        return Ok(false);
    }

    log::info!(
        "fleet size changed from {last:?} to {fleet_size}, reinitializing simulation"
    );
    store.remove(STATE_KEY)?;
    store.write(META_KEY, &serde_json::to_string(&FleetMeta { fleet_size })?)?;
    Ok(true)
}

/// Build a brand-new fleet. Each vessel starts jittered around a random
/// harbor, bound for a different harbor when the catalog allows one.
pub fn initialize(catalog: &HarborCatalog, rng: &mut SimRng, fleet_size: usize) -> Vec<Vessel> {
    (0..fleet_size)
        .map(|i| {
            let start = catalog.random(rng).clone();
            let destination = catalog.random_other(&start.name, rng).clone();
            let status = *rng.pick(&NavStatus::ALL);
            let moored = status == NavStatus::Moored;
            Vessel {
                mmsi:               format!("MAR{}", 123_400 + i),
                latitude:           start.latitude + rng.range_f64(-START_JITTER, START_JITTER),
                longitude:          start.longitude + rng.range_f64(-START_JITTER, START_JITTER),
                speed:              if moored { 0.0 } else { rng.range_f64(nav::MIN_SPEED, 10.0) },
                course:             rng.range_f64(0.0, 360.0),
                status,
                destination,
                depth:              if moored { 0.0 } else { rng.range_f64(5.0, 15.0) },
                operational_status: OperationalStatus::sample(rng),
                system_status:      SystemStatus::sample(rng),
            }
        })
        .collect()
}
