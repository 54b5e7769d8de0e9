//! Vessel records, their persisted shape, and the load-time repair step.
//!
//! Two shapes exist on purpose:
//!   - Vessel: the in-memory record. Its destination is always a full
//!     Harbor resolved against the catalog.
//!   - StoredVessel: the persisted record. Its destination is flattened
//!     to a plain harbor name on save; legacy blobs may still carry a
//!     full harbor object or nothing at all.
//!
//! repair() is the single migration point between the two. All defensive
//! handling of partial records lives there, nowhere else.

use crate::{
    harbor::{Harbor, HarborCatalog},
    rng::SimRng,
    types::Mmsi,
};
use serde::{Deserialize, Serialize};

/// AIS navigational status, serialized with the AIS wire strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NavStatus {
    #[serde(rename = "Underway using engine")]
    UnderwayEngine,
    #[serde(rename = "Underway")]
    Underway,
    #[serde(rename = "Anchored")]
    Anchored,
    #[serde(rename = "Moored")]
    Moored,
    #[serde(rename = "Not under command")]
    NotUnderCommand,
}

impl NavStatus {
    pub const ALL: [NavStatus; 5] = [
        NavStatus::UnderwayEngine,
        NavStatus::Underway,
        NavStatus::Anchored,
        NavStatus::Moored,
        NavStatus::NotUnderCommand,
    ];

    /// Statuses a vessel resamples from while making way.
    pub const UNDERWAY: [NavStatus; 2] = [NavStatus::UnderwayEngine, NavStatus::Underway];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OperationalStatus {
    #[serde(rename = "Fully Operational")]
    FullyOperational,
    #[serde(rename = "Limited Operational")]
    LimitedOperational,
    #[serde(rename = "Non-Operational")]
    NonOperational,
}

impl OperationalStatus {
    pub const ALL: [OperationalStatus; 3] = [
        OperationalStatus::FullyOperational,
        OperationalStatus::LimitedOperational,
        OperationalStatus::NonOperational,
    ];

    pub fn sample(rng: &mut SimRng) -> Self {
        *rng.pick(&Self::ALL)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SystemStatus {
    #[serde(rename = "All Systems Green")]
    AllSystemsGreen,
    #[serde(rename = "Minor Sensor Issues")]
    MinorSensorIssues,
    #[serde(rename = "Major Engine Failure")]
    MajorEngineFailure,
    #[serde(rename = "Weapon System Offline")]
    WeaponSystemOffline,
}

impl SystemStatus {
    pub const ALL: [SystemStatus; 4] = [
        SystemStatus::AllSystemsGreen,
        SystemStatus::MinorSensorIssues,
        SystemStatus::MajorEngineFailure,
        SystemStatus::WeaponSystemOffline,
    ];

    pub fn sample(rng: &mut SimRng) -> Self {
        *rng.pick(&Self::ALL)
    }
}

/// One simulated vessel.
///
/// Invariants (upheld by fleet::initialize, vessel::repair, nav::advance):
///   - destination is always a harbor present in the catalog
///   - speed >= MIN_SPEED while not moored, exactly 0.0 while moored
///   - course is normalized to [0, 360)
#[derive(Debug, Clone, PartialEq)]
pub struct Vessel {
    pub mmsi:               Mmsi,
    pub latitude:           f64,
    pub longitude:          f64,
    /// Knots.
    pub speed:              f64,
    /// Degrees, [0, 360).
    pub course:             f64,
    pub status:             NavStatus,
    pub destination:        Harbor,
    /// Metres below surface; 0.0 while moored.
    pub depth:              f64,
    pub operational_status: OperationalStatus,
    pub system_status:      SystemStatus,
}

/// Destination as it may appear in a persisted blob: a plain name
/// (current format) or a possibly-partial harbor object (legacy
/// format). Only the name matters; coordinates are re-resolved
/// against the catalog on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredDestination {
    Name(String),
    Object { name: String },
}

impl StoredDestination {
    fn name(&self) -> &str {
        match self {
            StoredDestination::Name(name) => name,
            StoredDestination::Object { name } => name,
        }
    }
}

/// The persisted shape of a vessel, using the AIS-like wire keys.
/// Optional fields cover records written by older simulator versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredVessel {
    #[serde(rename = "MMSI")]
    pub mmsi:               Mmsi,
    #[serde(rename = "Latitude")]
    pub latitude:           f64,
    #[serde(rename = "Longitude")]
    pub longitude:          f64,
    #[serde(rename = "Speed")]
    pub speed:              f64,
    #[serde(rename = "Course")]
    pub course:             f64,
    #[serde(rename = "Status")]
    pub status:             NavStatus,
    #[serde(rename = "Destination", default)]
    pub destination:        Option<StoredDestination>,
    #[serde(rename = "Depth", default)]
    pub depth:              Option<f64>,
    #[serde(rename = "Operational_Status", default)]
    pub operational_status: Option<OperationalStatus>,
    #[serde(rename = "System_Status", default)]
    pub system_status:      Option<SystemStatus>,
}

impl StoredVessel {
    /// Flatten a live vessel for persistence. The destination is stored
    /// as its name only; load() re-resolves it against the catalog.
    pub fn from_vessel(vessel: &Vessel) -> Self {
        Self {
            mmsi:               vessel.mmsi.clone(),
            latitude:           vessel.latitude,
            longitude:          vessel.longitude,
            speed:              vessel.speed,
            course:             vessel.course,
            status:             vessel.status,
            destination:        Some(StoredDestination::Name(vessel.destination.name.clone())),
            depth:              Some(vessel.depth),
            operational_status: Some(vessel.operational_status),
            system_status:      Some(vessel.system_status),
        }
    }
}

/// Migrate one persisted record to a live vessel.
///
/// A destination that is missing or names a harbor unknown to the
/// current catalog is replaced by a random catalog harbor. Missing
/// depth backfills to 0.0; missing status fields are sampled from
/// their option sets.
pub fn repair(raw: StoredVessel, catalog: &HarborCatalog, rng: &mut SimRng) -> Vessel {
    let destination = match raw.destination {
        Some(stored) => match catalog.lookup(stored.name()) {
            Some(harbor) => harbor.clone(),
            None => {
                log::warn!(
                    "vessel {}: unknown destination '{}', assigning a random harbor",
                    raw.mmsi,
                    stored.name()
                );
                catalog.random(rng).clone()
            }
        },
        None => catalog.random(rng).clone(),
    };

    Vessel {
        mmsi:               raw.mmsi,
        latitude:           raw.latitude,
        longitude:          raw.longitude,
        speed:              raw.speed,
        course:             raw.course,
        status:             raw.status,
        destination,
        depth:              raw.depth.unwrap_or(0.0),
        operational_status: raw
            .operational_status
            .unwrap_or_else(|| OperationalStatus::sample(rng)),
        system_status:      raw
            .system_status
            .unwrap_or_else(|| SystemStatus::sample(rng)),
    }
}
