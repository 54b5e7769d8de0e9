//! Position report emission — one AIS-like NDJSON record per vessel.

use crate::vessel::{NavStatus, OperationalStatus, SystemStatus, Vessel};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One emitted position report. Field names match the downstream
/// pipeline's expected wire keys.
#[derive(Debug, Clone, Serialize)]
pub struct PositionReport {
    #[serde(rename = "MMSI")]
    pub mmsi:               String,
    /// UTC, millisecond precision.
    #[serde(rename = "Event_Timestamp")]
    pub event_timestamp:    String,
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
    #[serde(rename = "Destination")]
    pub destination:        String,
    #[serde(rename = "Depth")]
    pub depth:              f64,
    #[serde(rename = "Operational_Status")]
    pub operational_status: OperationalStatus,
    #[serde(rename = "System_Status")]
    pub system_status:      SystemStatus,
}

/// Build a report from the vessel's current state. Positions round to
/// 5 decimal places, speed/course/depth to 1.
pub fn emit(vessel: &Vessel, now: DateTime<Utc>) -> PositionReport {
    PositionReport {
        mmsi:               vessel.mmsi.clone(),
        event_timestamp:    now.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        latitude:           round_to(vessel.latitude, 5),
        longitude:          round_to(vessel.longitude, 5),
        speed:              round_to(vessel.speed, 1),
        course:             round_to(vessel.course, 1),
        status:             vessel.status,
        destination:        vessel.destination.name.clone(),
        depth:              round_to(vessel.depth, 1),
        operational_status: vessel.operational_status,
        system_status:      vessel.system_status,
    }
}

impl PositionReport {
    pub fn to_ndjson(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string(self)?;
        json.push('\n');
        Ok(json)
    }
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
