//! Navigation engine — one tick of movement for one vessel.
//!
//! Planar math on decimal degrees, not great circles. At Baltic
//! latitudes with harbors a few hundred km apart and a re-simulation
//! every tick, the planar error never accumulates far enough to matter.

use crate::{
    harbor::HarborCatalog,
    rng::SimRng,
    vessel::{NavStatus, Vessel},
};

/// Degrees of latitude per nautical mile.
pub const NAUTICAL_MILE_TO_DEGREE: f64 = 1.0 / 60.0;

/// Both axes within this many degrees of the destination counts as
/// arrived.
pub const PROXIMITY_THRESHOLD: f64 = 0.05;

/// Bounded random walk applied to speed each tick, knots.
pub const SPEED_FLUCTUATION: f64 = 0.5;

/// Speed floor for a vessel that is not moored, knots.
pub const MIN_SPEED: f64 = 1.0;

/// Below this per-axis distance the course is left unchanged rather
/// than recomputed from a near-zero delta.
const COURSE_EPSILON: f64 = 1e-6;

/// Advance one vessel by one tick, in place.
pub fn advance(vessel: &mut Vessel, catalog: &HarborCatalog, rng: &mut SimRng) {
    let dest = vessel.destination.clone();

    let (new_lat, new_lon) = move_towards(
        vessel.latitude,
        vessel.longitude,
        dest.latitude,
        dest.longitude,
        vessel.speed,
    );
    vessel.latitude = new_lat;
    vessel.longitude = new_lon;

    if (dest.latitude - new_lat).abs() > COURSE_EPSILON
        || (dest.longitude - new_lon).abs() > COURSE_EPSILON
    {
        vessel.course = bearing(new_lat, new_lon, dest.latitude, dest.longitude);
    }

    if vessel.status != NavStatus::Moored {
        vessel.speed =
            (vessel.speed + rng.range_f64(-SPEED_FLUCTUATION, SPEED_FLUCTUATION)).max(MIN_SPEED);
        vessel.status = *rng.pick(&NavStatus::UNDERWAY);
        vessel.depth = rng.range_f64(5.0, 15.0);
    } else {
        vessel.depth = 0.0;
    }

    let arrived = (vessel.latitude - dest.latitude).abs() < PROXIMITY_THRESHOLD
        && (vessel.longitude - dest.longitude).abs() < PROXIMITY_THRESHOLD;
    if arrived {
        let next = catalog.random_other(&dest.name, rng).clone();
        log::debug!(
            "vessel {} arrived at {}, next destination {}",
            vessel.mmsi,
            dest.name,
            next.name
        );
        vessel.destination = next;
        vessel.status = NavStatus::Moored;
        vessel.speed = 0.0;
        vessel.depth = 0.0;
    }
}

/// Next position on the straight segment toward the destination.
/// The move ratio is capped at 1.0, so a single tick can never
/// overshoot the destination.
pub fn move_towards(lat1: f64, lon1: f64, lat2: f64, lon2: f64, speed: f64) -> (f64, f64) {
    let delta_lat = lat2 - lat1;
    let delta_lon = lon2 - lon1;
    let dist_deg = delta_lat.hypot(delta_lon);

    if dist_deg == 0.0 {
        return (lat2, lon2);
    }

    let move_deg = speed * NAUTICAL_MILE_TO_DEGREE;
    let ratio = (move_deg / dist_deg).min(1.0);

    (lat1 + delta_lat * ratio, lon1 + delta_lon * ratio)
}

/// Bearing from (lat1, lon1) toward (lat2, lon2) in degrees, [0, 360).
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    (lon2 - lon1).atan2(lat2 - lat1).to_degrees().rem_euclid(360.0)
}
