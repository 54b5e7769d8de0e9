//! Harbor catalog — the fixed table of Baltic Sea waypoints.
//!
//! Loaded once at engine construction, never mutated. lookup() returns
//! None for an unknown name; callers substitute a random harbor. That
//! substitution is the documented fallback policy for dangling
//! destination names in persisted state, not a defect to swallow.

use crate::rng::SimRng;
use serde::{Deserialize, Serialize};

/// A named waypoint vessels travel between.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Harbor {
    pub name: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// The 20 Baltic harbors the simulation routes between.
const BALTIC_HARBORS: [(&str, f64, f64); 20] = [
    ("Kiel", 54.3233, 10.1228),
    ("Rostock", 54.0887, 12.1405),
    ("Karlskrona", 56.1612, 15.5869),
    ("Gdynia", 54.5189, 18.5305),
    ("Świnoujście", 53.9106, 14.2478),
    ("Klaipėda", 55.7033, 21.1443),
    ("Riga", 56.9496, 24.1052),
    ("Tallinn", 59.4370, 24.7536),
    ("Helsinki", 60.1695, 24.9354),
    ("Rønne", 55.1037, 14.7065),
    ("Stockholm", 59.3293, 18.0686),
    ("Turku", 60.4518, 22.2666),
    ("Paldiski", 59.3567, 24.0539),
    ("Liepāja", 56.5110, 21.0136),
    ("Ventspils", 57.3890, 21.5610),
    ("Wismar", 53.8934, 11.4536),
    ("Stralsund", 54.3091, 13.0810),
    ("Sassnitz", 54.5183, 13.6414),
    ("Gdańsk", 54.3520, 18.6466),
    ("Ustka", 54.5801, 16.8596),
];

pub struct HarborCatalog {
    harbors: Vec<Harbor>,
}

impl HarborCatalog {
    /// The canonical Baltic Sea catalog.
    pub fn baltic() -> Self {
        Self::new(
            BALTIC_HARBORS
                .iter()
                .map(|&(name, latitude, longitude)| Harbor {
                    name: name.to_string(),
                    latitude,
                    longitude,
                })
                .collect(),
        )
    }

    /// A custom catalog. Must be non-empty.
    pub fn new(harbors: Vec<Harbor>) -> Self {
        assert!(!harbors.is_empty(), "harbor catalog must be non-empty");
        Self { harbors }
    }

    /// Find a harbor by name. None means the name is unknown to this
    /// catalog — the caller decides the fallback.
    pub fn lookup(&self, name: &str) -> Option<&Harbor> {
        self.harbors.iter().find(|h| h.name == name)
    }

    /// Pick any harbor, uniformly.
    pub fn random(&self, rng: &mut SimRng) -> &Harbor {
        rng.pick(&self.harbors)
    }

    /// Pick a harbor whose name differs from `exclude`, uniformly.
    /// Falls back to any harbor when the catalog has no other entry.
    pub fn random_other(&self, exclude: &str, rng: &mut SimRng) -> &Harbor {
        let candidates: Vec<&Harbor> =
            self.harbors.iter().filter(|h| h.name != exclude).collect();
        if candidates.is_empty() {
            return self.random(rng);
        }
        *rng.pick(&candidates)
    }
}
