use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A `Location` is a place on the map that the user intends to visit
/// at `visit_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: ID,
    /// Display name, may be empty
    pub name: String,
    pub coordinates: Coordinates,
    pub visit_time: DateTime<Utc>,
}

impl Location {
    pub fn new(name: String, coordinates: Coordinates, visit_time: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            name,
            coordinates,
            visit_time,
        }
    }

    /// Time left until the visit, as seen from `now_ts` (millis).
    /// A visit time in the past or present gives `None`.
    pub fn reminder_delay(&self, now_ts: i64) -> Option<Duration> {
        let delay_millis = self.visit_time.timestamp_millis() - now_ts;
        if delay_millis > 0 {
            Some(Duration::from_millis(delay_millis as u64))
        } else {
            None
        }
    }
}

impl Entity for Location {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}
