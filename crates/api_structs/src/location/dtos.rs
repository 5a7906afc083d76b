use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use visit_reminder_domain::{Coordinates, Location, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationDTO {
    pub id: ID,
    pub name: String,
    pub coordinates: Coordinates,
    pub visit_time: DateTime<Utc>,
}

impl LocationDTO {
    pub fn new(location: Location) -> Self {
        Self {
            id: location.id,
            name: location.name,
            coordinates: location.coordinates,
            visit_time: location.visit_time,
        }
    }
}
