use crate::dtos::LocationDTO;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use visit_reminder_domain::{Coordinates, Location, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub location: LocationDTO,
}

impl LocationResponse {
    pub fn new(location: Location) -> Self {
        Self {
            location: LocationDTO::new(location),
        }
    }
}

pub mod create_location {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub coordinates: Coordinates,
        pub visit_time: DateTime<Utc>,
    }

    pub type APIResponse = LocationResponse;
}

pub mod update_location {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub location_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub coordinates: Coordinates,
        pub visit_time: DateTime<Utc>,
    }

    pub type APIResponse = LocationResponse;
}

pub mod delete_location {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub location_id: ID,
    }

    pub type APIResponse = LocationResponse;
}

pub mod get_locations {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub locations: Vec<LocationDTO>,
    }

    impl APIResponse {
        pub fn new(locations: Vec<Location>) -> Self {
            Self {
                locations: locations.into_iter().map(LocationDTO::new).collect(),
            }
        }
    }
}
