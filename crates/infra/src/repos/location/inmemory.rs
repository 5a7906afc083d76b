use super::ILocationRepo;
use crate::repos::shared::inmemory_repo::*;
use visit_reminder_domain::{Location, ID};

pub struct InMemoryLocationRepo {
    locations: std::sync::Mutex<Vec<Location>>,
}

impl InMemoryLocationRepo {
    pub fn new() -> Self {
        Self {
            locations: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ILocationRepo for InMemoryLocationRepo {
    async fn insert(&self, location: &Location) -> anyhow::Result<()> {
        insert(location, &self.locations);
        Ok(())
    }

    async fn save(&self, location: &Location) -> anyhow::Result<()> {
        if save(location, &self.locations) {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Location {} is not stored", location.id))
        }
    }

    async fn find(&self, location_id: &ID) -> Option<Location> {
        find(location_id, &self.locations)
    }

    async fn find_all(&self) -> Vec<Location> {
        find_by(&self.locations, |_| true)
    }

    async fn delete(&self, location_id: &ID) -> Option<Location> {
        delete(location_id, &self.locations)
    }
}
