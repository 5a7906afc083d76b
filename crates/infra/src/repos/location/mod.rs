mod inmemory;

pub use inmemory::InMemoryLocationRepo;
use visit_reminder_domain::{Location, ID};

#[async_trait::async_trait]
pub trait ILocationRepo: Send + Sync {
    async fn insert(&self, location: &Location) -> anyhow::Result<()>;
    async fn save(&self, location: &Location) -> anyhow::Result<()>;
    async fn find(&self, location_id: &ID) -> Option<Location>;
    async fn find_all(&self) -> Vec<Location>;
    async fn delete(&self, location_id: &ID) -> Option<Location>;
}

#[cfg(test)]
mod tests {
    use crate::VisitContext;
    use chrono::Utc;
    use visit_reminder_domain::{Coordinates, Location};

    fn location(name: &str) -> Location {
        Location::new(
            name.into(),
            Coordinates {
                lat: 59.91,
                lng: 10.75,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn create_and_delete() {
        let ctx = VisitContext::create_inmemory();
        let location = location("Vigeland Park");

        // Insert
        assert!(ctx.repos.locations.insert(&location).await.is_ok());

        // Find
        let res = ctx.repos.locations.find(&location.id).await;
        assert_eq!(res, Some(location.clone()));

        // Delete
        let res = ctx.repos.locations.delete(&location.id).await;
        assert_eq!(res, Some(location.clone()));

        // Find
        assert!(ctx.repos.locations.find(&location.id).await.is_none());
        // Delete again is a no-op
        assert!(ctx.repos.locations.delete(&location.id).await.is_none());
    }

    #[tokio::test]
    async fn update() {
        let ctx = VisitContext::create_inmemory();
        let mut location = location("Opera House");
        ctx.repos.locations.insert(&location).await.unwrap();

        location.name = "Oslo Opera House".into();
        assert!(ctx.repos.locations.save(&location).await.is_ok());

        let res = ctx.repos.locations.find(&location.id).await.unwrap();
        assert_eq!(res.name, "Oslo Opera House");
    }

    #[tokio::test]
    async fn save_of_unknown_location_fails() {
        let ctx = VisitContext::create_inmemory();
        assert!(ctx.repos.locations.save(&location("Nowhere")).await.is_err());
    }

    #[tokio::test]
    async fn find_all() {
        let ctx = VisitContext::create_inmemory();
        let locations = vec![location("A"), location("B"), location("C")];
        for location in &locations {
            ctx.repos.locations.insert(location).await.unwrap();
        }

        let res = ctx.repos.locations.find_all().await;
        assert_eq!(res, locations);
    }
}
