use super::subscribers::RescheduleReminderOnLocationUpdated;
use crate::error::ApiError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use visit_reminder_api_structs::update_location::*;
use visit_reminder_domain::{Coordinates, Location, ID};
use visit_reminder_infra::VisitContext;

pub async fn update_location_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<VisitContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = UpdateLocationUseCase {
        location_id: path_params.location_id,
        name: body.name,
        coordinates: body.coordinates,
        visit_time: body.visit_time,
    };

    execute(usecase, &ctx)
        .await
        .map(|location| HttpResponse::Ok().json(APIResponse::new(location)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct UpdateLocationUseCase {
    pub location_id: ID,
    pub name: String,
    pub coordinates: Coordinates,
    pub visit_time: DateTime<Utc>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidCoordinates,
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(location_id) => Self::NotFound(format!(
                "The location with id: {}, was not found.",
                location_id
            )),
            UseCaseError::InvalidCoordinates => {
                Self::BadClientData("Invalid coordinates specified for the location".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateLocationUseCase {
    type Response = Location;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateLocation";

    const EXCLUSIVE: bool = true;

    async fn execute(&mut self, ctx: &VisitContext) -> Result<Self::Response, Self::Error> {
        let mut location = match ctx.repos.locations.find(&self.location_id).await {
            Some(location) => location,
            None => return Err(UseCaseError::NotFound(self.location_id)),
        };

        if !self.coordinates.is_valid() {
            return Err(UseCaseError::InvalidCoordinates);
        }

        location.name = self.name.clone();
        location.coordinates = self.coordinates;
        location.visit_time = self.visit_time;

        ctx.repos
            .locations
            .save(&location)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(location)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RescheduleReminderOnLocationUpdated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::Duration;

    struct TestContext {
        ctx: VisitContext,
        location: Location,
    }

    async fn setup(visit_time: DateTime<Utc>) -> TestContext {
        let ctx = VisitContext::create_inmemory();
        let location = Location::new(
            "Mercado Central".into(),
            Coordinates {
                lat: -3.7262,
                lng: -38.5293,
            },
            visit_time,
        );
        ctx.repos.locations.insert(&location).await.unwrap();
        ctx.reminders.location_created(&location);

        TestContext { ctx, location }
    }

    fn usecase(location: &Location, visit_time: DateTime<Utc>) -> UpdateLocationUseCase {
        UpdateLocationUseCase {
            location_id: location.id,
            name: "Mercado Central de Fortaleza".into(),
            coordinates: location.coordinates,
            visit_time,
        }
    }

    #[actix_web::test]
    async fn updates_location_and_reschedules_reminder() {
        let TestContext { ctx, location } = setup(Utc::now() + Duration::hours(2)).await;
        let new_visit_time = Utc::now() + Duration::hours(1);

        let updated = execute(usecase(&location, new_visit_time), &ctx)
            .await
            .unwrap();

        assert_eq!(updated.id, location.id);
        assert_eq!(updated.visit_time, new_visit_time);
        assert_eq!(
            ctx.repos.locations.find(&location.id).await,
            Some(updated.clone())
        );
        let entry = ctx.reminders.pending(&location.id).unwrap();
        assert_eq!(entry.fire_at, new_visit_time);
        assert_eq!(entry.location_name, "Mercado Central de Fortaleza");
        assert_eq!(ctx.reminders.pending_count(), 1);
    }

    #[actix_web::test]
    async fn moving_visit_to_the_past_cancels_reminder() {
        let TestContext { ctx, location } = setup(Utc::now() + Duration::hours(2)).await;

        execute(usecase(&location, Utc::now() - Duration::hours(1)), &ctx)
            .await
            .unwrap();

        assert!(ctx.reminders.pending(&location.id).is_none());
    }

    #[actix_web::test]
    async fn rejects_unknown_location() {
        let TestContext { ctx, location } = setup(Utc::now() + Duration::hours(2)).await;
        let mut usecase = usecase(&location, Utc::now() + Duration::hours(1));
        usecase.location_id = ID::new();
        let unknown_id = usecase.location_id;

        let res = execute(usecase, &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(unknown_id));
        // The reminder of the stored location is untouched
        assert_eq!(
            ctx.reminders.pending(&location.id).unwrap().fire_at,
            location.visit_time
        );
    }

    #[actix_web::test]
    async fn rejects_invalid_coordinates() {
        let TestContext { ctx, location } = setup(Utc::now() + Duration::hours(2)).await;
        let mut usecase = usecase(&location, Utc::now() + Duration::hours(1));
        usecase.coordinates.lng = 200.0;

        let res = execute(usecase, &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::InvalidCoordinates);
        assert_eq!(
            ctx.repos.locations.find(&location.id).await,
            Some(location)
        );
    }
}
