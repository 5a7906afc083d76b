use super::subscribers::ScheduleReminderOnLocationCreated;
use crate::error::ApiError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use visit_reminder_api_structs::create_location::*;
use visit_reminder_domain::{Coordinates, Location};
use visit_reminder_infra::VisitContext;

pub async fn create_location_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<VisitContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = CreateLocationUseCase {
        name: body.name,
        coordinates: body.coordinates,
        visit_time: body.visit_time,
    };

    execute(usecase, &ctx)
        .await
        .map(|location| HttpResponse::Created().json(APIResponse::new(location)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CreateLocationUseCase {
    pub name: String,
    pub coordinates: Coordinates,
    pub visit_time: DateTime<Utc>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidCoordinates,
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCoordinates => {
                Self::BadClientData("Invalid coordinates specified for the location".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateLocationUseCase {
    type Response = Location;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateLocation";

    const EXCLUSIVE: bool = true;

    async fn execute(&mut self, ctx: &VisitContext) -> Result<Self::Response, Self::Error> {
        if !self.coordinates.is_valid() {
            return Err(UseCaseError::InvalidCoordinates);
        }

        let location = Location::new(self.name.clone(), self.coordinates, self.visit_time);

        ctx.repos
            .locations
            .insert(&location)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(location)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleReminderOnLocationCreated)]
    }
}
