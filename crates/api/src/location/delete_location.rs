use super::subscribers::CancelReminderOnLocationDeleted;
use crate::error::ApiError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use visit_reminder_api_structs::delete_location::*;
use visit_reminder_domain::{Location, ID};
use visit_reminder_infra::VisitContext;

pub async fn delete_location_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VisitContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = DeleteLocationUseCase {
        location_id: path_params.location_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|location| HttpResponse::Ok().json(APIResponse::new(location)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct DeleteLocationUseCase {
    pub location_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(location_id) => Self::NotFound(format!(
                "The location with id: {}, was not found.",
                location_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteLocationUseCase {
    type Response = Location;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteLocation";

    const EXCLUSIVE: bool = true;

    async fn execute(&mut self, ctx: &VisitContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .locations
            .delete(&self.location_id)
            .await
            .ok_or(UseCaseError::NotFound(self.location_id))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(CancelReminderOnLocationDeleted)]
    }
}
