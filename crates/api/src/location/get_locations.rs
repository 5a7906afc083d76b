use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use visit_reminder_api_structs::get_locations::*;
use visit_reminder_domain::Location;
use visit_reminder_infra::VisitContext;

pub async fn get_locations_controller(
    ctx: web::Data<VisitContext>,
) -> Result<HttpResponse, ApiError> {
    execute(GetLocationsUseCase, &ctx)
        .await
        .map(|locations| HttpResponse::Ok().json(APIResponse::new(locations)))
        .map_err(|_| ApiError::InternalError)
}

#[derive(Debug)]
pub struct GetLocationsUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for GetLocationsUseCase {
    type Response = Vec<Location>;

    type Error = ();

    const NAME: &'static str = "GetLocations";

    async fn execute(&mut self, ctx: &VisitContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.locations.find_all().await)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::Utc;
    use visit_reminder_domain::Coordinates;

    #[actix_web::test]
    async fn lists_stored_locations() {
        let ctx = VisitContext::create_inmemory();
        assert!(execute(GetLocationsUseCase, &ctx).await.unwrap().is_empty());

        let location = Location::new(
            "Ponte dos Ingleses".into(),
            Coordinates {
                lat: -3.7196,
                lng: -38.5159,
            },
            Utc::now(),
        );
        ctx.repos.locations.insert(&location).await.unwrap();

        let res = execute(GetLocationsUseCase, &ctx).await.unwrap();
        assert_eq!(res, vec![location]);
    }
}
