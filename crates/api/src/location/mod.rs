mod create_location;
mod delete_location;
mod get_locations;
mod subscribers;
mod update_location;

use actix_web::web;
use create_location::create_location_controller;
use delete_location::delete_location_controller;
use get_locations::get_locations_controller;
use update_location::update_location_controller;

pub use create_location::{CreateLocationUseCase, UseCaseError as CreateLocationError};
pub use delete_location::{DeleteLocationUseCase, UseCaseError as DeleteLocationError};
pub use get_locations::GetLocationsUseCase;
pub use update_location::{UpdateLocationUseCase, UseCaseError as UpdateLocationError};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/locations", web::get().to(get_locations_controller));
    cfg.route("/locations", web::post().to(create_location_controller));
    cfg.route(
        "/locations/{location_id}",
        web::put().to(update_location_controller),
    );
    cfg.route(
        "/locations/{location_id}",
        web::delete().to(delete_location_controller),
    );
}
