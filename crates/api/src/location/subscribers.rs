use super::{
    create_location::CreateLocationUseCase, delete_location::DeleteLocationUseCase,
    update_location::UpdateLocationUseCase,
};
use crate::shared::usecase::Subscriber;
use visit_reminder_domain::Location;
use visit_reminder_infra::VisitContext;

pub struct ScheduleReminderOnLocationCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateLocationUseCase> for ScheduleReminderOnLocationCreated {
    async fn notify(&self, e: &Location, ctx: &VisitContext) {
        // Sideeffect, ignore result
        let _ = ctx.reminders.location_created(e);
    }
}

pub struct RescheduleReminderOnLocationUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateLocationUseCase> for RescheduleReminderOnLocationUpdated {
    async fn notify(&self, e: &Location, ctx: &VisitContext) {
        // Sideeffect, ignore result
        let _ = ctx.reminders.location_updated(e);
    }
}

pub struct CancelReminderOnLocationDeleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteLocationUseCase> for CancelReminderOnLocationDeleted {
    async fn notify(&self, e: &Location, ctx: &VisitContext) {
        // Sideeffect, ignore result
        let _ = ctx.reminders.location_deleted(&e.id);
    }
}
