use actix_web::{web, HttpResponse};
use visit_reminder_api_structs::get_service_health::*;
use visit_reminder_infra::VisitContext;

async fn status(ctx: web::Data<VisitContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        pending_reminders: ctx.reminders.pending_count(),
        subscribers: ctx.reminder_bus.subscriber_count(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn reports_reminder_activity() {
        let ctx = VisitContext::create_inmemory();
        let _subscription = ctx.reminder_bus.subscribe();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let res: APIResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(res.message, "Yo! We are up!\r\n");
        assert_eq!(res.pending_reminders, 0);
        assert_eq!(res.subscribers, 1);
    }
}
