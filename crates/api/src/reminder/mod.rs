mod session;

use crate::error::ApiError;
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};
use visit_reminder_infra::VisitContext;

/// Upgrades the request to a websocket that receives every reminder
/// fired while the connection is open.
pub async fn reminder_socket_controller(
    http_req: HttpRequest,
    body: web::Payload,
    ctx: web::Data<VisitContext>,
) -> Result<HttpResponse, ApiError> {
    let max_connections = ctx.config.max_reminder_connections;
    let subscription = match ctx.reminder_bus.try_subscribe(max_connections) {
        Ok(subscription) => subscription,
        Err(e) => {
            warn!("Rejecting reminder connection: {}", e);
            return Err(ApiError::ServiceUnavailable(
                "Too many clients are listening for reminders".into(),
            ));
        }
    };

    // Dropping the subscription on a failed handshake detaches it again
    let (response, session, stream) = actix_ws::handle(&http_req, body)
        .map_err(|e| ApiError::BadClientData(format!("Websocket handshake failed: {}", e)))?;

    info!(
        "Reminder client connected as subscriber {}",
        subscription.id()
    );
    actix_web::rt::spawn(session::run(subscription, session, stream));

    Ok(response)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders/ws", web::get().to(reminder_socket_controller));
}
