//! Per-connection reminder websocket.
//!
//! Pushes every reminder from the connection's `ReminderSubscription` as a
//! JSON text frame. Pings every 5s and disconnects a client that has been
//! silent for 10s. The subscription is dropped, and thereby unsubscribed,
//! when the session ends.

use actix_web::rt::time::interval;
use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use visit_reminder_api_structs::dtos::ReminderMessageDTO;
use visit_reminder_domain::ReminderEvent;
use visit_reminder_infra::ReminderSubscription;

#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Debug)]
enum SessionEnd {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    Network(Closed),
    Unsubscribed,
}

#[derive(Debug, PartialEq)]
enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

pub(super) async fn run(
    mut subscription: ReminderSubscription,
    mut session: Session,
    mut stream: MessageStream,
) {
    let mut last_heartbeat = Instant::now();
    let mut heartbeat = interval(HEARTBEAT_INTERVAL);

    let end = loop {
        let result = tokio::select! {
            _ = heartbeat.tick() => handle_heartbeat_tick(&mut session, &last_heartbeat).await,
            message = stream.recv() => {
                handle_stream_message(&mut session, &mut last_heartbeat, message).await
            }
            reminder = subscription.recv() => match reminder {
                Some(event) => send_reminder(&mut session, event).await,
                None => Err(SessionEnd::Unsubscribed),
            },
        };

        if let Err(end) = result {
            break end;
        }
    };

    log_session_end(&subscription, &end);
    if let CloseAction::Close(reason) = close_action_for(end) {
        if let Err(e) = session.close(reason).await {
            debug!("Failed to close reminder websocket: {}", e);
        }
    }
}

async fn handle_heartbeat_tick(
    session: &mut Session,
    last_heartbeat: &Instant,
) -> Result<(), SessionEnd> {
    if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
        return Err(SessionEnd::HeartbeatTimeout);
    }

    session.ping(b"").await.map_err(SessionEnd::Network)
}

async fn handle_stream_message(
    session: &mut Session,
    last_heartbeat: &mut Instant,
    message: Option<Result<Message, ProtocolError>>,
) -> Result<(), SessionEnd> {
    let message = match message {
        Some(Ok(message)) => message,
        Some(Err(e)) => return Err(SessionEnd::Protocol(e)),
        None => return Err(SessionEnd::StreamClosed),
    };

    *last_heartbeat = Instant::now();
    match message {
        Message::Ping(payload) => session.pong(&payload).await.map_err(SessionEnd::Network),
        Message::Close(reason) => Err(SessionEnd::ClientClosed(reason)),
        // Clients have nothing to say on this socket apart from staying alive
        Message::Text(_)
        | Message::Binary(_)
        | Message::Pong(_)
        | Message::Continuation(_)
        | Message::Nop => Ok(()),
    }
}

async fn send_reminder(session: &mut Session, event: ReminderEvent) -> Result<(), SessionEnd> {
    let location_id = event.location_id;
    match serde_json::to_string(&ReminderMessageDTO::new(event)) {
        Ok(body) => session.text(body).await.map_err(SessionEnd::Network),
        Err(e) => {
            warn!(
                "Unable to serialize reminder for location: {}. Err: {:?}",
                location_id, e
            );
            Ok(())
        }
    }
}

fn log_session_end(subscription: &ReminderSubscription, end: &SessionEnd) {
    match end {
        SessionEnd::HeartbeatTimeout => warn!(
            "Reminder client {} timed out; closing connection",
            subscription.id()
        ),
        SessionEnd::Protocol(e) => warn!(
            "Reminder client {} protocol error: {}",
            subscription.id(),
            e
        ),
        SessionEnd::Network(e) => warn!(
            "Reminder client {} send failed: {}; closing connection",
            subscription.id(),
            e
        ),
        SessionEnd::ClientClosed(_) | SessionEnd::StreamClosed | SessionEnd::Unsubscribed => {
            info!("Reminder client {} disconnected", subscription.id())
        }
    }
}

fn close_action_for(end: SessionEnd) -> CloseAction {
    match end {
        SessionEnd::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Normal,
            description: Some("heartbeat timeout".to_owned()),
        })),
        SessionEnd::Protocol(_) => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Protocol,
            description: Some("protocol error".to_owned()),
        })),
        SessionEnd::Unsubscribed => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Away,
            description: Some("reminders closed".to_owned()),
        })),
        SessionEnd::ClientClosed(reason) => CloseAction::Close(reason),
        SessionEnd::StreamClosed | SessionEnd::Network(_) => CloseAction::None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{rt::time::timeout, web, App, HttpServer};
    use awc::ws::Frame;
    use futures::StreamExt;
    use visit_reminder_infra::VisitContext;

    async fn start_server(ctx: VisitContext) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(ctx.clone()))
                .configure(super::super::configure_routes)
        })
        .listen(listener)
        .expect("bind test server")
        .disable_signals()
        .workers(1)
        .run();
        actix_web::rt::spawn(server);

        format!("http://{}/reminders/ws", addr)
    }

    #[actix_web::test]
    async fn closes_silent_client_and_unsubscribes() {
        let ctx = VisitContext::create_inmemory();
        let url = start_server(ctx.clone()).await;

        let (_resp, mut socket) = awc::Client::default()
            .ws(url)
            .connect()
            .await
            .expect("websocket connect");
        assert_eq!(ctx.reminder_bus.subscriber_count(), 1);

        let reason = timeout(Duration::from_secs(2), async {
            while let Some(frame) = socket.next().await {
                match frame.expect("frame") {
                    Frame::Ping(_) | Frame::Pong(_) => continue,
                    Frame::Close(reason) => return reason,
                    other => panic!("unexpected frame before close: {:?}", other),
                }
            }
            None
        })
        .await
        .expect("close frame missing within timeout")
        .expect("close frame without reason");
        assert_eq!(reason.code, CloseCode::Normal);
        assert_eq!(reason.description.as_deref(), Some("heartbeat timeout"));

        timeout(Duration::from_secs(1), async {
            while ctx.reminder_bus.subscriber_count() > 0 {
                actix_web::rt::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("subscription still attached after close");
    }

    #[test]
    fn echoes_client_close_reason() {
        let reason = CloseReason {
            code: CloseCode::Normal,
            description: Some("bye".to_owned()),
        };
        assert_eq!(
            close_action_for(SessionEnd::ClientClosed(Some(reason.clone()))),
            CloseAction::Close(Some(reason))
        );
    }

    #[test]
    fn closes_timed_out_client() {
        match close_action_for(SessionEnd::HeartbeatTimeout) {
            CloseAction::Close(Some(reason)) => assert_eq!(reason.code, CloseCode::Normal),
            action => panic!("Unexpected close action: {:?}", action),
        }
    }

    #[test]
    fn does_not_close_dead_connections() {
        assert_eq!(close_action_for(SessionEnd::StreamClosed), CloseAction::None);
    }
}
