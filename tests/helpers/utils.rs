use actix_web::rt::time::timeout;
use awc::ws::Frame;
use futures::{Stream, StreamExt};
use std::time::Duration;
use visit_reminder_api_structs::reminder_socket::ReminderMessage;

/// Waits for the next reminder pushed on the socket, skipping heartbeats.
/// Gives `None` if nothing arrives within `wait`.
pub async fn next_reminder<S, E>(socket: &mut S, wait: Duration) -> Option<ReminderMessage>
where
    S: Stream<Item = Result<Frame, E>> + Unpin,
    E: std::fmt::Debug,
{
    let read = async {
        while let Some(frame) = socket.next().await {
            match frame.expect("ws frame ok") {
                Frame::Text(bytes) => {
                    return Some(serde_json::from_slice(&bytes).expect("reminder json"));
                }
                Frame::Close(_) => return None,
                _ => continue,
            }
        }
        None
    };

    timeout(wait, read).await.ok().flatten()
}
