use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use visit_reminder_domain::{ReminderEvent, ID};

/// The reminder message pushed to every connected client
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderMessageDTO {
    pub location_id: ID,
    pub message: String,
    pub visit_time: DateTime<Utc>,
}

impl ReminderMessageDTO {
    pub fn new(event: ReminderEvent) -> Self {
        Self {
            message: event.message(),
            location_id: event.location_id,
            visit_time: event.visit_time,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_to_reminder_wire_format() {
        let location_id = ID::new();
        let dto = ReminderMessageDTO::new(ReminderEvent {
            location_id,
            location_name: "Fortaleza".into(),
            visit_time: Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 0).unwrap(),
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "locationId": location_id.to_string(),
                "message": "It's time to visit Fortaleza",
                "visitTime": "2024-05-17T12:30:00Z",
            })
        );
    }
}
