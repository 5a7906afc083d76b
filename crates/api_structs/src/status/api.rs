use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        /// Reminders that are scheduled but have not fired yet
        pub pending_reminders: usize,
        /// Clients currently listening for reminders
        pub subscribers: usize,
    }
}
