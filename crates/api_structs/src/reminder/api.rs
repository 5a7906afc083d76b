pub mod reminder_socket {
    /// Pushed as a JSON text frame for every fired reminder
    pub type ReminderMessage = crate::dtos::ReminderMessageDTO;
}
