use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Number of undelivered reminders a single subscriber can have queued
    /// before further reminders to that subscriber are dropped.
    pub reminder_subscriber_buffer: usize,
    /// Maximum number of clients that can be connected to the reminder
    /// websocket at the same time.
    pub max_reminder_connections: usize,
}

impl Config {
    pub fn new() -> Self {
        let port = env_or_default("PORT", 5100);
        let reminder_subscriber_buffer = env_or_default("REMINDER_SUBSCRIBER_BUFFER", 64);
        let max_reminder_connections = env_or_default("MAX_REMINDER_CONNECTIONS", 1000);

        Self {
            port,
            reminder_subscriber_buffer,
            max_reminder_connections,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_or_default<T: FromStr + Display + Copy>(key: &str, default: T) -> T {
    let value = match std::env::var(key) {
        Ok(value) => value,
        Err(_) => {
            info!(
                "Did not find {} environment variable. Using default value: {}",
                key, default
            );
            return default;
        }
    };
    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default value: {}.",
                key, value, default
            );
            default
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn falls_back_on_missing_env_var() {
        assert_eq!(env_or_default("VISIT_REMINDER_TEST_UNSET_VAR", 42usize), 42);
    }

    #[test]
    fn falls_back_on_invalid_env_var() {
        std::env::set_var("VISIT_REMINDER_TEST_INVALID_VAR", "not-a-number");
        assert_eq!(env_or_default("VISIT_REMINDER_TEST_INVALID_VAR", 7usize), 7);
    }

    #[test]
    fn reads_valid_env_var() {
        std::env::set_var("VISIT_REMINDER_TEST_VALID_VAR", "8080");
        assert_eq!(env_or_default("VISIT_REMINDER_TEST_VALID_VAR", 5100usize), 8080);
    }
}
