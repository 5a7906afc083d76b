mod location;
mod reminder;
mod shared;

pub use location::{Coordinates, Location};
pub use reminder::{ReminderEntry, ReminderEvent, ReminderStatus};
pub use shared::entity::{Entity, InvalidIDError, ID};
