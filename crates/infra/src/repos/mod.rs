mod location;
mod shared;

pub use location::ILocationRepo;
use location::InMemoryLocationRepo;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub locations: Arc<dyn ILocationRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            locations: Arc::new(InMemoryLocationRepo::new()),
        }
    }
}
