use async_trait::async_trait;
use std::error::Error;
use uuid::Uuid;

use crate::Flight;

/// Persistence port for locally owned flight records.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Inserts the flight when it has no id, otherwise replaces the stored
    /// record with the same id. Returns the persisted flight.
    async fn save(&self, flight: Flight) -> Result<Flight, Box<dyn Error + Send + Sync>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Flight>, Box<dyn Error + Send + Sync>>;

    /// Removing an unknown id is not an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), Box<dyn Error + Send + Sync>>;

    async fn find_all(&self) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>>;

    /// Exact, case-sensitive match on both airport codes.
    async fn find_by_origin_and_destination(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>>;
}

mod in_memory;

pub use in_memory::InMemoryFlightRepository;
