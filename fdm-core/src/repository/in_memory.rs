use async_trait::async_trait;
use std::error::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::FlightRepository;
use crate::Flight;

/// Process-local flight store. Keeps insertion order so listings are stable.
#[derive(Debug, Default)]
pub struct InMemoryFlightRepository {
    flights: RwLock<Vec<Flight>>,
}

impl InMemoryFlightRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.flights.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.flights.read().await.is_empty()
    }
}

#[async_trait]
impl FlightRepository for InMemoryFlightRepository {
    async fn save(&self, flight: Flight) -> Result<Flight, Box<dyn Error + Send + Sync>> {
        let mut flights = self.flights.write().await;
        match flight.id {
            Some(id) => {
                if let Some(slot) = flights.iter_mut().find(|f| f.id == Some(id)) {
                    *slot = flight.clone();
                } else {
                    flights.push(flight.clone());
                }
                Ok(flight)
            }
            None => {
                let stored = flight.with_id(Uuid::new_v4());
                flights.push(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Flight>, Box<dyn Error + Send + Sync>> {
        let flights = self.flights.read().await;
        Ok(flights.iter().find(|f| f.id == Some(id)).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.flights.write().await.retain(|f| f.id != Some(id));
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
        Ok(self.flights.read().await.clone())
    }

    async fn find_by_origin_and_destination(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
        let flights = self.flights.read().await;
        Ok(flights
            .iter()
            .filter(|f| f.departure_airport == origin && f.destination_airport == destination)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    fn flight(from: &str, to: &str) -> Flight {
        Flight {
            id: None,
            airline: "KLM".to_string(),
            supplier: "internal".to_string(),
            fare: dec!(120.50),
            departure_airport: from.to_string(),
            destination_airport: to.to_string(),
            departure_time: DateTime::parse_from_rfc3339("2025-06-22T10:00:00+02:00").unwrap(),
            arrival_time: DateTime::parse_from_rfc3339("2025-06-22T12:00:00+02:00").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_round_trips() {
        let repo = InMemoryFlightRepository::new();
        let original = flight("AMS", "LHR");

        let saved = repo.save(original.clone()).await.unwrap();
        let id = saved.id.expect("id assigned");

        let loaded = repo.find_by_id(id).await.unwrap().expect("flight stored");
        assert_eq!(loaded.without_id(), original);
    }

    #[tokio::test]
    async fn test_save_with_id_replaces_existing() {
        let repo = InMemoryFlightRepository::new();
        let saved = repo.save(flight("AMS", "LHR")).await.unwrap();

        let mut replacement = flight("AMS", "CDG");
        replacement.id = saved.id;
        repo.save(replacement).await.unwrap();

        assert_eq!(repo.len().await, 1);
        let loaded = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.destination_airport, "CDG");
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_silent() {
        let repo = InMemoryFlightRepository::new();
        repo.save(flight("AMS", "LHR")).await.unwrap();

        repo.delete_by_id(Uuid::new_v4()).await.unwrap();
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_route_lookup_is_case_sensitive() {
        let repo = InMemoryFlightRepository::new();
        repo.save(flight("AMS", "LHR")).await.unwrap();
        repo.save(flight("AMS", "CDG")).await.unwrap();

        assert_eq!(repo.find_by_origin_and_destination("AMS", "LHR").await.unwrap().len(), 1);
        assert!(repo.find_by_origin_and_destination("ams", "lhr").await.unwrap().is_empty());
    }
}
