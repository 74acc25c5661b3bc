use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{CoreError, CoreResult, Flight, FlightRepository};

/// CRUD operations over the flight store. Validation happens before this layer.
#[derive(Clone)]
pub struct FlightService {
    repo: Arc<dyn FlightRepository>,
}

impl FlightService {
    pub fn new(repo: Arc<dyn FlightRepository>) -> Self {
        Self { repo }
    }

    /// Persists a new flight. Any id on the input is discarded.
    pub async fn create(&self, flight: Flight) -> CoreResult<Flight> {
        let saved = self
            .repo
            .save(flight.without_id())
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        info!("Flight created: {:?}", saved.id);
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> CoreResult<Option<Flight>> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))
    }

    pub async fn list(&self) -> CoreResult<Vec<Flight>> {
        self.repo
            .find_all()
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))
    }

    /// Full replacement of the flight stored under `id`.
    pub async fn update(&self, id: Uuid, flight: Flight) -> CoreResult<Flight> {
        let existing = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?;

        if existing.is_none() {
            return Err(CoreError::NotFound(format!("flight {}", id)));
        }

        let saved = self
            .repo
            .save(flight.with_id(id))
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        info!("Flight updated: {}", id);
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> CoreResult<()> {
        self.repo
            .delete_by_id(id)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        debug!("Flight delete requested: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryFlightRepository;
    use async_trait::async_trait;
    use chrono::DateTime;
    use rust_decimal_macros::dec;
    use std::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts `save` calls on top of the in-memory store.
    #[derive(Default)]
    struct RecordingRepository {
        inner: InMemoryFlightRepository,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl FlightRepository for RecordingRepository {
        async fn save(&self, flight: Flight) -> Result<Flight, Box<dyn Error + Send + Sync>> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(flight).await
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Flight>, Box<dyn Error + Send + Sync>> {
            self.inner.find_by_id(id).await
        }

        async fn delete_by_id(&self, id: Uuid) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.inner.delete_by_id(id).await
        }

        async fn find_all(&self) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
            self.inner.find_all().await
        }

        async fn find_by_origin_and_destination(
            &self,
            origin: &str,
            destination: &str,
        ) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
            self.inner.find_by_origin_and_destination(origin, destination).await
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl FlightRepository for FailingRepository {
        async fn save(&self, _flight: Flight) -> Result<Flight, Box<dyn Error + Send + Sync>> {
            Err("connection refused".into())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Flight>, Box<dyn Error + Send + Sync>> {
            Err("connection refused".into())
        }

        async fn delete_by_id(&self, _id: Uuid) -> Result<(), Box<dyn Error + Send + Sync>> {
            Err("connection refused".into())
        }

        async fn find_all(&self) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
            Err("connection refused".into())
        }

        async fn find_by_origin_and_destination(
            &self,
            _origin: &str,
            _destination: &str,
        ) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
            Err("connection refused".into())
        }
    }

    fn sample_flight() -> Flight {
        Flight {
            id: None,
            airline: "Test Airline".to_string(),
            supplier: "Test Supplier".to_string(),
            fare: dec!(199.99),
            departure_airport: "JFK".to_string(),
            destination_airport: "LAX".to_string(),
            departure_time: DateTime::parse_from_rfc3339("2025-06-22T10:00:00-04:00").unwrap(),
            arrival_time: DateTime::parse_from_rfc3339("2025-06-22T13:00:00-07:00").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_fields() {
        let service = FlightService::new(Arc::new(InMemoryFlightRepository::new()));
        let input = sample_flight();

        let created = service.create(input.clone()).await.unwrap();
        let id = created.id.expect("store assigns id");

        let fetched = service.get(id).await.unwrap().expect("flight exists");
        assert_eq!(fetched.without_id(), input);
    }

    #[tokio::test]
    async fn test_create_ignores_client_supplied_id() {
        let service = FlightService::new(Arc::new(InMemoryFlightRepository::new()));
        let client_id = Uuid::new_v4();

        let created = service.create(sample_flight().with_id(client_id)).await.unwrap();
        assert_ne!(created.id, Some(client_id));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let service = FlightService::new(Arc::new(InMemoryFlightRepository::new()));
        assert!(service.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields_and_keeps_id() {
        let service = FlightService::new(Arc::new(InMemoryFlightRepository::new()));
        let created = service.create(sample_flight()).await.unwrap();
        let id = created.id.unwrap();

        let replacement = Flight {
            airline: "Other Airline".to_string(),
            fare: dec!(89.00),
            destination_airport: "SFO".to_string(),
            ..sample_flight()
        };
        let updated = service.update(id, replacement.clone()).await.unwrap();
        assert_eq!(updated.id, Some(id));

        let fetched = service.get(id).await.unwrap().unwrap();
        assert_eq!(fetched, replacement.with_id(id));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_never_saves() {
        let repo = Arc::new(RecordingRepository::default());
        let service = FlightService::new(repo.clone());

        let err = service.update(Uuid::new_v4(), sample_flight()).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = Arc::new(InMemoryFlightRepository::new());
        let service = FlightService::new(repo.clone());
        let created = service.create(sample_flight()).await.unwrap();
        let id = created.id.unwrap();

        service.delete(id).await.unwrap();
        service.delete(id).await.unwrap();
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_internal_error() {
        let service = FlightService::new(Arc::new(FailingRepository));
        let err = service.create(sample_flight()).await.unwrap_err();
        assert!(matches!(err, CoreError::Internal(msg) if msg.contains("connection refused")));
    }
}
