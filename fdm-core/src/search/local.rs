use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::{FlightSearchRequest, FlightSearchResult, FlightSearchSource, SearchSourceError};
use crate::{Flight, FlightRepository};

/// Answers searches from the local flight store.
pub struct LocalFlightSearchSource {
    repo: Arc<dyn FlightRepository>,
}

impl LocalFlightSearchSource {
    pub fn new(repo: Arc<dyn FlightRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl FlightSearchSource for LocalFlightSearchSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn find_flights(
        &self,
        request: &FlightSearchRequest,
    ) -> Result<Vec<FlightSearchResult>, SearchSourceError> {
        // The store only matches concrete routes; anything less falls back to a full scan.
        let candidates = match (request.from.as_deref(), request.to.as_deref()) {
            (Some(from), Some(to)) => self.repo.find_by_origin_and_destination(from, to).await,
            _ => self.repo.find_all().await,
        }
        .map_err(|e| SearchSourceError::Store(e.to_string()))?;

        let total = candidates.len();
        let results: Vec<FlightSearchResult> = candidates
            .into_iter()
            .filter(|f| filter_match(f, request))
            .map(FlightSearchResult::from)
            .collect();

        debug!("Local search matched {} of {} candidates", results.len(), total);
        Ok(results)
    }
}

/// True when every filter present on `request` accepts `flight`.
///
/// Strings compare case-insensitively; time bounds are inclusive.
pub fn filter_match(flight: &Flight, request: &FlightSearchRequest) -> bool {
    let text_matches = |value: &str, wanted: &Option<String>| {
        wanted.as_deref().map_or(true, |w| value.to_lowercase() == w.to_lowercase())
    };

    text_matches(&flight.airline, &request.airline)
        && text_matches(&flight.departure_airport, &request.from)
        && text_matches(&flight.destination_airport, &request.to)
        && request.departure_time.map_or(true, |t| flight.departure_time >= t)
        && request.arrival_time.map_or(true, |t| flight.arrival_time <= t)
}
