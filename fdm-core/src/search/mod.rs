use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Flight;

mod aggregator;
mod local;

pub use aggregator::FlightSearchAggregator;
pub use local::{filter_match, LocalFlightSearchSource};

/// Optional search filters. `None` means no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightSearchRequest {
    pub airline: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Earliest acceptable departure, inclusive.
    pub departure_time: Option<DateTime<FixedOffset>>,
    /// Latest acceptable arrival, inclusive.
    pub arrival_time: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchResult {
    pub airline: String,
    pub supplier: String,
    pub fare: Decimal,
    pub departure_airport: String,
    pub destination_airport: String,
    pub departure_time: DateTime<FixedOffset>,
    pub arrival_time: DateTime<FixedOffset>,
}

impl From<Flight> for FlightSearchResult {
    fn from(flight: Flight) -> Self {
        Self {
            airline: flight.airline,
            supplier: flight.supplier,
            fare: flight.fare,
            departure_airport: flight.departure_airport,
            destination_airport: flight.destination_airport,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightSearchResponse {
    pub results: Vec<FlightSearchResult>,
}

impl FlightSearchResponse {
    pub fn new(results: Vec<FlightSearchResult>) -> Self {
        Self { results }
    }

    /// Concatenates responses, keeping the order they are given in.
    pub fn combine<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = FlightSearchResponse>,
    {
        let results = responses.into_iter().flat_map(|r| r.results).collect();
        Self { results }
    }
}

/// Why a single source could not contribute to a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchSourceError {
    #[error("transport failed: {0}")]
    Transport(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("unexpected status: {0}")]
    Status(String),
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("store query failed: {0}")]
    Store(String),
}

/// A backend able to answer a flight search.
#[async_trait]
pub trait FlightSearchSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    async fn find_flights(
        &self,
        request: &FlightSearchRequest,
    ) -> Result<Vec<FlightSearchResult>, SearchSourceError>;
}
