pub mod flight;
pub mod repository;
pub mod search;
pub mod service;
pub mod timestamp;
pub mod validation;

pub use flight::Flight;
pub use repository::FlightRepository;
pub use search::{
    FlightSearchAggregator, FlightSearchRequest, FlightSearchResponse, FlightSearchResult,
    FlightSearchSource, LocalFlightSearchSource, SearchSourceError,
};
pub use service::FlightService;
pub use timestamp::parse_offset_date_time;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal service error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
