use fdm_core::{FlightSearchAggregator, FlightService};

#[derive(Clone)]
pub struct AppState {
    pub flights: FlightService,
    pub search: FlightSearchAggregator,
}
