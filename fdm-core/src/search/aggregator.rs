use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::{
    FlightSearchRequest, FlightSearchResponse, FlightSearchResult, FlightSearchSource,
    SearchSourceError,
};

/// Fans a search out to every configured source and merges what comes back.
///
/// Sources run concurrently. A source that errors or exceeds `source_timeout`
/// contributes nothing; the rest still answer. Results are concatenated in the
/// order the sources were registered, whatever order they finish in.
#[derive(Clone)]
pub struct FlightSearchAggregator {
    sources: Vec<Arc<dyn FlightSearchSource>>,
    source_timeout: Duration,
}

impl FlightSearchAggregator {
    pub fn new(sources: Vec<Arc<dyn FlightSearchSource>>, source_timeout: Duration) -> Self {
        Self {
            sources,
            source_timeout,
        }
    }

    pub async fn find_flights(&self, request: &FlightSearchRequest) -> FlightSearchResponse {
        let outcomes = join_all(
            self.sources
                .iter()
                .map(|source| self.search_one(source.as_ref(), request)),
        )
        .await;

        let responses = self
            .sources
            .iter()
            .zip(outcomes)
            .filter_map(|(source, outcome)| match outcome {
                Ok(results) => Some(FlightSearchResponse::new(results)),
                Err(e) => {
                    warn!("Search source [{}] failed, ignoring: {}", source.name(), e);
                    None
                }
            });

        let combined = FlightSearchResponse::combine(responses);
        info!("Combined search returned {} results", combined.results.len());
        combined
    }

    async fn search_one(
        &self,
        source: &dyn FlightSearchSource,
        request: &FlightSearchRequest,
    ) -> Result<Vec<FlightSearchResult>, SearchSourceError> {
        match tokio::time::timeout(self.source_timeout, source.find_flights(request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SearchSourceError::Timeout(format!(
                "no answer within {}ms",
                self.source_timeout.as_millis()
            ))),
        }
    }
}
