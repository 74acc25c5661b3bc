//! Reqwest-backed search source for the CrazySupplier API.

use async_trait::async_trait;
use fdm_core::{FlightSearchRequest, FlightSearchResult, FlightSearchSource, SearchSourceError};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::dto::{SupplierFlight, SupplierSearchRequest};
use crate::time::as_cet_date;

const BODY_PREVIEW_CHARS: usize = 256;

/// Which request bound feeds the supplier's `inboundDate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundDatePolicy {
    /// Inbound date repeats the outbound date (a same-day round trip).
    #[default]
    SameAsOutbound,
    /// Inbound date comes from the latest-arrival bound, or the outbound
    /// date when no arrival bound is given.
    ArrivalBound,
}

#[derive(Debug, thiserror::Error)]
pub enum SupplierClientError {
    #[error("invalid supplier base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

pub struct CrazySupplierClient {
    client: Client,
    endpoint: Url,
    inbound_policy: InboundDatePolicy,
}

impl CrazySupplierClient {
    /// Builds a client that posts searches to `{base_url}/flights`, giving up
    /// on any call that takes longer than `timeout`.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, SupplierClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: flights_endpoint(base_url)?,
            inbound_policy: InboundDatePolicy::default(),
        })
    }

    pub fn with_inbound_policy(mut self, policy: InboundDatePolicy) -> Self {
        self.inbound_policy = policy;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Translates a search into the supplier's request shape.
    ///
    /// Returns `None` when there is no departure bound to derive dates from.
    pub fn build_request(&self, request: &FlightSearchRequest) -> Option<SupplierSearchRequest> {
        let outbound_date = as_cet_date(request.departure_time.as_ref()?);
        let inbound_date = match self.inbound_policy {
            InboundDatePolicy::SameAsOutbound => outbound_date,
            InboundDatePolicy::ArrivalBound => request
                .arrival_time
                .as_ref()
                .map(as_cet_date)
                .unwrap_or(outbound_date),
        };

        Some(SupplierSearchRequest {
            from: request.from.clone(),
            to: request.to.clone(),
            outbound_date,
            inbound_date,
        })
    }
}

#[async_trait]
impl FlightSearchSource for CrazySupplierClient {
    fn name(&self) -> &str {
        crate::SUPPLIER_NAME
    }

    async fn find_flights(
        &self,
        request: &FlightSearchRequest,
    ) -> Result<Vec<FlightSearchResult>, SearchSourceError> {
        let Some(body) = self.build_request(request) else {
            debug!("No departure bound given, skipping supplier call");
            return Ok(Vec::new());
        };

        debug!("Querying supplier at {} with {:?}", self.endpoint, body);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, &bytes));
        }

        let results = parse_flights(&bytes)?;
        info!("Supplier returned {} flights", results.len());
        Ok(results)
    }
}

fn flights_endpoint(mut base_url: Url) -> Result<Url, url::ParseError> {
    // Without a trailing slash `join` would replace the last path segment.
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    base_url.join("flights")
}

fn parse_flights(body: &[u8]) -> Result<Vec<FlightSearchResult>, SearchSourceError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let decoded: Option<Vec<SupplierFlight>> = serde_json::from_slice(body)
        .map_err(|e| SearchSourceError::Decode(format!("invalid supplier payload: {}", e)))?;

    decoded
        .unwrap_or_default()
        .into_iter()
        .map(|flight| {
            flight
                .into_search_result()
                .map_err(|e| SearchSourceError::Decode(e.to_string()))
        })
        .collect()
}

fn map_transport_error(error: reqwest::Error) -> SearchSourceError {
    if error.is_timeout() {
        SearchSourceError::Timeout(error.to_string())
    } else {
        SearchSourceError::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SearchSourceError {
    let preview: String = String::from_utf8_lossy(body)
        .trim()
        .chars()
        .take(BODY_PREVIEW_CHARS)
        .collect();

    if preview.is_empty() {
        SearchSourceError::Status(format!("status {}", status.as_u16()))
    } else {
        SearchSourceError::Status(format!("status {}: {}", status.as_u16(), preview))
    }
}
