//! Wire shapes of the supplier's `POST /flights` endpoint.

use chrono::NaiveDate;
use fdm_core::FlightSearchResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time::{cet_local_to_utc, TimeMappingError};
use crate::SUPPLIER_NAME;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSearchRequest {
    pub from: Option<String>,
    pub to: Option<String>,
    /// CET calendar date.
    pub outbound_date: NaiveDate,
    /// CET calendar date.
    pub inbound_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierFlight {
    pub carrier: String,
    pub base_price: Decimal,
    pub tax: Decimal,
    pub departure_airport_name: String,
    pub arrival_airport_name: String,
    /// Local CET wall-clock time, no offset.
    pub outbound_date_time: String,
    /// Local CET wall-clock time, no offset.
    pub inbound_date_time: String,
}

impl SupplierFlight {
    pub fn into_search_result(self) -> Result<FlightSearchResult, TimeMappingError> {
        let departure_time = cet_local_to_utc(&self.outbound_date_time)?;
        let arrival_time = cet_local_to_utc(&self.inbound_date_time)?;

        let mut fare = self.base_price + self.tax;
        fare.rescale(2);

        Ok(FlightSearchResult {
            airline: self.carrier,
            supplier: SUPPLIER_NAME.to_string(),
            fare,
            departure_airport: self.departure_airport_name,
            destination_airport: self.arrival_airport_name,
            departure_time,
            arrival_time,
        })
    }
}
