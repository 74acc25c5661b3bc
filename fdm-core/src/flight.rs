use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A flight record owned by this system.
///
/// `id` stays `None` until the store assigns one on first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub airline: String,
    /// Where the record originated, e.g. "internal".
    pub supplier: String,
    pub fare: Decimal,
    pub departure_airport: String,
    pub destination_airport: String,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub departure_time: DateTime<FixedOffset>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub arrival_time: DateTime<FixedOffset>,
}

impl Flight {
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }
}
