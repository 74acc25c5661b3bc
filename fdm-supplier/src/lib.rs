//! Remote flight supplier ("CrazySupplier") exposed as a search source.
//!
//! The supplier speaks calendar dates and zone-less local date-times in CET;
//! everything crossing into the core is converted to UTC instants.

pub mod client;
pub mod dto;
pub mod time;

pub use client::{CrazySupplierClient, InboundDatePolicy, SupplierClientError};

/// Supplier tag stamped on every result from this source.
pub const SUPPLIER_NAME: &str = "CrazySupplier";
