use rust_decimal::Decimal;

use crate::{CoreError, CoreResult, Flight};

/// Fares are stored as `NUMERIC(12, 2)`.
pub const FARE_SCALE: u32 = 2;
const FARE_INTEGER_DIGITS: u32 = 10;

pub fn validate_airport_code(code: &str, field: &str) -> CoreResult<()> {
    if code.trim().is_empty() {
        return Err(CoreError::Validation(format!("{} cannot be blank", field)));
    }
    if code.chars().count() != 3 {
        return Err(CoreError::Validation(format!("{} must be 3 characters long", field)));
    }
    Ok(())
}

/// Checks a flight before it is written to the store.
pub fn validate_flight(flight: &Flight) -> CoreResult<()> {
    if flight.airline.trim().is_empty() {
        return Err(CoreError::Validation("airline cannot be blank".to_string()));
    }
    if flight.supplier.trim().is_empty() {
        return Err(CoreError::Validation("supplier cannot be blank".to_string()));
    }
    if flight.fare < Decimal::ZERO {
        return Err(CoreError::Validation("fare cannot be negative".to_string()));
    }
    if flight.fare.normalize().scale() > FARE_SCALE {
        return Err(CoreError::Validation(format!(
            "fare must have at most {} decimal places",
            FARE_SCALE
        )));
    }
    if flight.fare >= Decimal::from(10_i64.pow(FARE_INTEGER_DIGITS)) {
        return Err(CoreError::Validation(format!(
            "fare must have at most {} integer digits",
            FARE_INTEGER_DIGITS
        )));
    }
    validate_airport_code(&flight.departure_airport, "departureAirport")?;
    validate_airport_code(&flight.destination_airport, "destinationAirport")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    fn sample_flight() -> Flight {
        Flight {
            id: None,
            airline: "Test Airline".to_string(),
            supplier: "Test Supplier".to_string(),
            fare: dec!(199.99),
            departure_airport: "JFK".to_string(),
            destination_airport: "LAX".to_string(),
            departure_time: DateTime::parse_from_rfc3339("2025-06-22T10:00:00Z").unwrap(),
            arrival_time: DateTime::parse_from_rfc3339("2025-06-22T15:00:00Z").unwrap(),
        }
    }

    #[test]
    fn test_valid_flight_passes() {
        assert!(validate_flight(&sample_flight()).is_ok());
    }

    #[test]
    fn test_zero_fare_is_allowed() {
        let flight = Flight { fare: Decimal::ZERO, ..sample_flight() };
        assert!(validate_flight(&flight).is_ok());
    }

    #[test]
    fn test_negative_fare_is_rejected() {
        let flight = Flight { fare: dec!(-0.01), ..sample_flight() };
        let err = validate_flight(&flight).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("fare")));
    }

    #[test]
    fn test_fare_finer_than_cents_is_rejected() {
        let flight = Flight { fare: dec!(199.999), ..sample_flight() };
        let err = validate_flight(&flight).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("decimal places")));

        // Trailing zeros are not extra precision.
        let padded = Flight { fare: dec!(199.9900), ..sample_flight() };
        assert!(validate_flight(&padded).is_ok());
    }

    #[test]
    fn test_fare_beyond_column_range_is_rejected() {
        let largest = Flight { fare: dec!(9999999999.99), ..sample_flight() };
        assert!(validate_flight(&largest).is_ok());

        let too_large = Flight { fare: dec!(10000000000), ..sample_flight() };
        let err = validate_flight(&too_large).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("integer digits")));
    }

    #[test]
    fn test_blank_airline_and_supplier_are_rejected() {
        let no_airline = Flight { airline: "  ".to_string(), ..sample_flight() };
        assert!(validate_flight(&no_airline).is_err());

        let no_supplier = Flight { supplier: String::new(), ..sample_flight() };
        assert!(validate_flight(&no_supplier).is_err());
    }

    #[test]
    fn test_airport_code_length_must_be_three() {
        for code in ["", "   ", "JF", "JFKX", "A"] {
            assert!(validate_airport_code(code, "from").is_err(), "accepted {:?}", code);
        }
        assert!(validate_airport_code("JFK", "from").is_ok());
    }

    #[test]
    fn test_bad_destination_names_field() {
        let flight = Flight { destination_airport: "LAXX".to_string(), ..sample_flight() };
        match validate_flight(&flight) {
            Err(CoreError::Validation(msg)) => assert!(msg.starts_with("destinationAirport")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
