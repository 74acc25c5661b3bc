use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fdm_core::{Flight, FlightRepository};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::error::Error;
use uuid::Uuid;

pub struct PostgresFlightRepository {
    pool: PgPool,
}

impl PostgresFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    airline: String,
    supplier: String,
    fare: Decimal,
    departure_airport: String,
    destination_airport: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: Some(row.id),
            airline: row.airline,
            supplier: row.supplier,
            fare: row.fare,
            departure_airport: row.departure_airport,
            destination_airport: row.destination_airport,
            // TIMESTAMPTZ keeps the instant, not the caller's offset
            departure_time: row.departure_time.fixed_offset(),
            arrival_time: row.arrival_time.fixed_offset(),
        }
    }
}

const SELECT_FLIGHTS: &str = r#"
    SELECT id, airline, supplier, fare, departure_airport, destination_airport, departure_time, arrival_time
    FROM flights
"#;

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn save(&self, flight: Flight) -> Result<Flight, Box<dyn Error + Send + Sync>> {
        let id = flight.id.unwrap_or_else(Uuid::new_v4);

        let row = sqlx::query_as::<_, FlightRow>(
            r#"
            INSERT INTO flights (id, airline, supplier, fare, departure_airport, destination_airport, departure_time, arrival_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                airline = EXCLUDED.airline,
                supplier = EXCLUDED.supplier,
                fare = EXCLUDED.fare,
                departure_airport = EXCLUDED.departure_airport,
                destination_airport = EXCLUDED.destination_airport,
                departure_time = EXCLUDED.departure_time,
                arrival_time = EXCLUDED.arrival_time,
                updated_at = NOW()
            RETURNING id, airline, supplier, fare, departure_airport, destination_airport, departure_time, arrival_time
            "#,
        )
        .bind(id)
        .bind(&flight.airline)
        .bind(&flight.supplier)
        .bind(flight.fare)
        .bind(&flight.departure_airport)
        .bind(&flight.destination_airport)
        .bind(flight.departure_time)
        .bind(flight.arrival_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Flight>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query_as::<_, FlightRow>(&format!("{} WHERE id = $1", SELECT_FLIGHTS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Flight::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), Box<dyn Error + Send + Sync>> {
        sqlx::query("DELETE FROM flights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, FlightRow>(&format!("{} ORDER BY created_at", SELECT_FLIGHTS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn find_by_origin_and_destination(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, FlightRow>(&format!(
            "{} WHERE departure_airport = $1 AND destination_airport = $2 ORDER BY created_at",
            SELECT_FLIGHTS
        ))
        .bind(origin)
        .bind(destination)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }
}
