use anyhow::Context;
use fdm_api::{app, AppState};
use fdm_core::repository::InMemoryFlightRepository;
use fdm_core::{
    FlightRepository, FlightSearchAggregator, FlightSearchSource, FlightService,
    LocalFlightSearchSource,
};
use fdm_store::app_config::{Config, StoreBackend};
use fdm_store::{DbClient, PostgresFlightRepository};
use fdm_supplier::CrazySupplierClient;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fdm_api=debug,fdm_core=debug,fdm_supplier=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting flight API on port {}", config.server.port);

    let repo = flight_repository(&config).await?;

    let mut sources: Vec<Arc<dyn FlightSearchSource>> =
        vec![Arc::new(LocalFlightSearchSource::new(repo.clone()))];

    if config.supplier.enabled {
        let base_url = url::Url::parse(&config.supplier.base_url)
            .context("Invalid supplier.base_url")?;
        let policy = config.supplier.inbound_date;
        let supplier = CrazySupplierClient::new(
            base_url,
            Duration::from_millis(config.supplier.timeout_ms),
        )?
        .with_inbound_policy(policy);
        tracing::info!("Supplier search enabled at {} ({:?})", supplier.endpoint(), policy);
        sources.push(Arc::new(supplier));
    }

    let app_state = AppState {
        flights: FlightService::new(repo),
        search: FlightSearchAggregator::new(
            sources,
            Duration::from_millis(config.search.source_timeout_ms),
        ),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn flight_repository(config: &Config) -> anyhow::Result<Arc<dyn FlightRepository>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory flight store; data is lost on restart");
            Ok(Arc::new(InMemoryFlightRepository::new()))
        }
        StoreBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .context("store.backend = postgres requires a [database] section")?;
            let db = DbClient::new(&database.url, database.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await?;
            Ok(Arc::new(PostgresFlightRepository::new(db.pool)))
        }
    }
}
