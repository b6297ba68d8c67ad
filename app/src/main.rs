//! Eventboard demo binary.
//!
//! A scripted rendition of the original page's interaction sequence: the
//! admin opens the management panel at startup, the catalog is loaded through
//! the mock gateway, then one invalid and one valid reservation are
//! submitted.

use eventboard::catalog::{CatalogAction, CatalogEnvironment, CatalogReducer, CatalogState};
use eventboard::config::Config;
use eventboard::gateway::MockEventsGateway;
use eventboard::render::detail_notice;
use eventboard::reservation::{
    ReservationAction, ReservationEnvironment, ReservationReducer, ReservationState,
};
use eventboard::surface::{ConsoleSurface, UiSurface};
use eventboard::types::{EventId, UserRecord};
use eventboard_core::environment::SystemClock;
use eventboard_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventboard=info,eventboard_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        fetch_latency_ms = config.catalog.fetch_latency_ms,
        processing_delay_ms = config.reservation.processing_delay_ms,
        "Configuration loaded"
    );

    // One admin instance at startup, role-guarded panel access
    let admin = UserRecord::admin("Carlos CTO", "carlos@webinnovate.com");
    admin.open_admin_panel()?;

    // Shared collaborators
    let clock = Arc::new(SystemClock);
    let surface = ConsoleSurface::shared();
    let gateway = MockEventsGateway::new(config.catalog.fetch_latency()).shared();

    // One store per feature
    let catalog_store = Store::new(
        CatalogState::new(),
        CatalogReducer::new(),
        CatalogEnvironment::new(gateway, Arc::clone(&surface), clock.clone()),
    );
    let reservation_store = Store::new(
        ReservationState::new(),
        ReservationReducer::new(),
        ReservationEnvironment::new(
            Arc::clone(&surface),
            clock,
            config.reservation.processing_delay(),
        ),
    );

    // Load the catalog (the "cargar eventos" trigger)
    println!(">>> Cargando eventos...");
    let mut handle = catalog_store.send(CatalogAction::LoadEvents).await?;
    handle.wait().await;
    // The render effect runs off the feedback action; give it a beat
    tokio::time::sleep(Duration::from_millis(100)).await;

    let loaded = catalog_store.state(CatalogState::event_count).await;
    println!(">>> Eventos cargados: {loaded}\n");

    // A detail selection on one of the rendered items, correlated by id
    let detail = catalog_store
        .state(|s| {
            s.events
                .iter()
                .find(|e| e.id == EventId::new(3))
                .map(detail_notice)
        })
        .await;
    if let Some(notice) = detail {
        surface.notify(&notice);
    }

    // A submission without a selected event is rejected
    println!(">>> Enviando reserva sin evento seleccionado...");
    let mut handle = reservation_store
        .send(ReservationAction::SubmitReservation {
            name: "Ana Pérez".to_string(),
            email: "ana@example.com".to_string(),
            selected_event: String::new(),
        })
        .await?;
    handle.wait().await;

    // A valid submission confirms after the processing delay
    println!("\n>>> Enviando reserva para el evento 2...");
    let mut handle = reservation_store
        .send(ReservationAction::SubmitReservation {
            name: "Ana Pérez".to_string(),
            email: "ana@example.com".to_string(),
            selected_event: "2".to_string(),
        })
        .await?;
    handle.wait().await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let confirmed = reservation_store
        .state(ReservationState::is_confirmed)
        .await;
    println!("\n>>> Reserva confirmada: {confirmed}");

    // Drain both stores before exiting
    catalog_store.shutdown(Duration::from_secs(5)).await?;
    reservation_store.shutdown(Duration::from_secs(5)).await?;

    Ok(())
}
