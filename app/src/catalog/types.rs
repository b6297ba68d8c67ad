//! State, actions, and errors of the catalog load cycle.

use crate::types::EventRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blocking notification shown to the user when a load cycle fails
pub const LOAD_FAILURE_NOTICE: &str =
    "Hubo un problema cargando los eventos. Por favor intenta de nuevo.";

/// Why a load cycle failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum LoadError {
    /// The gateway resolved but reported a failure status (`ok = false`)
    #[error("Error en la respuesta de la API")]
    RemoteStatus,

    /// The simulated transport itself failed (rejected promise)
    #[error("{message}")]
    Transport {
        /// Transport failure description
        message: String,
    },
}

/// State of the catalog feature
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogState {
    /// Load-cycle generation token; only completions stamped with the
    /// current generation are applied
    pub generation: u64,
    /// Whether a load cycle is in flight
    pub loading: bool,
    /// Events from the most recent completed cycle, in catalog order
    pub events: Vec<EventRecord>,
    /// Error of the most recent failed cycle, cleared on the next request
    pub last_error: Option<LoadError>,
    /// When the events were last loaded
    pub last_loaded_at: Option<DateTime<Utc>>,
}

impl CatalogState {
    /// Creates an empty catalog state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of loaded events
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Whether a load cycle is currently in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Actions of the catalog feature
///
/// `LoadEvents` is the user-facing command; the other two are fed back by the
/// fetch effect, stamped with the generation of the cycle that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CatalogAction {
    /// Start a load cycle
    LoadEvents,

    /// A cycle fetched and decoded the catalog
    EventsLoaded {
        /// Generation of the cycle that produced this result
        generation: u64,
        /// Decoded events
        events: Vec<EventRecord>,
        /// When the decode completed
        loaded_at: DateTime<Utc>,
    },

    /// A cycle failed
    LoadFailed {
        /// Generation of the cycle that produced this result
        generation: u64,
        /// What went wrong
        error: LoadError,
    },
}
