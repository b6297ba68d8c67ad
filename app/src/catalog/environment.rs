//! Environment dependencies for the catalog reducer.

use crate::gateway::EventsGateway;
use crate::surface::UiSurface;
use eventboard_core::environment::Clock;
use std::sync::Arc;

/// Environment dependencies for the catalog reducer
///
/// The gateway is the single point where a real network integration would be
/// substituted; the surface is the explicit handle replacing ambient UI
/// state.
#[derive(Clone)]
pub struct CatalogEnvironment {
    /// Remote catalog source
    pub gateway: Arc<dyn EventsGateway>,
    /// Outbound rendering handle
    pub surface: Arc<dyn UiSurface>,
    /// Clock for stamping load completions
    pub clock: Arc<dyn Clock>,
}

impl CatalogEnvironment {
    /// Creates a new catalog environment
    #[must_use]
    pub fn new(
        gateway: Arc<dyn EventsGateway>,
        surface: Arc<dyn UiSurface>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway,
            surface,
            clock,
        }
    }
}
