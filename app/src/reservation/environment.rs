//! Environment dependencies for the reservation reducer.

use crate::surface::UiSurface;
use eventboard_core::environment::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Environment dependencies for the reservation reducer
#[derive(Clone)]
pub struct ReservationEnvironment {
    /// Outbound rendering handle
    pub surface: Arc<dyn UiSurface>,
    /// Clock for stamping attempts
    pub clock: Arc<dyn Clock>,
    /// Simulated processing delay before a confirmation is shown
    pub processing_delay: Duration,
}

impl ReservationEnvironment {
    /// Creates a new reservation environment
    #[must_use]
    pub fn new(
        surface: Arc<dyn UiSurface>,
        clock: Arc<dyn Clock>,
        processing_delay: Duration,
    ) -> Self {
        Self {
            surface,
            clock,
            processing_delay,
        }
    }
}
