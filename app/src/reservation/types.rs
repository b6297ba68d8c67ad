//! State, actions, and errors of the reservation feature.

use crate::types::{AttemptId, EventId, UserRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status-region message shown while a reservation is being processed
pub const PROCESSING_MESSAGE: &str = "Procesando reserva...";

/// Builds the status-region confirmation message for a completed reservation
#[must_use]
pub fn confirmation_message(user: &UserRecord) -> String {
    format!(
        "¡Reserva Exitosa! Gracias {}. Te hemos enviado la confirmación a tu correo.",
        user.display_info()
    )
}

/// Why a reservation submission was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ReservationError {
    /// The selection control was still on the placeholder sentinel
    #[error("Por favor selecciona un evento válido.")]
    NoEventSelected,

    /// The submitted selection value was not a valid event id
    #[error("Identificador de evento no válido: {value}")]
    InvalidEventId {
        /// The raw submitted value
        value: String,
    },
}

/// Phase of the current reservation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AttemptPhase {
    /// No attempt has been made yet
    #[default]
    Idle,
    /// The attempt is waiting out the simulated processing delay
    Processing,
    /// The attempt completed; terminal per attempt
    Confirmed,
    /// The attempt failed validation; terminal per attempt
    Rejected,
}

/// One reservation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationAttempt {
    /// Correlation id of this attempt
    pub id: AttemptId,
    /// The customer record built from the submitted form fields
    pub user: UserRecord,
    /// The selected event
    pub event: EventId,
    /// When the form was submitted
    pub submitted_at: DateTime<Utc>,
    /// When the confirmation was shown, once confirmed
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl ReservationAttempt {
    /// Opens a new attempt
    #[must_use]
    pub const fn new(
        id: AttemptId,
        user: UserRecord,
        event: EventId,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            event,
            submitted_at,
            confirmed_at: None,
        }
    }
}

/// State of the reservation feature
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationState {
    /// Phase of the current attempt
    pub phase: AttemptPhase,
    /// The current attempt, if one was opened
    pub attempt: Option<ReservationAttempt>,
    /// Validation error of the most recent rejected submission
    pub last_error: Option<ReservationError>,
}

impl ReservationState {
    /// Creates an idle reservation state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an attempt is currently processing
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.phase == AttemptPhase::Processing
    }

    /// Whether the current attempt has been confirmed
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.phase == AttemptPhase::Confirmed
    }
}

/// Actions of the reservation feature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReservationAction {
    /// The reservation form was submitted with these field values
    SubmitReservation {
        /// Name field
        name: String,
        /// Email field
        email: String,
        /// Value of the selection control; empty is the "no selection"
        /// sentinel
        selected_event: String,
    },

    /// The simulated processing delay of an attempt elapsed
    ConfirmReservation {
        /// The attempt that scheduled this confirmation
        attempt_id: AttemptId,
    },
}
