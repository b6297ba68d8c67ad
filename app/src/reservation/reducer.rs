//! Reducer for reservation attempts.

use crate::reservation::types::{
    AttemptPhase, PROCESSING_MESSAGE, ReservationAction, ReservationAttempt, ReservationError,
    ReservationState, confirmation_message,
};
use crate::reservation::ReservationEnvironment;
use crate::surface::UiSurface;
use crate::types::{AttemptId, EventId, UserRecord};
use eventboard_core::environment::Clock;
use eventboard_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Reducer driving the reservation attempt state machine
///
/// A submission either rejects immediately (validation) or opens a processing
/// attempt whose confirmation arrives after the configured delay. A new
/// submission supersedes the current attempt; confirmations carry the attempt
/// id of the attempt that scheduled them, so a superseded confirmation is
/// discarded.
#[derive(Debug, Clone, Copy)]
pub struct ReservationReducer;

impl ReservationReducer {
    /// Creates a new reservation reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates the submitted selection value
    fn validate_selection(selected_event: &str) -> Result<EventId, ReservationError> {
        let selected = selected_event.trim();

        if selected.is_empty() {
            return Err(ReservationError::NoEventSelected);
        }

        selected
            .parse()
            .map_err(|_| ReservationError::InvalidEventId {
                value: selected.to_string(),
            })
    }
}

impl Default for ReservationReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for ReservationReducer {
    type State = ReservationState;
    type Action = ReservationAction;
    type Environment = ReservationEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ReservationAction::SubmitReservation {
                name,
                email,
                selected_event,
            } => match Self::validate_selection(&selected_event) {
                Err(error) => {
                    tracing::warn!(%error, "Reservation submission rejected");

                    state.phase = AttemptPhase::Rejected;
                    state.attempt = None;
                    state.last_error = Some(error.clone());

                    // Notification only: no status update, no form mutation,
                    // the user corrects the form and resubmits
                    let surface = Arc::clone(&env.surface);
                    smallvec![Effect::Future(Box::pin(async move {
                        surface.notify(&error.to_string());
                        None
                    }))]
                },
                Ok(event) => {
                    let user = UserRecord::customer(name, email);
                    let attempt =
                        ReservationAttempt::new(AttemptId::new(), user, event, env.clock.now());
                    let attempt_id = attempt.id;

                    tracing::info!(
                        attempt = %attempt_id,
                        event = %event,
                        "Reservation attempt opened"
                    );

                    state.phase = AttemptPhase::Processing;
                    state.attempt = Some(attempt);
                    state.last_error = None;

                    let surface = Arc::clone(&env.surface);
                    smallvec![Effect::chain(vec![
                        Effect::Future(Box::pin(async move {
                            surface.set_status(PROCESSING_MESSAGE);
                            None
                        })),
                        Effect::Delay {
                            duration: env.processing_delay,
                            action: Box::new(ReservationAction::ConfirmReservation {
                                attempt_id,
                            }),
                        },
                    ])]
                },
            },

            ReservationAction::ConfirmReservation { attempt_id } => {
                let Some(attempt) = state.attempt.as_mut() else {
                    tracing::debug!(%attempt_id, "Discarding confirmation without an attempt");
                    return smallvec![Effect::None];
                };

                if attempt.id != attempt_id || state.phase != AttemptPhase::Processing {
                    tracing::debug!(
                        %attempt_id,
                        current = %attempt.id,
                        "Discarding confirmation of a superseded attempt"
                    );
                    return smallvec![Effect::None];
                }

                attempt.confirmed_at = Some(env.clock.now());
                state.phase = AttemptPhase::Confirmed;

                let message = confirmation_message(&attempt.user);
                tracing::info!(attempt = %attempt_id, "Reservation confirmed");

                let surface = Arc::clone(&env.surface);
                smallvec![Effect::Future(Box::pin(async move {
                    surface.set_status(&message);
                    surface.clear_reservation_form();
                    None
                }))]
            },
        }
    }
}
