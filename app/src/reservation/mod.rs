//! Reservation attempt handling.
//!
//! One user-initiated submission of the reservation form, validated then
//! confirmed after a simulated processing delay, or rejected. Each attempt
//! runs the machine `Idle → (Rejected | Processing) → Confirmed`; `Rejected`
//! and `Confirmed` are terminal per attempt, and the next submission opens a
//! fresh attempt.

pub mod environment;
pub mod reducer;
pub mod types;

pub use environment::ReservationEnvironment;
pub use reducer::ReservationReducer;
pub use types::{
    AttemptPhase, PROCESSING_MESSAGE, ReservationAction, ReservationAttempt, ReservationError,
    ReservationState, confirmation_message,
};
