//! Eventboard - an event catalog and reservation demo.
//!
//! A faithful, testable rendition of a classic interactive flow: a catalog of
//! events is fetched from a timer-delayed mock gateway and rendered, a user
//! picks one event, and a reservation submission is confirmed after a second
//! simulated delay. There is no real network call and no persistence; the
//! point of the example is the shape of the asynchronous pipeline.
//!
//! # Architecture
//!
//! ```text
//!  UiSurface (explicit handle)        EventsGateway (mock remote source)
//!        ▲                                   ▲
//!        │ effects                           │ one Effect::Future per cycle
//!        │                                   │
//! ┌──────┴───────┐   feedback actions ┌──────┴───────┐
//! │ Reservation  │◄──────────────────►│   Catalog    │
//! │   reducer    │    (via Store)     │   reducer    │
//! └──────────────┘                    └──────────────┘
//! ```
//!
//! Each feature is a Reducer over its own state; the Store runtime executes
//! the effects and feeds their resulting actions back. The load cycle and the
//! reservation attempt both carry a token (generation / attempt id) so that a
//! completion belonging to a superseded cycle is discarded instead of racing
//! the current one.
//!
//! # Key behaviors
//!
//! - The loading indicator is shown before the gateway call starts and hidden
//!   exactly once, after the cycle fully resolves, on every exit path.
//! - A failure status, a transport failure, and an invalid submission each
//!   surface as exactly one blocking notification; nothing retries, nothing
//!   is fatal, every failure leaves the UI re-triggerable.
//! - Rendering is pure: markup and selector options are computed from the
//!   record sequence and applied as full replacements.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod gateway;
pub mod render;
pub mod reservation;
pub mod surface;
pub mod types;

pub use catalog::{CatalogAction, CatalogEnvironment, CatalogReducer, CatalogState};
pub use config::Config;
pub use gateway::{EventsGateway, MockEventsGateway, demo_catalog};
pub use render::{SelectorOption, detail_notice, render_event_list, selector_options};
pub use reservation::{
    ReservationAction, ReservationEnvironment, ReservationReducer, ReservationState,
};
pub use surface::{ConsoleSurface, RecordingSurface, UiSurface};
pub use types::{AttemptId, EventId, EventRecord, Role, UserRecord};
