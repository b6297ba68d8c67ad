//! Mock events gateway for development and testing.
//!
//! This module provides the simulated remote boundary of the system: one
//! operation returning the event catalog after an artificial latency. In
//! production this would be replaced with an actual HTTP integration; the
//! trait is the single substitution point.

use crate::types::{EventId, EventRecord};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Gateway result
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Transport-level gateway error (the simulated "promise rejection")
#[derive(Debug, Clone)]
pub enum GatewayError {
    /// The connection could not be established
    ConnectionFailed {
        /// Failure description
        message: String,
    },
    /// The request timed out
    Timeout,
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed { message } => write!(f, "Connection failed: {message}"),
            Self::Timeout => write!(f, "Gateway timeout"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Boxed future resolving to the decoded event catalog
pub type BodyFuture = Pin<Box<dyn Future<Output = GatewayResult<Vec<EventRecord>>> + Send>>;

/// Response wrapper exposing an `ok` flag and a lazy body decode
///
/// Mirrors the shape of an HTTP response: callers check [`is_ok`] first and
/// only then pay for decoding the body. The body can be consumed exactly once
/// because decoding takes ownership of the response.
///
/// [`is_ok`]: EventsResponse::is_ok
pub struct EventsResponse {
    ok: bool,
    body: Box<dyn FnOnce() -> BodyFuture + Send>,
}

impl EventsResponse {
    /// Builds a successful response whose body decodes to `events`
    #[must_use]
    pub fn success(events: Vec<EventRecord>) -> Self {
        Self {
            ok: true,
            body: Box::new(move || Box::pin(async move { Ok(events) })),
        }
    }

    /// Builds a response with a failure status; its body decodes to nothing
    #[must_use]
    pub fn error_status() -> Self {
        Self {
            ok: false,
            body: Box::new(|| Box::pin(async { Ok(Vec::new()) })),
        }
    }

    /// Whether the simulated request succeeded at the protocol level
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.ok
    }

    /// Starts the lazy body decode, consuming the response
    #[must_use]
    pub fn body(self) -> BodyFuture {
        (self.body)()
    }
}

impl std::fmt::Debug for EventsResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsResponse")
            .field("ok", &self.ok)
            .finish_non_exhaustive()
    }
}

/// Events gateway trait
///
/// Abstraction over the remote catalog source. The load cycle depends only on
/// this trait, so tests substitute an instantly resolving or instantly
/// failing implementation instead of waiting on real delays.
pub trait EventsGateway: Send + Sync {
    /// Fetch the event catalog
    ///
    /// Resolves with an [`EventsResponse`], or with a [`GatewayError`] when
    /// the simulated transport itself fails.
    fn fetch_events(&self) -> Pin<Box<dyn Future<Output = GatewayResult<EventsResponse>> + Send>>;
}

/// The fixed in-memory catalog standing in for a database
///
/// Four records, ids 1-4; this order is the canonical display order.
#[must_use]
pub fn demo_catalog() -> Vec<EventRecord> {
    vec![
        EventRecord::new(EventId::new(1), "Workshop de React Avanzado", "2024-10-15", 20),
        EventRecord::new(EventId::new(2), "Seminario de UX/UI", "2024-10-20", 50),
        EventRecord::new(EventId::new(3), "Hackathon WebInnovate", "2024-11-05", 100),
        EventRecord::new(EventId::new(4), "Charla: Futuro de la IA", "2024-11-12", 30),
    ]
}

/// Outcome the mock gateway is configured to produce
#[derive(Debug, Clone)]
enum MockOutcome {
    /// Resolve with `ok = true` and the configured catalog
    Success,
    /// Resolve with `ok = false`
    ErrorStatus,
    /// Reject at the transport level
    TransportFailure(String),
}

/// Mock events gateway
///
/// Resolves after a configurable simulated latency. The default configuration
/// always succeeds; the alternate constructors exercise the failure paths the
/// load cycle is required to handle.
#[derive(Clone, Debug)]
pub struct MockEventsGateway {
    latency: Duration,
    catalog: Vec<EventRecord>,
    outcome: MockOutcome,
}

impl MockEventsGateway {
    /// Creates a gateway that succeeds with the demo catalog
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            catalog: demo_catalog(),
            outcome: MockOutcome::Success,
        }
    }

    /// Creates a gateway that succeeds with a custom catalog
    #[must_use]
    pub const fn with_catalog(latency: Duration, catalog: Vec<EventRecord>) -> Self {
        Self {
            latency,
            catalog,
            outcome: MockOutcome::Success,
        }
    }

    /// Creates a gateway that resolves with a failure status (`ok = false`)
    #[must_use]
    pub fn responding_not_ok(latency: Duration) -> Self {
        Self {
            latency,
            catalog: Vec::new(),
            outcome: MockOutcome::ErrorStatus,
        }
    }

    /// Creates a gateway that fails at the transport level
    #[must_use]
    pub fn failing(latency: Duration, message: impl Into<String>) -> Self {
        Self {
            latency,
            catalog: Vec::new(),
            outcome: MockOutcome::TransportFailure(message.into()),
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn EventsGateway> {
        Arc::new(self)
    }
}

impl EventsGateway for MockEventsGateway {
    fn fetch_events(&self) -> Pin<Box<dyn Future<Output = GatewayResult<EventsResponse>> + Send>> {
        let latency = self.latency;
        let catalog = self.catalog.clone();
        let outcome = self.outcome.clone();

        Box::pin(async move {
            // Simulated network latency
            tokio::time::sleep(latency).await;

            match outcome {
                MockOutcome::Success => {
                    tracing::debug!(
                        events = catalog.len(),
                        latency_ms = latency.as_millis(),
                        "Mock gateway resolved successfully"
                    );
                    Ok(EventsResponse::success(catalog))
                },
                MockOutcome::ErrorStatus => {
                    tracing::debug!("Mock gateway resolved with a failure status");
                    Ok(EventsResponse::error_status())
                },
                MockOutcome::TransportFailure(message) => {
                    tracing::debug!(%message, "Mock gateway rejected at the transport level");
                    Err(GatewayError::ConnectionFailed { message })
                },
            }
        })
    }
}
