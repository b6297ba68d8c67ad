//! Configuration management for the eventboard application.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The two delays exist so the demo feels like the real flow; tests bypass
//! them entirely by constructing zero-latency environments.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog load-cycle configuration
    pub catalog: CatalogConfig,
    /// Reservation processing configuration
    pub reservation: ReservationConfig,
    /// Log filter (from `RUST_LOG`)
    pub log_level: String,
}

/// Catalog load-cycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Simulated gateway latency in milliseconds
    pub fetch_latency_ms: u64,
}

impl CatalogConfig {
    /// Simulated gateway latency
    #[must_use]
    pub const fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }
}

/// Reservation processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfig {
    /// Simulated processing delay in milliseconds before a confirmation
    pub processing_delay_ms: u64,
}

impl ReservationConfig {
    /// Simulated processing delay
    #[must_use]
    pub const fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            catalog: CatalogConfig {
                fetch_latency_ms: env::var("EVENTBOARD_FETCH_LATENCY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
            },
            reservation: ReservationConfig {
                processing_delay_ms: env::var("EVENTBOARD_PROCESSING_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1500),
            },
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
