//! UI surface handles.
//!
//! The original design reached into ambient global UI state from every
//! callback; here every outbound rendering call goes through one explicit
//! handle injected into the feature environments. The trait is the complete
//! outbound interface of the system: replace it to target a real UI.

use crate::render::SelectorOption;
use std::sync::{Arc, Mutex};

/// Outbound rendering operations the reducers' effects invoke
///
/// Content-setting operations are full replacements, not incremental diffs.
pub trait UiSurface: Send + Sync {
    /// Replace the event list container content with the given markup
    fn set_event_list(&self, markup: &str);

    /// Replace the selection control's option rows
    fn set_selector_options(&self, options: &[SelectorOption]);

    /// Toggle the loading indicator
    fn set_loading_visible(&self, visible: bool);

    /// Show a blocking user notification
    fn notify(&self, message: &str);

    /// Replace the status region content
    fn set_status(&self, message: &str);

    /// Clear the reservation form fields
    fn clear_reservation_form(&self);
}

/// Console rendition of the UI surface used by the demo binary
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSurface;

impl ConsoleSurface {
    /// Creates a new console surface
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn UiSurface> {
        Arc::new(Self::new())
    }
}

impl UiSurface for ConsoleSurface {
    fn set_event_list(&self, markup: &str) {
        println!("--- lista de eventos ---");
        println!("{markup}");
    }

    fn set_selector_options(&self, options: &[SelectorOption]) {
        println!("--- selector de eventos ---");
        for option in options {
            println!("  [{}] {}", option.value, option.label);
        }
    }

    fn set_loading_visible(&self, visible: bool) {
        if visible {
            println!("(cargando...)");
        } else {
            println!("(carga finalizada)");
        }
    }

    fn notify(&self, message: &str) {
        println!("[AVISO] {message}");
    }

    fn set_status(&self, message: &str) {
        println!("[estado] {message}");
    }

    fn clear_reservation_form(&self) {
        println!("(formulario limpiado)");
    }
}

/// One recorded surface invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    /// `set_event_list` with the rendered markup
    EventList(String),
    /// `set_selector_options` with the option rows
    SelectorOptions(Vec<SelectorOption>),
    /// `set_loading_visible`
    Loading(bool),
    /// `notify`
    Notify(String),
    /// `set_status`
    Status(String),
    /// `clear_reservation_form`
    ClearForm,
}

/// Surface double that records every call in order
///
/// Used by the integration tests to assert on the exact outbound call
/// sequence (indicator lifecycle, render-before-populate, notification
/// content).
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    /// Creates an empty recording surface
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an Arc-wrapped instance, returning both the concrete handle
    /// (for inspection) and the trait object (for injection)
    #[must_use]
    pub fn shared() -> (Arc<Self>, Arc<dyn UiSurface>) {
        let surface = Arc::new(Self::new());
        let as_trait: Arc<dyn UiSurface> = surface.clone();
        (surface, as_trait)
    }

    /// Snapshot of all recorded calls, in invocation order
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(call);
    }
}

impl UiSurface for RecordingSurface {
    fn set_event_list(&self, markup: &str) {
        self.record(SurfaceCall::EventList(markup.to_string()));
    }

    fn set_selector_options(&self, options: &[SelectorOption]) {
        self.record(SurfaceCall::SelectorOptions(options.to_vec()));
    }

    fn set_loading_visible(&self, visible: bool) {
        self.record(SurfaceCall::Loading(visible));
    }

    fn notify(&self, message: &str) {
        self.record(SurfaceCall::Notify(message.to_string()));
    }

    fn set_status(&self, message: &str) {
        self.record(SurfaceCall::Status(message.to_string()));
    }

    fn clear_reservation_form(&self) {
        self.record(SurfaceCall::ClearForm);
    }
}
