//! Pure rendering functions for the event catalog.
//!
//! Both functions map an `EventRecord` sequence to presentation data without
//! touching any surface: the list renderer produces markup, the selector
//! populator produces option rows. The UI surface applies their output as a
//! full replacement, never an incremental diff.

use crate::types::EventRecord;

/// Label of the placeholder option shown before any selection
pub const PLACEHOLDER_LABEL: &str = "-- Elige un evento --";

/// One row of the event selection control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    /// Submitted value; the empty string is the "no selection" sentinel
    pub value: String,
    /// Human-readable label
    pub label: String,
}

impl SelectorOption {
    /// The "no selection" placeholder row
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
        }
    }

    /// Whether this row is the placeholder sentinel
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Renders the catalog as list markup, one item per record in input order
///
/// The detail action is keyed by the record id: names are not guaranteed
/// unique, ids are. An empty catalog renders an empty string.
#[must_use]
pub fn render_event_list(events: &[EventRecord]) -> String {
    let mut markup = String::new();

    for event in events {
        markup.push_str(&format!(
            concat!(
                "<li class=\"event-item\">",
                "<div class=\"event-info\">",
                "<h3>{name}</h3>",
                "<div class=\"event-date\">",
                "<span>📅 Fecha: {date}</span>",
                "<span>👥 Cupos: {capacity}</span>",
                "</div>",
                "</div>",
                "<button class=\"btn btn-primary js-btn-detalle\" data-event-id=\"{id}\">",
                "Ver Detalle",
                "</button>",
                "</li>\n"
            ),
            name = event.name,
            date = event.date,
            capacity = event.capacity,
            id = event.id,
        ));
    }

    markup
}

/// Builds the blocking notification shown when the detail action of a record
/// is selected
///
/// The action itself is correlated by id (see [`render_event_list`]); the
/// notice then displays the record's name.
#[must_use]
pub fn detail_notice(event: &EventRecord) -> String {
    format!(
        "Has seleccionado ver detalles de: {}\n\nPor favor selecciónalo en el formulario de abajo para reservar.",
        event.name
    )
}

/// Builds the selection control rows: placeholder first, then one option per
/// record in input order
///
/// Option values carry the record id, labels read `"name (date)"`. An empty
/// catalog yields only the placeholder.
#[must_use]
pub fn selector_options(events: &[EventRecord]) -> Vec<SelectorOption> {
    let mut options = Vec::with_capacity(events.len() + 1);
    options.push(SelectorOption::placeholder());

    for event in events {
        options.push(SelectorOption {
            value: event.id.to_string(),
            label: format!("{} ({})", event.name, event.date),
        });
    }

    options
}
