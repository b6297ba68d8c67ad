//! Reducer for the catalog load cycle.

use crate::catalog::{CatalogAction, CatalogEnvironment, CatalogState, LOAD_FAILURE_NOTICE};
use crate::catalog::types::LoadError;
use crate::gateway::EventsGateway;
use crate::render::{render_event_list, selector_options};
use crate::surface::UiSurface;
use eventboard_core::environment::Clock;
use eventboard_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Reducer driving the catalog load cycle
///
/// `LoadEvents` opens a cycle: the indicator is shown, the gateway awaited,
/// and the result fed back stamped with the cycle's generation. Completion
/// actions render (or notify) and hide the indicator as their final surface
/// call; completions of superseded cycles are discarded entirely.
#[derive(Debug, Clone, Copy)]
pub struct CatalogReducer;

impl CatalogReducer {
    /// Creates a new catalog reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CatalogReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Action = CatalogAction;
    type Environment = CatalogEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CatalogAction::LoadEvents => {
                state.generation += 1;
                state.loading = true;
                state.last_error = None;

                let generation = state.generation;
                let gateway = Arc::clone(&env.gateway);
                let surface = Arc::clone(&env.surface);
                let clock = Arc::clone(&env.clock);

                tracing::debug!(generation, "Starting catalog load cycle");

                smallvec![Effect::Future(Box::pin(async move {
                    // Indicator goes up before the request is issued
                    surface.set_loading_visible(true);

                    let outcome = match gateway.fetch_events().await {
                        Err(error) => Err(LoadError::Transport {
                            message: error.to_string(),
                        }),
                        Ok(response) if !response.is_ok() => Err(LoadError::RemoteStatus),
                        Ok(response) => response.body().await.map_err(|error| {
                            LoadError::Transport {
                                message: error.to_string(),
                            }
                        }),
                    };

                    Some(match outcome {
                        Ok(events) => CatalogAction::EventsLoaded {
                            generation,
                            events,
                            loaded_at: clock.now(),
                        },
                        Err(error) => CatalogAction::LoadFailed { generation, error },
                    })
                }))]
            },

            CatalogAction::EventsLoaded {
                generation,
                events,
                loaded_at,
            } => {
                if generation != state.generation {
                    tracing::debug!(
                        generation,
                        current = state.generation,
                        "Discarding stale load result"
                    );
                    return smallvec![Effect::None];
                }

                state.loading = false;
                state.last_error = None;
                state.events.clone_from(&events);
                state.last_loaded_at = Some(loaded_at);

                tracing::info!(generation, events = events.len(), "Catalog load cycle completed");

                let surface = Arc::clone(&env.surface);
                smallvec![Effect::Future(Box::pin(async move {
                    surface.set_event_list(&render_event_list(&events));
                    surface.set_selector_options(&selector_options(&events));
                    // Indicator comes down only once the cycle fully resolved
                    surface.set_loading_visible(false);
                    None
                }))]
            },

            CatalogAction::LoadFailed { generation, error } => {
                if generation != state.generation {
                    tracing::debug!(
                        generation,
                        current = state.generation,
                        "Discarding stale load failure"
                    );
                    return smallvec![Effect::None];
                }

                state.loading = false;
                state.last_error = Some(error.clone());

                let surface = Arc::clone(&env.surface);
                smallvec![Effect::Future(Box::pin(async move {
                    tracing::error!(%error, "Catalog load cycle failed");
                    surface.notify(LOAD_FAILURE_NOTICE);
                    surface.set_loading_visible(false);
                    None
                }))]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{MockEventsGateway, demo_catalog};
    use crate::surface::RecordingSurface;
    use chrono::Utc;
    use eventboard_testing::{ReducerTest, assertions, test_clock};
    use std::time::Duration;

    fn test_env() -> CatalogEnvironment {
        let (_, surface) = RecordingSurface::shared();
        CatalogEnvironment::new(
            MockEventsGateway::new(Duration::ZERO).shared(),
            surface,
            Arc::new(test_clock()),
        )
    }

    #[test]
    fn load_events_opens_a_cycle() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::new())
            .when_action(CatalogAction::LoadEvents)
            .then_state(|state| {
                assert!(state.is_loading());
                assert_eq!(state.generation, 1);
                assert!(state.last_error.is_none());
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn events_loaded_stores_catalog_and_renders() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::new())
            .when_action(CatalogAction::LoadEvents)
            .when_action(CatalogAction::EventsLoaded {
                generation: 1,
                events: demo_catalog(),
                loaded_at: Utc::now(),
            })
            .then_state(|state| {
                assert!(!state.is_loading());
                assert_eq!(state.event_count(), 4);
                assert!(state.last_loaded_at.is_some());
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn stale_completion_is_discarded() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::new())
            .when_action(CatalogAction::LoadEvents)
            .when_action(CatalogAction::LoadEvents)
            .when_action(CatalogAction::EventsLoaded {
                generation: 1,
                events: demo_catalog(),
                loaded_at: Utc::now(),
            })
            .then_state(|state| {
                // The first cycle's completion arrived after the second
                // cycle started: nothing applied, still loading
                assert!(state.is_loading());
                assert_eq!(state.generation, 2);
                assert_eq!(state.event_count(), 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn load_failure_records_error() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState::new())
            .when_action(CatalogAction::LoadEvents)
            .when_action(CatalogAction::LoadFailed {
                generation: 1,
                error: LoadError::RemoteStatus,
            })
            .then_state(|state| {
                assert!(!state.is_loading());
                assert_eq!(state.last_error, Some(LoadError::RemoteStatus));
                assert_eq!(
                    state.last_error.as_ref().map(ToString::to_string),
                    Some("Error en la respuesta de la API".to_string())
                );
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn new_cycle_clears_previous_error() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(CatalogState {
                generation: 3,
                loading: false,
                events: Vec::new(),
                last_error: Some(LoadError::RemoteStatus),
                last_loaded_at: None,
            })
            .when_action(CatalogAction::LoadEvents)
            .then_state(|state| {
                assert!(state.last_error.is_none());
                assert_eq!(state.generation, 4);
            })
            .run();
    }
}
