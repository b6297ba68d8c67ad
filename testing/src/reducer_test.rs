//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable
//! Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use eventboard_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Several `when_action` calls may be chained: the actions are applied in
/// order to the same state, and effect assertions run against the effects
/// returned by the *last* action. This makes multi-step state machines
/// (load-then-complete, submit-then-confirm) easy to drive without wiring a
/// full store.
///
/// # Example
///
/// ```ignore
/// ReducerTest::new(ReservationReducer::new())
///     .with_env(test_environment())
///     .given_state(ReservationState::new())
///     .when_action(ReservationAction::SubmitReservation { .. })
///     .then_state(|state| assert!(state.is_processing()))
///     .then_effects(|effects| assertions::assert_effects_count(effects, 1))
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Append an action to apply (When); may be called repeatedly
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the effects of the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, environment, or at least one action is not
    /// set, or if any assertion fails.
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let mut last_effects = Vec::new();
        for action in self.actions {
            last_effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&last_effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use eventboard_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects contain anything besides a single `Effect::None`.
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }

    /// Assert that effects contain at least one Delay effect, searching
    /// through Parallel and Sequential compositions
    ///
    /// # Panics
    ///
    /// Panics if no Delay effect is found.
    pub fn assert_has_delay_effect<A>(effects: &[Effect<A>]) {
        fn contains_delay<A>(effect: &Effect<A>) -> bool {
            match effect {
                Effect::Delay { .. } => true,
                Effect::Parallel(inner) | Effect::Sequential(inner) => {
                    inner.iter().any(contains_delay)
                },
                Effect::None | Effect::Future(_) => false,
            }
        }

        assert!(
            effects.iter().any(contains_delay),
            "Expected at least one Delay effect, but none found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventboard_core::{SmallVec, smallvec};
    use std::time::Duration;

    #[derive(Clone, Debug, Default)]
    struct GaugeState {
        level: u32,
    }

    #[derive(Clone, Debug)]
    enum GaugeAction {
        Raise(u32),
        Drain,
    }

    struct GaugeReducer;

    struct GaugeEnv;

    impl Reducer for GaugeReducer {
        type State = GaugeState;
        type Action = GaugeAction;
        type Environment = GaugeEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                GaugeAction::Raise(n) => {
                    state.level += n;
                    smallvec![Effect::None]
                },
                GaugeAction::Drain => {
                    state.level = 0;
                    smallvec![Effect::Delay {
                        duration: Duration::from_millis(1),
                        action: Box::new(GaugeAction::Raise(1)),
                    }]
                },
            }
        }
    }

    #[test]
    fn single_action_asserts_state_and_effects() {
        ReducerTest::new(GaugeReducer)
            .with_env(GaugeEnv)
            .given_state(GaugeState::default())
            .when_action(GaugeAction::Raise(3))
            .then_state(|state| assert_eq!(state.level, 3))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn chained_actions_apply_in_order() {
        ReducerTest::new(GaugeReducer)
            .with_env(GaugeEnv)
            .given_state(GaugeState::default())
            .when_action(GaugeAction::Raise(3))
            .when_action(GaugeAction::Drain)
            .then_state(|state| assert_eq!(state.level, 0))
            .then_effects(assertions::assert_has_delay_effect)
            .run();
    }

    #[test]
    fn count_assertion_accepts_exact_match() {
        assertions::assert_effects_count::<GaugeAction>(&[Effect::None], 1);
        assertions::assert_effects_count::<GaugeAction>(&[], 0);
    }
}
