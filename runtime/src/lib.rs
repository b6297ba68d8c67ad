//! # Eventboard Runtime
//!
//! Runtime implementation for the Eventboard architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back
//!   to reducers
//! - **Event Loop**: Manages the action → reducer → effects → action feedback
//!   loop
//!
//! ## Example
//!
//! ```ignore
//! use eventboard_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action and wait for its effects
//! let mut handle = store.send(Action::LoadEvents).await?;
//! handle.wait().await;
//!
//! // Read state
//! let count = store.state(|s| s.events.len()).await;
//! ```

use eventboard_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown
        /// initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        ///
        /// The action broadcast channel was closed, typically because the
        /// store is shutting down.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects spawned by
/// that action to complete. Feedback actions produced by those effects are
/// processed before the handle resolves, but effects spawned *by the feedback
/// actions* are tracked by their own handles.
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new effect handle together with its internal tracking side
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Wait for all tracked effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// Wait for all tracked effects to complete, with a timeout
    ///
    /// # Errors
    ///
    /// Returns `Err(())` if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), ()> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| ())
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Ensures the counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectTracking, Ordering, Reducer, RwLock, StoreError,
    };
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        /// Action broadcast channel for observing actions produced by effects.
        ///
        /// All actions produced by effects (delays, futures) are broadcast to
        /// observers. This enables request-response patterns in tests and
        /// real-time observation of the feedback loop.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Clone + Send + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The action broadcast capacity defaults to 16; use
        /// [`Store::with_broadcast_capacity`] when observers may lag.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
        }

        /// Create a new Store with custom action broadcast capacity
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// This is the primary way to interact with the store:
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Executes returned effects asynchronously
        /// 4. Effects may produce more actions (feedback loop)
        ///
        /// `send()` returns after *starting* effect execution; await the
        /// returned [`EffectHandle`] to wait for completion.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
        /// down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.actions.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            for effect in effects {
                self.execute_effect(effect, tracking.clone());
            }

            Ok(handle)
        }

        /// Send an action and wait for a matching result action
        ///
        /// Designed for request-response patterns: subscribes to the action
        /// broadcast *before* sending (avoiding a race), sends the initial
        /// action, then waits for an action produced by effects that matches
        /// the predicate.
        ///
        /// Only actions produced by effects are broadcast, never the initial
        /// action itself.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: timeout expired before a matching action
        /// - [`StoreError::ChannelClosed`]: broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: store is shutting down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            // Keep waiting; if the terminal action was among
                            // the dropped ones the timeout catches it.
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to all actions produced by effects of this store
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released
        /// promptly:
        ///
        /// ```ignore
        /// let count = store.state(|s| s.events.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Sets the shutdown flag (rejecting new actions), then waits for
        /// pending effects to complete.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
        /// before all pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(50);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending, "Shutdown timed out with effects still running");
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Execute an effect with completion tracking
        ///
        /// Effects execute in spawned tasks; a [`DecrementGuard`] ensures the
        /// tracking counter is decremented even if the effect panics, so a
        /// panicking effect never wedges an [`EffectHandle`].
        ///
        /// Reducer panics, in contrast, propagate and halt the store: reducers
        /// are pure functions and must not panic.
        fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "kind" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "kind" => "future").increment(1);
                    tracking.increment();
                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let store = self.clone();
                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking);
                        let _pending_guard = pending_guard;

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action");
                            let _ = store.action_broadcast.send(action.clone());
                            let _ = store.send(action).await;
                        }
                    });
                },
                Effect::Delay { duration, action } => {
                    metrics::counter!("store.effects.executed", "kind" => "delay").increment(1);
                    tracking.increment();
                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let store = self.clone();
                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking);
                        let _pending_guard = pending_guard;

                        tokio::time::sleep(duration).await;
                        tracing::trace!("Effect::Delay elapsed, dispatching action");
                        let _ = store.action_broadcast.send((*action).clone());
                        let _ = store.send(*action).await;
                    });
                },
                Effect::Parallel(effects) => {
                    metrics::counter!("store.effects.executed", "kind" => "parallel").increment(1);
                    for effect in effects {
                        self.execute_effect(effect, tracking.clone());
                    }
                },
                Effect::Sequential(effects) => {
                    metrics::counter!("store.effects.executed", "kind" => "sequential")
                        .increment(1);
                    tracking.increment();
                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let store = self.clone();
                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking);
                        let _pending_guard = pending_guard;

                        // Execute effects one by one, waiting for each to
                        // complete (including its feedback action) before
                        // starting the next.
                        for effect in effects {
                            let (mut sub_handle, sub_tracking) = EffectHandle::new();
                            store.execute_effect(effect, sub_tracking);
                            sub_handle.wait().await;
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;
    use eventboard_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
    use std::time::Duration;

    #[derive(Debug, Clone, Default)]
    struct TraceState {
        total: i64,
        marks: Vec<u32>,
    }

    #[derive(Debug, Clone)]
    enum TraceAction {
        Add(i64),
        Mark(u32),
        SpawnAdd(i64),
        AfterDelay { ms: u64, mark: u32 },
        FanOut,
        InOrder,
        Boom,
    }

    #[derive(Debug, Clone)]
    struct TraceEnv;

    #[derive(Debug, Clone)]
    struct TraceReducer;

    impl Reducer for TraceReducer {
        type State = TraceState;
        type Action = TraceAction;
        type Environment = TraceEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TraceAction::Add(n) => {
                    state.total += n;
                    smallvec![Effect::None]
                },
                TraceAction::Mark(k) => {
                    state.marks.push(k);
                    smallvec![Effect::None]
                },
                TraceAction::SpawnAdd(n) => {
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(TraceAction::Add(n))
                    }))]
                },
                TraceAction::AfterDelay { ms, mark } => smallvec![Effect::Delay {
                    duration: Duration::from_millis(ms),
                    action: Box::new(TraceAction::Mark(mark)),
                }],
                TraceAction::FanOut => {
                    smallvec![Effect::Parallel(vec![
                        Effect::Future(Box::pin(async { Some(TraceAction::Add(1)) })),
                        Effect::Future(Box::pin(async { Some(TraceAction::Add(1)) })),
                        Effect::Future(Box::pin(async { Some(TraceAction::Add(1)) })),
                    ])]
                },
                TraceAction::InOrder => {
                    smallvec![Effect::Sequential(vec![
                        Effect::Future(Box::pin(async { Some(TraceAction::Mark(1)) })),
                        Effect::Future(Box::pin(async { Some(TraceAction::Mark(2)) })),
                        Effect::Future(Box::pin(async { Some(TraceAction::Mark(3)) })),
                    ])]
                },
                TraceAction::Boom => {
                    #[allow(clippy::panic)] // Intentional panic to test isolation
                    {
                        smallvec![Effect::Future(Box::pin(async {
                            panic!("intentional panic in effect");
                        }))]
                    }
                },
            }
        }
    }

    fn test_store() -> Store<TraceState, TraceAction, TraceEnv, TraceReducer> {
        Store::new(TraceState::default(), TraceReducer, TraceEnv)
    }

    #[tokio::test]
    async fn send_updates_state() -> Result<(), StoreError> {
        let store = test_store();

        store.send(TraceAction::Add(3)).await?;
        store.send(TraceAction::Add(4)).await?;

        assert_eq!(store.state(|s| s.total).await, 7);
        Ok(())
    }

    #[tokio::test]
    async fn future_effect_feeds_back() -> Result<(), StoreError> {
        let store = test_store();

        let mut handle = store.send(TraceAction::SpawnAdd(5)).await?;
        handle.wait().await;

        assert_eq!(store.state(|s| s.total).await, 5);
        Ok(())
    }

    #[tokio::test]
    async fn delay_effect_dispatches_after_duration() -> Result<(), StoreError> {
        let store = test_store();

        let mut handle = store.send(TraceAction::AfterDelay { ms: 20, mark: 7 }).await?;

        // The delayed action has not been dispatched yet
        assert!(store.state(|s| s.marks.is_empty()).await);

        handle.wait().await;
        assert_eq!(store.state(|s| s.marks.clone()).await, vec![7]);
        Ok(())
    }

    #[tokio::test]
    async fn parallel_effects_all_run() -> Result<(), StoreError> {
        let store = test_store();

        let mut handle = store.send(TraceAction::FanOut).await?;
        handle.wait().await;

        assert_eq!(store.state(|s| s.total).await, 3);
        Ok(())
    }

    #[tokio::test]
    async fn sequential_effects_preserve_order() -> Result<(), StoreError> {
        let store = test_store();

        let mut handle = store.send(TraceAction::InOrder).await?;
        handle.wait().await;

        assert_eq!(store.state(|s| s.marks.clone()).await, vec![1, 2, 3]);
        Ok(())
    }

    #[tokio::test]
    #[allow(clippy::panic)] // Tests are allowed to panic on failures
    async fn concurrent_sends_serialize_at_the_reducer() {
        let store = test_store();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    let _ = store.send(TraceAction::Add(1)).await;
                })
            })
            .collect();

        for handle in handles {
            if let Err(e) = handle.await {
                panic!("concurrent send task panicked: {e}");
            }
        }

        assert_eq!(store.state(|s| s.total).await, 10);
    }

    #[tokio::test]
    async fn panicking_effect_is_isolated() -> Result<(), StoreError> {
        let store = test_store();

        let mut handle = store.send(TraceAction::Boom).await?;
        handle.wait().await;

        // Store is still functional after the effect panicked
        store.send(TraceAction::Add(1)).await?;
        assert_eq!(store.state(|s| s.total).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn shutdown_rejects_new_actions() -> Result<(), StoreError> {
        let store = test_store();

        store.shutdown(Duration::from_secs(1)).await?;

        assert!(matches!(
            store.send(TraceAction::Add(1)).await,
            Err(StoreError::ShutdownInProgress)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn shutdown_waits_for_pending_effects() -> Result<(), StoreError> {
        let store = test_store();

        store.send(TraceAction::AfterDelay { ms: 50, mark: 1 }).await?;

        // Shutdown must drain the delay task before returning
        store.shutdown(Duration::from_secs(1)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn send_and_wait_for_returns_feedback_action() -> Result<(), StoreError> {
        let store = test_store();

        let result = store
            .send_and_wait_for(
                TraceAction::SpawnAdd(2),
                |a| matches!(a, TraceAction::Add(_)),
                Duration::from_secs(1),
            )
            .await?;

        assert!(matches!(result, TraceAction::Add(2)));
        Ok(())
    }

    #[tokio::test]
    async fn cloned_store_shares_state() -> Result<(), StoreError> {
        let store1 = test_store();
        let store2 = store1.clone();

        store1.send(TraceAction::Add(1)).await?;
        store2.send(TraceAction::Add(1)).await?;

        assert_eq!(store1.state(|s| s.total).await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn completed_handle_resolves_immediately() {
        let mut handle = EffectHandle::completed();
        handle
            .wait_with_timeout(Duration::from_millis(10))
            .await
            .unwrap_or_else(|()| unreachable!("completed handle must resolve"));
    }
}
