//! Reducer-driven state container with change subscriptions.
//!
//! DESIGN
//! ======
//! A `Store` owns one slice and is the only way to change it. `dispatch`
//! runs the slice's pure reducer to completion, swaps in the new state, then
//! calls every subscriber with the result. Stores are explicitly constructed
//! and handed to whoever needs them; nothing here is global.
//!
//! Dispatch takes `&mut self`, so one action is applied at a time without any
//! locking. Async work feeds back in through `app::EventQueue`.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::debug;

/// A state slice that evolves through pure action reductions.
pub trait Reducer: Clone {
    type Action: std::fmt::Debug;

    /// Short name used in logs.
    const NAME: &'static str;

    /// Produce the next state. Must not mutate `self` or have side effects.
    #[must_use]
    fn reduce(&self, action: Self::Action) -> Self;
}

/// Handle returned by [`Store::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<S> = Box<dyn FnMut(&S)>;

/// Owner of one slice plus the listeners re-rendered after each dispatch.
pub struct Store<S: Reducer> {
    state: S,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_listener: u64,
    dispatched: u64,
}

impl<S: Reducer + Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Reducer> Store<S> {
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self { state: initial, listeners: Vec::new(), next_listener: 0, dispatched: 0 }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Number of actions applied so far.
    #[must_use]
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Apply `action` and notify every subscriber.
    pub fn dispatch(&mut self, action: S::Action) {
        debug!(slice = S::NAME, ?action, "dispatch");
        self.state = self.state.reduce(action);
        self.dispatched += 1;
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    /// Register a change listener. It is not called for the current state.
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

impl<S: Reducer + std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("slice", &S::NAME)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("dispatched", &self.dispatched)
            .finish()
    }
}
