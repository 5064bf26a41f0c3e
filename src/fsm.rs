//! Table-driven finite-state-machine engine.
//!
//! `S` is the state type (a fieldless enum), `E` the per-frame event, `C` the
//! context the callbacks mutate (usually the entity itself) and `X` the
//! environment handed through to them (host services, frame time).
//!
//! The engine knows nothing about any particular entity. Each state gets a
//! [`StateConfig`] holding its callbacks and the set of states it may move to;
//! the [`StateTable`] is assembled once through [`StateTableBuilder`] and is
//! read-only afterwards.
//!
//! # Usage
//! ```ignore
//! let table = StateTable::builder()
//!     .register(Door::Closed, "Closed", CLOSED, [Door::Open])
//!     .register(Door::Open, "Open", OPEN, [Door::Closed])
//!     .build()?;
//! // Each frame:
//! table.step(&mut door, &mut env, event);
//! ```

use std::fmt::Debug;
use std::marker::PhantomData;

use strum::EnumCount;
use thiserror::Error;
use tracing::trace;

/// A closed set of states with a dense index.
pub trait FsmState: Copy + Eq + Debug + EnumCount + 'static {
    /// Position of this state in `0..Self::COUNT`.
    fn index(self) -> usize;
}

/// Runtime half of the machine: which state is current, which came before it,
/// and how long the machine has been in the current one.
#[derive(Clone, Debug)]
pub struct StateMachine<S: FsmState> {
    pub state: S,
    pub previous: S,
    /// Seconds spent in the current state. Reset to 0.0 on each transition.
    pub elapsed: f32,
}

impl<S: FsmState> StateMachine<S> {
    /// Create a new machine starting in `initial`, with `previous == initial`.
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            previous: initial,
            elapsed: 0.0,
        }
    }

    /// Move to `next` unconditionally. Self-transitions are not collapsed.
    /// Legality is the table's concern, see [`StateTable::request_transition`].
    pub fn commit(&mut self, next: S) {
        self.previous = std::mem::replace(&mut self.state, next);
        self.elapsed = 0.0;
    }

    /// Advance the elapsed-in-state timer by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }
}

/// Anything that carries a [`StateMachine`] the table can drive.
pub trait Stateful<S: FsmState> {
    fn machine(&self) -> &StateMachine<S>;
    fn machine_mut(&mut self) -> &mut StateMachine<S>;
}

/// The four callbacks of one state.
///
/// `on_event` and `on_update` return the state they want to move to, if any;
/// the table validates and commits it. `on_enter` and `on_exit` cannot
/// request transitions.
pub struct Behavior<S, E, C, X: ?Sized> {
    pub on_event: fn(&mut C, &mut X, E) -> Option<S>,
    pub on_enter: fn(&mut C, &mut X),
    pub on_update: fn(&mut C, &mut X) -> Option<S>,
    pub on_exit: fn(&mut C, &mut X),
}

impl<S, E, C, X: ?Sized> Clone for Behavior<S, E, C, X> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, E, C, X: ?Sized> Copy for Behavior<S, E, C, X> {}

/// Bitset of states, indexed by [`FsmState::index`].
pub struct StateSet<S> {
    bits: u64,
    _marker: PhantomData<S>,
}

impl<S> Clone for StateSet<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for StateSet<S> {}

impl<S: FsmState> StateSet<S> {
    pub const fn empty() -> Self {
        Self { bits: 0, _marker: PhantomData }
    }

    /// Indices past 63 have no bit and are ignored.
    pub fn insert(&mut self, state: S) {
        if let Some(bit) = Self::bit(state) {
            self.bits |= bit;
        }
    }

    pub fn contains(&self, state: S) -> bool {
        Self::bit(state).is_some_and(|bit| self.bits & bit != 0)
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    fn bit(state: S) -> Option<u64> {
        u32::try_from(state.index()).ok().and_then(|index| 1u64.checked_shl(index))
    }
}

impl<S: FsmState> FromIterator<S> for StateSet<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::empty();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl<S: FsmState> Debug for StateSet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StateSet({:#b})", self.bits)
    }
}

/// One slot of the table.
pub struct StateConfig<S, E, C, X: ?Sized> {
    pub name: &'static str,
    /// `None` for a placeholder state that never reacts to anything.
    pub behavior: Option<Behavior<S, E, C, X>>,
    pub legal: StateSet<S>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("state index {0} was never registered")]
    Unregistered(usize),

    #[error("state {0} was registered twice")]
    Duplicate(String),

    #[error("{0} states do not fit in a transition set (max 64)")]
    TooManyStates(usize),
}

/// Collects one [`StateConfig`] per state, then freezes them into a table.
pub struct StateTableBuilder<S, E, C, X: ?Sized> {
    slots: Vec<Option<StateConfig<S, E, C, X>>>,
    error: Option<FsmError>,
}

impl<S: FsmState, E, C, X: ?Sized> StateTableBuilder<S, E, C, X> {
    fn new() -> Self {
        let error = (S::COUNT > 64).then_some(FsmError::TooManyStates(S::COUNT));
        Self {
            slots: (0..S::COUNT).map(|_| None).collect(),
            error,
        }
    }

    /// Fill the slot for `state`.
    pub fn register(
        self,
        state: S,
        name: &'static str,
        behavior: Behavior<S, E, C, X>,
        legal: impl IntoIterator<Item = S>,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        self.insert(state, StateConfig {
            name,
            behavior: Some(behavior),
            legal: legal.into_iter().collect(),
        })
    }

    /// Fill the slot for `state` with a placeholder: no callbacks, no exits.
    pub fn register_inert(self, state: S, name: &'static str) -> Self {
        self.insert(state, StateConfig {
            name,
            behavior: None,
            legal: StateSet::empty(),
        })
    }

    fn insert(mut self, state: S, config: StateConfig<S, E, C, X>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let slot = &mut self.slots[state.index()];
        if slot.is_some() {
            self.error = Some(FsmError::Duplicate(format!("{state:?}")));
        } else {
            *slot = Some(config);
        }
        self
    }

    /// Freeze the table. Every state must have been registered exactly once.
    pub fn build(self) -> Result<StateTable<S, E, C, X>, FsmError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let mut configs = Vec::with_capacity(self.slots.len());
        for (index, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Some(config) => configs.push(config),
                None => return Err(FsmError::Unregistered(index)),
            }
        }
        Ok(StateTable { configs })
    }
}

/// Read-only mapping from state to its [`StateConfig`], plus the transition
/// guard and event dispatcher built on it.
pub struct StateTable<S, E, C, X: ?Sized> {
    configs: Vec<StateConfig<S, E, C, X>>,
}

impl<S, E, C, X> StateTable<S, E, C, X>
where
    S: FsmState,
    E: Copy + Debug,
    C: Stateful<S>,
    X: ?Sized,
{
    pub fn builder() -> StateTableBuilder<S, E, C, X> {
        StateTableBuilder::new()
    }

    pub fn config(&self, state: S) -> &StateConfig<S, E, C, X> {
        &self.configs[state.index()]
    }

    /// Display name given at registration.
    pub fn name(&self, state: S) -> &'static str {
        self.config(state).name
    }

    /// Whether `to` is in the legal-target set of `from`.
    pub fn can_transition(&self, from: S, to: S) -> bool {
        self.config(from).legal.contains(to)
    }

    /// Guarded transition: runs `exit(current)`, commits, then `enter(target)`.
    ///
    /// An illegal request is silently rejected and the context stays where it
    /// is; the return value tells the two apart. Self-transitions go through
    /// the full exit/enter sequence when they are legal.
    pub fn request_transition(&self, ctx: &mut C, env: &mut X, target: S) -> bool {
        let current = ctx.machine().state;
        if !self.can_transition(current, target) {
            trace!(from = self.name(current), to = self.name(target), "transition rejected");
            return false;
        }
        if let Some(behavior) = &self.config(current).behavior {
            (behavior.on_exit)(ctx, env);
        }
        ctx.machine_mut().commit(target);
        if let Some(behavior) = &self.config(target).behavior {
            (behavior.on_enter)(ctx, env);
        }
        true
    }

    /// Hand `event` to the current state's handler and apply whatever it asks
    /// for. Returns `true` if a transition was committed.
    pub fn dispatch(&self, ctx: &mut C, env: &mut X, event: E) -> bool {
        let current = ctx.machine().state;
        let Some(behavior) = &self.config(current).behavior else {
            return false;
        };
        match (behavior.on_event)(ctx, env, event) {
            Some(target) => self.request_transition(ctx, env, target),
            None => false,
        }
    }

    /// Run the current state's per-frame update and apply any forced
    /// transition it reports. Returns `true` if a transition was committed.
    pub fn update(&self, ctx: &mut C, env: &mut X) -> bool {
        let current = ctx.machine().state;
        let Some(behavior) = &self.config(current).behavior else {
            return false;
        };
        match (behavior.on_update)(ctx, env) {
            Some(target) => self.request_transition(ctx, env, target),
            None => false,
        }
    }

    /// One frame: event handling strictly before the update of whichever
    /// state is current afterwards.
    pub fn step(&self, ctx: &mut C, env: &mut X, event: E) {
        self.dispatch(ctx, env, event);
        self.update(ctx, env);
    }
}
