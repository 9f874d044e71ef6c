use crate::{update, AppState, AppViewModel, Effect, Msg};

type Observer = Box<dyn FnMut(&AppViewModel)>;

/// Owns the single [`AppState`] of a session and serializes every transition.
///
/// Observers are called with a fresh view model after each transition that
/// changed something.
#[derive(Default)]
pub struct Store {
    state: AppState,
    observers: Vec<Observer>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&AppViewModel) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Applies `msg` and returns the effects the caller must run.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            for observer in &mut self.observers {
                observer(&view);
            }
        }
        effects
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
