//! Dioxus hooks over the core services.

use std::cell::RefCell;
use std::rc::Rc;

use api::RequestScope;
use dioxus::prelude::*;

use super::auth::{session, AuthState, Subscription};

/// The current session, re-rendering the caller on login/logout.
pub fn use_auth() -> Signal<AuthState> {
    let state = use_signal(|| session().snapshot());

    // The guard lives as long as the component.
    let _subscription: Rc<Subscription> = use_hook(|| {
        Rc::new(session().subscribe(move |next| {
            let mut state = state;
            state.set(next.clone());
        }))
    });

    state
}

/// A request scope cancelled when the component unmounts.
pub fn use_request_scope() -> RequestScope {
    let scope = use_hook(RequestScope::new);
    let on_drop = scope.clone();
    use_drop(move || on_drop.cancel());
    scope
}

/// One scope per load of a keyed resource. Starting a load cancels the
/// previous one, so only the latest key can write its result.
#[derive(Clone, Default)]
pub struct LoadSlot {
    current: Rc<RefCell<Option<RequestScope>>>,
}

impl LoadSlot {
    pub fn restart(&self) -> RequestScope {
        let fresh = RequestScope::new();
        if let Some(previous) = self.current.replace(Some(fresh.clone())) {
            previous.cancel();
        }
        fresh
    }

    pub fn cancel(&self) {
        if let Some(previous) = self.current.borrow_mut().take() {
            previous.cancel();
        }
    }
}

/// A [`LoadSlot`] whose current load is cancelled when the component unmounts.
pub fn use_load_slot() -> LoadSlot {
    let slot = use_hook(LoadSlot::default);
    let on_drop = slot.clone();
    use_drop(move || on_drop.cancel());
    slot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_cancels_the_previous_load() {
        let slot = LoadSlot::default();
        let first = slot.restart();
        let second = slot.restart();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        slot.cancel();
        assert!(second.is_cancelled());
    }
}
