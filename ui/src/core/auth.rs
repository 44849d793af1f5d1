//! The signed-in session.
//!
//! One [`AuthStore`] per process holds the token and profile. Views read it
//! through [`session()`] or the `use_auth` hook; only `login`, `logout` and
//! `update_profile` mutate it. Every mutation is written through to storage
//! and broadcast to live subscribers.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use api::types::UserProfile;
use serde::{Deserialize, Serialize};

use super::storage::{self, StorageError};

pub const AUTH_STORAGE_KEY: &str = "auth-storage";
const PERSIST_VERSION: u32 = 0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl AuthState {
    pub fn signed_in(token: String, user: UserProfile) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
            is_authenticated: true,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedAuth {
    state: AuthState,
    #[serde(default)]
    version: u32,
}

pub fn encode_state(state: &AuthState) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&PersistedAuth {
        state: state.clone(),
        version: PERSIST_VERSION,
    })?)
}

/// A record without a token is never treated as signed in.
pub fn decode_state(raw: &str) -> Result<AuthState, StorageError> {
    let mut state = serde_json::from_str::<PersistedAuth>(raw)?.state;
    if state.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
        state = AuthState::default();
    }
    Ok(state)
}

/// Where the session is kept between launches.
pub trait SessionPersistence {
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&self, record: &str) -> Result<(), StorageError>;
}

/// Browser local storage / data-directory file under [`AUTH_STORAGE_KEY`].
pub struct LocalPersistence;

impl SessionPersistence for LocalPersistence {
    fn load(&self) -> Result<Option<String>, StorageError> {
        storage::read_item(AUTH_STORAGE_KEY)
    }

    fn save(&self, record: &str) -> Result<(), StorageError> {
        storage::write_item(AUTH_STORAGE_KEY, record)
    }
}

/// In-memory persistence, handy for previews and tests.
#[derive(Default, Clone)]
pub struct MemoryPersistence {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryPersistence {
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(record.into()))),
        }
    }

    pub fn record(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.record())
    }

    fn save(&self, record: &str) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(record.to_string());
        Ok(())
    }
}

type Listener = Rc<dyn Fn(&AuthState)>;

pub struct AuthStore {
    state: RefCell<AuthState>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
    persistence: Box<dyn SessionPersistence>,
}

impl AuthStore {
    /// Build a store and hydrate it from `persistence`. Unreadable or corrupt
    /// records start a signed-out session.
    pub fn new(persistence: Box<dyn SessionPersistence>) -> Rc<Self> {
        let state = match persistence.load() {
            Ok(Some(raw)) => decode_state(&raw).unwrap_or_else(|err| {
                tracing::warn!(%err, "ignoring stored session");
                AuthState::default()
            }),
            Ok(None) => AuthState::default(),
            Err(err) => {
                tracing::warn!(%err, "session storage unreadable");
                AuthState::default()
            }
        };

        Rc::new(Self {
            state: RefCell::new(state),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            persistence,
        })
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn login(&self, token: String, user: UserProfile) {
        tracing::info!(user = %user.id, "signed in");
        self.commit(AuthState::signed_in(token, user));
    }

    pub fn logout(&self) {
        if self.is_authenticated() {
            tracing::info!("signed out");
        }
        self.commit(AuthState::default());
    }

    /// Replace the cached profile. Ignored while signed out.
    pub fn update_profile(&self, user: UserProfile) {
        let mut next = self.snapshot();
        if !next.is_authenticated {
            tracing::debug!("profile update without a session dropped");
            return;
        }
        next.user = Some(user);
        self.commit(next);
    }

    /// Register `listener` for every future mutation. Dropping the returned
    /// guard unsubscribes.
    pub fn subscribe(self: &Rc<Self>, listener: impl Fn(&AuthState) + 'static) -> Subscription {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        Subscription {
            store: Rc::downgrade(self),
            id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn commit(&self, next: AuthState) {
        *self.state.borrow_mut() = next.clone();

        match encode_state(&next) {
            Ok(record) => {
                if let Err(err) = self.persistence.save(&record) {
                    tracing::warn!(%err, "session not persisted");
                }
            }
            Err(err) => tracing::warn!(%err, "session not serializable"),
        }

        // Listeners may subscribe or unsubscribe while being notified.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(entry, _)| *entry != id);
    }
}

/// Keeps a listener registered for as long as it lives.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<AuthStore>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.unsubscribe(self.id);
        }
    }
}

thread_local! {
    static SESSION: Rc<AuthStore> = AuthStore::new(Box::new(LocalPersistence));
}

/// The process-wide session store.
pub fn session() -> Rc<AuthStore> {
    SESSION.with(Rc::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(nickname: &str) -> UserProfile {
        UserProfile {
            id: "u-1".into(),
            nickname: nickname.into(),
            avatar: None,
            vip_level: 0,
            points: 120,
        }
    }

    #[test]
    fn persisted_record_shape() {
        let state = AuthState::signed_in("tok".into(), profile("小林"));
        let value: serde_json::Value = serde_json::from_str(&encode_state(&state).unwrap()).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["token"], "tok");
        assert_eq!(value["state"]["isAuthenticated"], true);
        assert_eq!(value["state"]["user"]["nickname"], "小林");
    }

    #[test]
    fn hydrates_from_storage() {
        let record = encode_state(&AuthState::signed_in("tok".into(), profile("A"))).unwrap();
        let store = AuthStore::new(Box::new(MemoryPersistence::with_record(record)));
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok"));
    }

    #[test]
    fn corrupt_or_tokenless_records_sign_out() {
        let store = AuthStore::new(Box::new(MemoryPersistence::with_record("{not json")));
        assert_eq!(store.snapshot(), AuthState::default());

        let tokenless = r#"{"state":{"token":null,"user":null,"isAuthenticated":true},"version":0}"#;
        let store = AuthStore::new(Box::new(MemoryPersistence::with_record(tokenless)));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn mutations_write_through() {
        let persistence = MemoryPersistence::default();
        let store = AuthStore::new(Box::new(persistence.clone()));

        store.login("tok".into(), profile("A"));
        let saved = decode_state(&persistence.record().unwrap()).unwrap();
        assert!(saved.is_authenticated);

        store.logout();
        let saved = decode_state(&persistence.record().unwrap()).unwrap();
        assert_eq!(saved, AuthState::default());
    }

    #[test]
    fn update_profile_requires_session() {
        let store = AuthStore::new(Box::new(MemoryPersistence::default()));
        store.update_profile(profile("ghost"));
        assert!(store.user().is_none());

        store.login("tok".into(), profile("A"));
        store.update_profile(profile("B"));
        assert_eq!(store.user().map(|u| u.nickname), Some("B".to_string()));
    }

    #[test]
    fn subscribers_see_every_mutation_until_dropped() {
        let store = AuthStore::new(Box::new(MemoryPersistence::default()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let guard = store.subscribe(move |state| sink.borrow_mut().push(state.is_authenticated));
        assert_eq!(store.subscriber_count(), 1);

        store.login("tok".into(), profile("A"));
        store.logout();
        drop(guard);
        store.login("tok".into(), profile("A"));

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn guard_outliving_store_is_harmless() {
        let store = AuthStore::new(Box::new(MemoryPersistence::default()));
        let guard = store.subscribe(|_| {});
        drop(store);
        drop(guard);
    }
}
