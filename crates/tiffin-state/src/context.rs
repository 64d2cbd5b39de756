//! # Provider Context
//!
//! A typed registry of the state containers one session provides.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session::with_storage(storage)                                         │
//! │      context.manage(CartStore::new());                                  │
//! │      context.manage(LocationStore::new(storage));                       │
//! │                              │                                          │
//! │          ┌───────────────────┴──────────────────┐                       │
//! │          ▼                                      ▼                        │
//! │  context.state::<CartStore>()        context.state::<LocationStore>()  │
//! │                                                                         │
//! │  Context::new().state::<CartStore>() ── Err(MissingProvider)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each type is registered at most once; the first registration wins.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use tracing::warn;

use crate::error::{StateError, StateResult};

/// Typed state registry for one session.
#[derive(Default)]
pub struct Context {
    states: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `state` under its type.
    ///
    /// Returns `false` (and drops `state`) if the type is already managed.
    pub fn manage<T: Send + Sync + 'static>(&mut self, state: T) -> bool {
        let id = TypeId::of::<T>();
        if self.states.contains_key(&id) {
            warn!(
                container = std::any::type_name::<T>(),
                "State already managed, keeping the first instance"
            );
            return false;
        }
        self.states.insert(id, Box::new(state));
        true
    }

    /// Returns the managed `T`, or `MissingProvider`.
    pub fn state<T: Send + Sync + 'static>(&self) -> StateResult<&T> {
        self.try_state::<T>()
            .ok_or_else(StateError::missing_provider::<T>)
    }

    /// Returns the managed `T`, if any.
    pub fn try_state<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.downcast_ref::<T>())
    }

    /// Returns the managed `T`.
    ///
    /// # Panics
    /// If `T` is not managed. Use where a missing container can only mean
    /// the caller was wired outside its session.
    pub fn expect_state<T: Send + Sync + 'static>(&self) -> &T {
        match self.state::<T>() {
            Ok(state) => state,
            Err(e) => panic!("{e}"),
        }
    }

    /// Checks if `T` is managed.
    pub fn is_managed<T: Send + Sync + 'static>(&self) -> bool {
        self.states.contains_key(&TypeId::of::<T>())
    }

    /// Number of managed containers.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Checks if nothing is managed.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("managed", &self.states.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartStore;

    #[derive(Debug, PartialEq)]
    struct Flag(u8);

    #[test]
    fn test_empty_context_reports_missing_provider() {
        let context = Context::new();
        let err = context.state::<CartStore>().unwrap_err();

        assert!(matches!(
            err,
            StateError::MissingProvider { container: "CartStore" }
        ));
    }

    #[test]
    fn test_manage_and_lookup() {
        let mut context = Context::new();
        assert!(context.manage(Flag(1)));

        assert_eq!(context.state::<Flag>().unwrap(), &Flag(1));
        assert!(context.is_managed::<Flag>());
        assert!(!context.is_managed::<CartStore>());
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn test_first_registration_wins() {
        let mut context = Context::new();
        assert!(context.manage(Flag(1)));
        assert!(!context.manage(Flag(2)));

        assert_eq!(context.expect_state::<Flag>(), &Flag(1));
    }

    #[test]
    #[should_panic(expected = "CartStore must be used within a session")]
    fn test_expect_state_panics_outside_session() {
        Context::new().expect_state::<CartStore>();
    }
}
