//! Change listeners for the form store
//!
//! Listeners are plain synchronous callbacks. The registry is shared through
//! `Rc<RefCell<..>>` between the store and every [`Subscription`] it hands out,
//! and the subscription only holds a `Weak` so it can outlive the store.

use super::path::{FieldPath, PH_NUMBERS};
use super::values::FormValues;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// What kind of mutation produced a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A single field was edited
    Change,
    /// The field array grew or shrank
    Array,
    /// All values were replaced
    Reset,
}

/// A single mutation applied to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Edit(FieldPath),
    Append { index: usize },
    Remove { index: usize },
    Reset,
}

impl Change {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Edit(_) => ChangeKind::Change,
            Change::Append { .. } | Change::Remove { .. } => ChangeKind::Array,
            Change::Reset => ChangeKind::Reset,
        }
    }

    /// Dotted name of what changed, `None` for a reset
    pub fn name(&self) -> Option<String> {
        match self {
            Change::Edit(path) => Some(path.to_string()),
            Change::Append { .. } | Change::Remove { .. } => Some(PH_NUMBERS.to_string()),
            Change::Reset => None,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Edit(path) => write!(f, "edit {path}"),
            Change::Append { index } => write!(f, "append {PH_NUMBERS}.{index}"),
            Change::Remove { index } => write!(f, "remove {PH_NUMBERS}.{index}"),
            Change::Reset => write!(f, "reset"),
        }
    }
}

type Listener = Rc<RefCell<dyn FnMut(&FormValues, &Change)>>;

#[derive(Default)]
pub(crate) struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl Registry {
    fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }
}

/// Shared listener list owned by the store
#[derive(Clone, Default)]
pub(crate) struct Listeners {
    registry: Rc<RefCell<Registry>>,
}

impl Listeners {
    pub(crate) fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&FormValues, &Change) + 'static,
    {
        let id = self.registry.borrow_mut().insert(Rc::new(RefCell::new(listener)));
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
            active: true,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Call every listener in registration order
    pub(crate) fn notify(&self, values: &FormValues, change: &Change) {
        // Snapshot so listeners may unsubscribe (themselves or others) mid-dispatch
        let snapshot: Vec<(u64, Listener)> = self.registry.borrow().listeners.clone();
        for (id, listener) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut *callback)(values, change);
            }
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners").field("len", &self.len()).finish()
    }
}

/// Handle returned by `subscribe`
///
/// Dropping the handle does not stop notifications; call [`unsubscribe`](Self::unsubscribe).
#[must_use = "keep the subscription to be able to unsubscribe"]
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
    active: bool,
}

impl Subscription {
    /// Stop receiving notifications. Safe to call repeatedly, from inside a
    /// listener, or after the store has been dropped.
    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.remove(self.id);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active && self.registry.strong_count() > 0
    }
}
