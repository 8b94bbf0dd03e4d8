use dynscope_api::{Namespace, OwnerRef, ScopeObserver, ScopeOwner, Value};
use dynscope_core::ScopeConfig;
use dynscope_core::globals::{standard_builtins, with_builtins};
use dynscope_core::owner::ScopeNode;
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Observer that records every notification as (owner label, name, value).
#[derive(Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<(String, String, Value)>>,
}

#[allow(dead_code)]
impl RecordingObserver {
    pub fn events(&self) -> Vec<(String, String, Value)> {
        self.events.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.events.borrow().len()
    }
}

impl ScopeObserver for RecordingObserver {
    fn notified(&self, owner: &dyn ScopeOwner, name: &str, value: &Value) {
        self.events
            .borrow_mut()
            .push((owner.label().into_owned(), name.to_string(), value.clone()));
    }
}

/// Root <- Mid <- Leaf, returned as (root, mid, leaf).
#[allow(dead_code)]
pub fn chain() -> (Rc<ScopeNode>, Rc<ScopeNode>, Rc<ScopeNode>) {
    let root = ScopeNode::root("Root");
    let mid = ScopeNode::child("Mid", &root);
    let leaf = ScopeNode::child("Leaf", &mid);
    (root, mid, leaf)
}

#[allow(dead_code)]
pub fn globals(entries: &[(&str, i64)]) -> Namespace {
    with_builtins(
        ScopeConfig::shared(),
        entries.iter().map(|(k, v)| (*k, *v)).collect(),
        standard_builtins(),
    )
}

#[allow(dead_code)]
struct Slot {
    label: String,
    parent: Option<usize>,
    attrs: HashMap<String, (Value, bool)>,
}

/// Owners stored by index. Every `parent()` call builds a new handle, so no
/// `Rc` outlives the call that produced it.
#[allow(dead_code)]
#[derive(Default)]
pub struct Arena {
    slots: RefCell<Vec<Slot>>,
}

#[allow(dead_code)]
impl Arena {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn add(self: &Rc<Self>, label: &str, parent: Option<&ArenaHandle>) -> ArenaHandle {
        let mut slots = self.slots.borrow_mut();
        slots.push(Slot {
            label: label.to_string(),
            parent: parent.map(|p| p.idx),
            attrs: HashMap::new(),
        });
        self.handle(slots.len() - 1)
    }

    fn handle(self: &Rc<Self>, idx: usize) -> ArenaHandle {
        ArenaHandle {
            arena: Rc::clone(self),
            idx,
        }
    }
}

#[allow(dead_code)]
pub struct ArenaHandle {
    arena: Rc<Arena>,
    idx: usize,
}

#[allow(dead_code)]
impl ArenaHandle {
    pub fn declare(&self, name: &str, value: impl Into<Value>) {
        self.insert(name, value.into(), true);
    }

    pub fn declare_readonly(&self, name: &str, value: impl Into<Value>) {
        self.insert(name, value.into(), false);
    }

    /// Current value of `name` on this slot only.
    pub fn attr(&self, name: &str) -> Option<Value> {
        self.arena.slots.borrow()[self.idx]
            .attrs
            .get(name)
            .map(|(value, _)| value.clone())
    }

    fn insert(&self, name: &str, value: Value, writable: bool) {
        self.arena.slots.borrow_mut()[self.idx]
            .attrs
            .insert(name.to_string(), (value, writable));
    }
}

impl ScopeOwner for ArenaHandle {
    fn probe_get(&self, name: &str) -> Option<Value> {
        self.attr(name)
    }

    fn probe_set(&self, name: &str, value: Value) -> bool {
        match self.arena.slots.borrow_mut()[self.idx].attrs.get_mut(name) {
            Some((slot, true)) => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    fn parent(&self) -> Option<OwnerRef> {
        let parent = self.arena.slots.borrow()[self.idx].parent?;
        Some(Rc::new(self.arena.handle(parent)) as OwnerRef)
    }

    fn label(&self) -> Cow<'_, str> {
        Cow::Owned(self.arena.slots.borrow()[self.idx].label.clone())
    }
}

/// Root <- Mid <- Leaf held in an arena, returned as (root, mid, leaf).
#[allow(dead_code)]
pub fn arena_chain() -> (ArenaHandle, ArenaHandle, ArenaHandle) {
    let arena = Arena::new();
    let root = arena.add("Root", None);
    let mid = arena.add("Mid", Some(&root));
    let leaf = arena.add("Leaf", Some(&mid));
    (root, mid, leaf)
}
