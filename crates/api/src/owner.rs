use crate::models::Value;
use std::borrow::Cow;
use std::rc::Rc;

/// Strong handle to an owner, held only for the duration of a walk step.
pub type OwnerRef = Rc<dyn ScopeOwner>;

/// The capability every node of an owner hierarchy exposes to scope resolution.
///
/// `parent()` may hand out a shared handle (an upgraded `Weak`) or build a new
/// one on each call (an arena index). Resolution never keeps it past a walk step.
pub trait ScopeOwner {
    /// Read a dynamic attribute. `None` means the attribute is simply absent.
    fn probe_get(&self, name: &str) -> Option<Value>;

    /// Write a dynamic attribute. Returns `false` when this node rejects the write.
    fn probe_set(&self, name: &str, value: Value) -> bool;

    /// The next node toward the root, if any.
    fn parent(&self) -> Option<OwnerRef>;

    /// Human readable name used in diagnostics.
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed("<owner>")
    }
}
