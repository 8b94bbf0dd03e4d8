use crate::models::Value;
use crate::owner::ScopeOwner;

/// Notified when a name is loaded by walking the owner hierarchy.
///
/// Fired once per successful walk read, with the node where the name was
/// found. Never fired for local tier hits, membership tests or writes.
pub trait ScopeObserver {
    fn notified(&self, owner: &dyn ScopeOwner, name: &str, value: &Value);
}
