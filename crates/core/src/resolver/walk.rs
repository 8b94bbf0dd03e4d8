//! Hierarchy walk shared by the resolver fallback tier and nonlocals.

use crate::config::ScopeConfig;
use crate::error::{Result, ScopeError};
use dynscope_api::{OwnerRef, ScopeObserver, ScopeOwner, Value};
use smol_str::SmolStr;

/// Whether a successful walk read is reported to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Notify {
    Enabled,
    Suppressed,
}

/// Visit `start` and then each ancestor until `visit` yields a result.
fn walk<T>(
    start: &dyn ScopeOwner,
    name: &str,
    config: &ScopeConfig,
    mut visit: impl FnMut(&dyn ScopeOwner) -> Option<T>,
) -> Result<Option<T>> {
    let mut probed = 0usize;
    let mut check_limit = || match config.walk_limit {
        Some(limit) if probed >= limit => Err(ScopeError::WalkLimitExceeded {
            name: SmolStr::new(name),
            limit,
        }),
        _ => {
            probed += 1;
            Ok(())
        }
    };

    check_limit()?;
    if let Some(found) = visit(start) {
        return Ok(Some(found));
    }

    let mut cursor = start.parent();
    while let Some(node) = cursor {
        check_limit()?;
        if let Some(found) = visit(&*node) {
            return Ok(Some(found));
        }
        cursor = node.parent();
    }
    Ok(None)
}

/// Read `name` from the nearest owner that has it.
pub(crate) fn load(
    start: &dyn ScopeOwner,
    name: &str,
    observer: Option<&dyn ScopeObserver>,
    notify: Notify,
    config: &ScopeConfig,
) -> Result<Option<Value>> {
    walk(start, name, config, |node| {
        let value = node.probe_get(name)?;
        tracing::trace!(owner = %node.label(), ident = name, "loaded from owner hierarchy");
        if notify == Notify::Enabled {
            if let Some(observer) = observer {
                observer.notified(node, name, &value);
            }
        }
        Some(value)
    })
}

/// Write `name` on the nearest owner that accepts it. Returns `false` when
/// every owner rejected the write.
pub(crate) fn store(
    start: &dyn ScopeOwner,
    name: &str,
    value: &Value,
    config: &ScopeConfig,
) -> Result<bool> {
    let stored = walk(start, name, config, |node| {
        node.probe_set(name, value.clone()).then_some(())
    })?;
    Ok(stored.is_some())
}

/// The owner `hops` parent links above `start`, for `hops >= 1`.
pub(crate) fn ancestor(start: &dyn ScopeOwner, hops: usize) -> Option<OwnerRef> {
    let mut cursor = start.parent();
    for _ in 1..hops {
        cursor = cursor?.parent();
    }
    cursor
}
