use super::walk::{self, Notify};
use crate::config::ScopeConfig;
use crate::error::{Result, ScopeError};
use dynscope_api::{ScopeObserver, ScopeOwner, Value};
use smol_str::SmolStr;
use std::fmt;

/// Where a nonlocals accessor starts its walk: `hops` parent links above the
/// owner of the executing expression. Ancestors are re-walked on every
/// operation, so owners that hand out a fresh handle from `parent()` work the
/// same as owners that share one. A chain that has since shrunk behaves as
/// exhausted.
#[derive(Clone, Copy)]
struct Anchor<'a> {
    base: &'a dyn ScopeOwner,
    hops: usize,
}

impl Anchor<'_> {
    fn with_node<T>(&self, f: impl FnOnce(&dyn ScopeOwner) -> T) -> Option<T> {
        if self.hops == 0 {
            return Some(f(self.base));
        }
        walk::ancestor(self.base, self.hops).map(|owner| f(&*owner))
    }
}

/// Userland dynamic scoping, exposed to expressions as `nonlocals`.
///
/// Reads and writes go straight to the owner hierarchy and skip the local
/// tiers. `at_level(n)` re-anchors the accessor `n` parents up.
#[derive(Clone)]
pub struct Nonlocals<'a> {
    anchor: Anchor<'a>,
    observer: Option<&'a dyn ScopeObserver>,
    config: &'a ScopeConfig,
}

impl<'a> Nonlocals<'a> {
    pub fn new(owner: &'a dyn ScopeOwner, observer: Option<&'a dyn ScopeObserver>) -> Self {
        Self {
            anchor: Anchor {
                base: owner,
                hops: 0,
            },
            observer,
            config: ScopeConfig::shared(),
        }
    }

    pub fn with_config(mut self, config: &'a ScopeConfig) -> Self {
        self.config = config;
        self
    }

    /// A new accessor anchored `level` parents above this one.
    pub fn at_level(&self, level: i64) -> Result<Nonlocals<'a>> {
        if level < 0 {
            return Err(invalid_level(level, "the level must be an integer >= 0"));
        }
        let hops = usize::try_from(level)
            .ok()
            .and_then(|extra| self.anchor.hops.checked_add(extra))
            .ok_or_else(|| invalid_level(level, "the scope level is out of range"))?;
        let anchor = Anchor {
            base: self.anchor.base,
            hops,
        };
        if level > 0 && anchor.with_node(|_| ()).is_none() {
            tracing::debug!(level, anchor = %self.anchor_label(), "nonlocal level out of range");
            return Err(invalid_level(level, "the scope level is out of range"));
        }
        Ok(self.reanchor(anchor))
    }

    /// [`at_level`](Self::at_level) for a level computed by an expression.
    pub fn at_level_value(&self, level: &Value) -> Result<Nonlocals<'a>> {
        match level {
            Value::Int(level) => self.at_level(*level),
            other => Err(invalid_level(other, "the level must be an integer >= 0")),
        }
    }

    /// Read `name` from the nearest owner at or above the anchor.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.load(name, Notify::Enabled)?
            .ok_or_else(|| ScopeError::NameNotFound(SmolStr::new(name)))
    }

    /// Write `name` on the nearest owner at or above the anchor that accepts it.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let stored = self
            .anchor
            .with_node(|node| walk::store(node, name, &value, self.config))
            .unwrap_or(Ok(false))?;
        if stored {
            Ok(())
        } else {
            tracing::debug!(ident = name, anchor = %self.anchor_label(), "no owner accepted nonlocal write");
            Err(ScopeError::NameNotFound(SmolStr::new(name)))
        }
    }

    /// Whether `name` is reachable. Never notifies the observer.
    pub fn contains(&self, name: &str) -> bool {
        matches!(self.load(name, Notify::Suppressed), Ok(Some(_)))
    }

    /// Membership test for arbitrary keys; only string keys can be present.
    pub fn contains_key(&self, key: &Value) -> bool {
        key.as_str().is_some_and(|name| self.contains(name))
    }

    /// Attribute-style read: a missing name is reported as a missing attribute.
    pub fn get_attr(&self, name: &str) -> Result<Value> {
        self.get(name).map_err(|err| self.attribute_error(err, name))
    }

    /// Attribute-style write: a rejected write is reported as a missing attribute.
    pub fn set_attr(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.set(name, value)
            .map_err(|err| self.attribute_error(err, name))
    }

    fn load(&self, name: &str, notify: Notify) -> Result<Option<Value>> {
        self.anchor
            .with_node(|node| walk::load(node, name, self.observer, notify, self.config))
            .unwrap_or(Ok(None))
    }

    fn reanchor(&self, anchor: Anchor<'a>) -> Nonlocals<'a> {
        Nonlocals {
            anchor,
            observer: self.observer,
            config: self.config,
        }
    }

    fn attribute_error(&self, err: ScopeError, name: &str) -> ScopeError {
        match err {
            ScopeError::NameNotFound(_) => ScopeError::NoAttribute {
                scope: self.to_string(),
                name: SmolStr::new(name),
            },
            other => other,
        }
    }

    fn anchor_label(&self) -> String {
        self.anchor
            .with_node(|node| node.label().into_owned())
            .unwrap_or_else(|| "<detached>".to_string())
    }
}

fn invalid_level(level: impl fmt::Display, reason: &'static str) -> ScopeError {
    ScopeError::InvalidLevel {
        level: level.to_string(),
        reason,
    }
}

impl fmt::Display for Nonlocals<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonlocals[{}]", self.anchor_label())
    }
}

impl fmt::Debug for Nonlocals<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nonlocals")
            .field("anchor", &self.anchor_label())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}
