use super::nonlocals::Nonlocals;
use super::walk::{self, Notify};
use super::{Resolution, Tier};
use crate::config::ScopeConfig;
use crate::error::{Result, ScopeError};
use dynscope_api::{Namespace, ScopeObserver, ScopeOwner, Value};
use smol_str::SmolStr;

/// The scope an expression evaluates names against.
///
/// Lookup order is overrides, identifiers, globals, builtins and finally the
/// owner hierarchy. Everything is borrowed, so a scope lives no longer than the
/// evaluation that built it.
pub struct DynamicScope<'a> {
    owner: &'a dyn ScopeOwner,
    identifiers: &'a Namespace,
    overrides: &'a mut Namespace,
    globals: &'a Namespace,
    observer: Option<&'a dyn ScopeObserver>,
    config: &'a ScopeConfig,
}

impl<'a> DynamicScope<'a> {
    pub fn new(
        owner: &'a dyn ScopeOwner,
        identifiers: &'a Namespace,
        overrides: &'a mut Namespace,
        globals: &'a Namespace,
        observer: Option<&'a dyn ScopeObserver>,
    ) -> Self {
        Self {
            owner,
            identifiers,
            overrides,
            globals,
            observer,
            config: ScopeConfig::shared(),
        }
    }

    pub fn with_config(mut self, config: &'a ScopeConfig) -> Self {
        self.config = config;
        self
    }

    /// Look up `name`, notifying the observer only for hierarchy hits.
    pub fn resolve(&self, name: &str) -> Result<Value> {
        self.resolve_tier(name).map(|res| res.value)
    }

    /// Like [`resolve`](Self::resolve), also reporting which tier matched.
    pub fn resolve_tier(&self, name: &str) -> Result<Resolution> {
        self.lookup(name, Notify::Enabled)
    }

    /// Bind `name` in the overrides tier. Other tiers are never written, so
    /// this may shadow an existing identifier or global.
    pub fn assign(&mut self, name: impl Into<SmolStr>, value: impl Into<Value>) {
        self.overrides.insert(name, value);
    }

    /// Whether `name` resolves anywhere. Never notifies the observer.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name, Notify::Suppressed).is_ok()
    }

    /// Membership test for arbitrary keys; only string keys can be in scope.
    pub fn contains_key(&self, key: &Value) -> bool {
        key.as_str().is_some_and(|name| self.contains(name))
    }

    /// Accessor over the same owner and observer, for the `nonlocals` name.
    pub fn nonlocals(&self) -> Nonlocals<'a> {
        Nonlocals::new(self.owner, self.observer).with_config(self.config)
    }

    fn lookup(&self, name: &str, notify: Notify) -> Result<Resolution> {
        let tiers: [(Tier, &Namespace); 3] = [
            (Tier::Overrides, &*self.overrides),
            (Tier::Identifiers, self.identifiers),
            (Tier::Globals, self.globals),
        ];
        for (tier, namespace) in tiers {
            if let Some(value) = namespace.get(name) {
                return Ok(self.hit(name, value.clone(), tier));
            }
        }

        if let Some(value) = self.builtins()?.get(name) {
            return Ok(self.hit(name, value.clone(), Tier::Builtins));
        }

        match walk::load(self.owner, name, self.observer, notify, self.config)? {
            Some(value) => Ok(Resolution {
                value,
                tier: Tier::Hierarchy,
            }),
            None => Err(ScopeError::NameNotFound(SmolStr::new(name))),
        }
    }

    fn hit(&self, name: &str, value: Value, tier: Tier) -> Resolution {
        tracing::trace!(ident = name, %tier, "resolved from local tier");
        Resolution { value, tier }
    }

    fn builtins(&self) -> Result<&Namespace> {
        let key = &self.config.builtins_key;
        self.globals
            .get(key)
            .and_then(Value::as_namespace)
            .ok_or_else(|| ScopeError::MissingBuiltins(key.clone()))
    }
}
