//! Name resolution over the local tiers and the owner hierarchy.

mod dynamic;
mod nonlocals;
mod walk;

pub use dynamic::DynamicScope;
pub use nonlocals::Nonlocals;

use dynscope_api::Value;
use std::fmt;

/// Source that produced a resolved value, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Overrides,
    Identifiers,
    Globals,
    Builtins,
    Hierarchy,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Overrides => "overrides",
            Tier::Identifiers => "identifiers",
            Tier::Globals => "globals",
            Tier::Builtins => "builtins",
            Tier::Hierarchy => "hierarchy",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Value,
    pub tier: Tier,
}
