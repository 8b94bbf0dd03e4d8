pub mod config;
pub mod error;
pub mod globals;
pub mod logging;
pub mod owner;
pub mod resolver;

pub use config::ScopeConfig;
pub use error::{Result, ScopeError};
pub use owner::ScopeNode;
pub use resolver::{DynamicScope, Nonlocals, Resolution, Tier};
