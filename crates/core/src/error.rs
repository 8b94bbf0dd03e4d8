pub use dynscope_api::error::{Result, ScopeError};
