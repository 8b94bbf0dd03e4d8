pub mod error;
pub mod models;
pub mod observer;
pub mod owner;

// Re-export commonly used types
pub use error::{Result, ScopeError};
pub use models::*;
pub use observer::ScopeObserver;
pub use owner::{OwnerRef, ScopeOwner};
