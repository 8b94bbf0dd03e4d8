mod node;

pub use dynscope_api::{OwnerRef, ScopeOwner};
pub use node::ScopeNode;
