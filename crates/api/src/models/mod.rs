pub mod namespace;
pub mod value;

pub use namespace::*;
pub use value::*;
