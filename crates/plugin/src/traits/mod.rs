//! Plugin traits and interfaces

pub mod capability;
pub mod declaration;
pub mod lifecycle;
pub mod store;


// Re-export main types for convenience
pub use capability::*;
pub use declaration::*;
pub use lifecycle::*;
pub use store::*;
