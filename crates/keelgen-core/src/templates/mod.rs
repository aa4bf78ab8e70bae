pub mod dir;
pub mod kind;
pub mod manager;
pub mod types;

pub use dir::*;
pub use kind::*;
pub use manager::*;
pub use types::*;
