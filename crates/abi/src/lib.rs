//! ABI bindings of the Orbit contracts involved in role management.

pub mod calls;
pub mod logs;

mod constants;
pub use constants::OwnerFunction;
