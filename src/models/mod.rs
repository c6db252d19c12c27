//! Entity types persisted in the per-user store.

pub mod event;
pub mod travel;
pub mod user;

pub use event::*;
pub use travel::*;
pub use user::*;
