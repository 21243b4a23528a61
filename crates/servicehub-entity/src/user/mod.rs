//! User domain entities.

pub mod model;
pub mod role;
pub mod row;

pub use model::{NewUser, Professional, User};
pub use role::UserRole;
pub use row::UserRow;
