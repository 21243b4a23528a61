//! Session domain entities.

pub mod model;
pub mod row;

pub use model::Session;
pub use row::SessionRow;
