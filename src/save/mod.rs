//! Save file persistence.

pub mod manager;
pub mod schema;

pub use manager::*;
pub use schema::*;
