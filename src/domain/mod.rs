//! # Domain Layer
//!
//! Survey entities, the voted-survey projection and the error taxonomy.
//! This layer knows nothing about the store that holds the entities.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
