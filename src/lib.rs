pub mod error;
pub mod factory;
pub mod models;
pub mod validation;

pub use error::{PersonError, Result};
pub use factory::PersonFactory;
pub use models::Person;
