//! Request validation in front of the store.

mod validation;
pub use validation::RequestValidator;
