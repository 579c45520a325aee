//! Safe SQL builder: identifiers from config or whitelisted properties only, values as parameters.

mod builder;
pub use builder::*;
