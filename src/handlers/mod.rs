//! HTTP handlers for the riddle resource.

pub mod riddle;
pub use riddle::*;
