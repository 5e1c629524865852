//! Common types used across the application.

pub mod date_format;
pub mod id;


pub use date_format::DateFormat;
pub use id::*;
