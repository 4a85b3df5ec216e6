//! Core framework-level components
//!
//! - `error`: Structured error handling shared by every text component

pub mod error;

pub use error::{FrontendError, Result, TextOperation};
