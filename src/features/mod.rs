//! # Features
//!
//! Feature modules. Each feature owns its handlers and supporting types.

pub mod macros;
