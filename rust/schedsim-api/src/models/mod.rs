//! Boundary models
//!
//! Request and response shapes for the REST surface, plus the unified API
//! error type.

pub mod errors;
pub mod requests;
pub mod responses;
