//! Infrastructure Layer
//!
//! Concrete repository implementations.

pub mod postgres;
