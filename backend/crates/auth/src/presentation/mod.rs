//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router assembly.

pub mod dto;
pub mod handlers;
pub mod router;
