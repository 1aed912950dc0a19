//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) and password policy enforcement
//! - Cookie management
//! - Transactional email dispatch via an external provider

pub mod cookie;
pub mod mailer;
pub mod password;
