//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations:
//! - Token generation, digests and constant-time comparison
//! - Password hashing (Argon2id)
//! - Credential header extraction

pub mod crypto;
pub mod header;
pub mod password;
