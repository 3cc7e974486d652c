//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Password hashing (Argon2id, tunable work factor)
//! - Bearer credential parsing

pub mod bearer;
pub mod password;
