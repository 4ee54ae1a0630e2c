//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted per hash, zeroized clear text)
//! - Cookie management
//! - One-time-passcode generation

pub mod cookie;
pub mod otp;
pub mod password;
