//! Infrastructure Layer

pub mod memory;
pub mod postgres;
