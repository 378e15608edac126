//! usradm Library
//!
//! This crate provides a thin administrative layer for OS-level user
//! accounts, wrapping the system `id`, `useradd`, and `userdel` utilities
//! behind a validating, auditing manager.

pub mod audit;
pub mod config;
pub mod error;
pub mod executor;
pub mod users;
pub mod validation;
