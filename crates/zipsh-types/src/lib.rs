//! Foundation types for zipsh.
//!
//! This crate contains the types shared by all zipsh crates: the error
//! taxonomy and the shell configuration record.

pub mod config;
pub mod error;
