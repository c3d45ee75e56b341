//! # chartlist common library
//!
//! Shared code for the chartlist service:
//! - Error and Result types
//! - Bootstrap configuration loading (ENV, `.env`, TOML)

pub mod config;
pub mod error;

pub use error::{Error, Result};
