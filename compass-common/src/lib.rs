//! # Political Compass Common Library
//!
//! Shared code for the political compass services including:
//! - Error type used during configuration and startup
//! - TOML bootstrap configuration and root folder resolution
//! - Wire event types for the person pipeline (progress, error, success)
//! - Server-Sent Events helpers

pub mod config;
pub mod error;
pub mod events;
pub mod sse;

pub use error::{Error, Result};
