//! # relay-core
//!
//! Core types, traits, configuration, and error handling for the
//! customer-support relay.

pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod traits;
