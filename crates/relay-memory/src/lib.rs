//! # relay-memory
//!
//! SQLite persistence for the relay: per-conversation chat history, the
//! customer registry, and taught knowledge entries.

mod store;

pub use store::{Customer, Store};
