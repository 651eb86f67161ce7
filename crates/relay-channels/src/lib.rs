//! # relay-channels
//!
//! Messaging platform integrations. Telegram is the only production
//! channel; everything behind the `Channel` trait from `relay-core`.

pub mod telegram;
