//! Threadline - conversation synchronization core for a messaging drawer
//!
//! This library exposes modules for use by the shell binary and integration tests.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod drawer;
pub mod error;
pub mod filter;
pub mod input;
pub mod logging;
pub mod models;
pub mod store;
pub mod traits;
