//! Shared helpers for the application shell

pub mod logging;
