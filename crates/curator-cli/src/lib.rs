//! CLI library components for the curator device import.

pub mod cli;
pub mod logging;
