//! Shift analysis CLI library.
//!
//! This crate provides the CLI interface for shift analysis.

mod cli;
pub mod commands;
mod config;

pub use cli::Cli;
pub use config::Config;
