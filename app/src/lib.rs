//! Swasth Kadam Native Host Library
//!
//! File-backed storage, configuration and the command-line front end over
//! the shared domain crate. Exposed as a library for integration tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod file_store;
pub mod render;
pub mod state;
