//! # StackSense - Application Library
//!
//! HTTP API, CLI and configuration layer around `stacksense-core`.
//! Exposed as a library so integration tests can build the router directly.

pub mod api;
pub mod cli;
pub mod config;
