//! Cityscope Library
//!
//! This module exposes the application core for use in integration tests.

pub mod app;
pub mod cli;
pub mod data;
pub mod debounce;
pub mod fetch;
pub mod theme;
