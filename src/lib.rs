//! adboard library
//!
//! Exposes the data, cache and configuration layers for use in integration tests.

pub mod cache;
pub mod campaigns;
pub mod cli;
pub mod config;
pub mod data;
