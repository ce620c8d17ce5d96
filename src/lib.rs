//! Equipment fault prediction dashboard.
//!
//! Library target behind the `equipred` binary, exposed so integration tests
//! can drive the pages and the router directly.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod pages;
pub mod transform;
pub mod web;
