//! Integration test suite for asset-digest
//!
//! End-to-end tests that run the compiled binary against temporary sites.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **digest**: The `digest` command and filter passthrough rules
//! - **render**: Rendering single templates and template errors
//! - **build**: Whole-site builds
//! - **config**: Config discovery, overrides and invalid configs

#[path = "../common/mod.rs"]
mod common;

mod build;
mod config;
mod digest;
mod render;
