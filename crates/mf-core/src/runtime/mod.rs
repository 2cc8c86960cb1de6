//! Node.js toolchain detection and npm invocation
//!
//! This module provides:
//! - Advisory Node.js / npm detection
//! - Streaming `npm install` and `npm run dev`

pub mod check;
pub mod npm;

pub use check::{check_node, check_npm, check_runtimes, missing_hints, RuntimeInfo};
