//! # Kake Migrations Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Descriptor → runner → chain flows
//!     ├── deploy_flow.rs
//!     └── plan.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p kake-tests
//! cargo test -p kake-tests integration::deploy_flow
//! ```

#![allow(dead_code)]

pub mod integration;
