//! One-click project scaffolding and deployment.
//!
//! This crate implements a setup pipeline that writes a complete web project
//! to disk, bootstraps version control, and hands the result to external
//! publishing CLIs (`gh`, `vercel`). The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (the file manifest, template
//!   rendering, name validation). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem writes, git, external
//!   CLI invocation). Isolated behind small seams to enable scripted fakes
//!   in tests.
//!
//! Orchestration modules ([`setup`], [`verify`]) coordinate core logic with
//! I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod report;
pub mod setup;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod verify;
