//! Side-effecting adapters: filesystem, git, and external CLIs.

pub mod config;
pub mod git;
pub mod github;
pub mod process;
pub mod scaffold;
pub mod vercel;
