//! Stable exit codes for quickstart CLI commands.

/// Command succeeded and every enabled step completed.
pub const OK: i32 = 0;
/// Command failed due to invalid config/manifest or another hard error.
pub const INVALID: i32 = 1;
/// `quickstart verify` found missing or modified generated files.
pub const DRIFT: i32 = 2;
/// `quickstart run` finished but an enabled optional step failed or its CLI was missing.
pub const PARTIAL: i32 = 3;
