//! Pure planning logic: no I/O, deterministic given project settings.

pub mod manifest;
pub mod templates;
