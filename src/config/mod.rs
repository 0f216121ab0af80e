//! Configuration management.
//!
//! Re-exports all configuration types from the `tutor-render-config` crate.
//! Configuration types, defaults, and the tutoring catalog are defined there.

pub use tutor_render_config::*;
