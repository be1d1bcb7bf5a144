//! Core value types shared across the crate.

/// Colors, hex parsing, and built-in categorical schemes.
pub mod color;
/// Geometry re-exports, canvas sizing, view boxes, and the story clock.
pub mod core;
/// Crate error type.
pub mod error;
