//! Easing curves and time-based property tweens.

/// Easing functions.
pub mod ease;
/// Interpolated properties driven by the story clock.
pub mod tween;
