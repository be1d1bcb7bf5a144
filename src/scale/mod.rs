//! Scales mapping data values onto visual channels.

/// Continuous numeric scale.
pub mod linear;
/// Categorical scale.
pub mod ordinal;
/// UTC time scale with calendar-aware ticks.
pub mod time;

pub use linear::LinearScale;
pub use ordinal::OrdinalScale;
pub use time::UtcScale;
