//! Stateful chart drawers with enter/update/exit transitions.

/// Bottom time axis.
pub mod axis;
/// Multi-series line chart.
pub mod multiline;
/// Donut chart with percent readout.
pub mod pie;

pub use axis::BottomAxis;
pub use multiline::{Margin, MultiLineChart};
pub use pie::PieChart;
