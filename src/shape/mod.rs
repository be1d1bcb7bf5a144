//! Geometry generators for chart marks.

/// Annular sector paths.
pub mod arc;
/// Polyline paths through data points.
pub mod line;
/// Angular layout of proportional values.
pub mod pie;

pub use arc::{ArcAngles, ArcGenerator};
pub use line::line_path;
pub use pie::{PieLayout, PieSlice};
