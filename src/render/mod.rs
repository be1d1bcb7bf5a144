//! Output backends for a rendered [`crate::scene::Document`].

/// Rasterization through `resvg` and PNG encoding.
pub mod raster;
/// SVG text serialization.
pub mod svg;

pub use raster::{FrameRGBA, rasterize, save_png};
pub use svg::to_svg;
