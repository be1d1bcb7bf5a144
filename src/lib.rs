//! Scrollyviz renders a scroll-driven data story.
//!
//! As the reader moves between narrative steps, a single canvas switches between an opening image,
//! a donut chart, and a multi-series line chart, each fed from CSV resources. The public API is
//! story-oriented:
//!
//! - Load and validate a [`StoryConfig`]
//! - Create a [`Story`] over a [`DataSource`]
//! - Report active-step changes with [`Story::on_active`], advance the clock, and
//!   [`Story::render`] a [`Document`] to SVG or pixels
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easing and tweens.
pub mod animation;
/// Stateful chart drawers.
pub mod chart;
/// Story configuration.
pub mod config;
/// CSV resources and accessors.
pub mod data;
/// Label number formatting.
pub mod format;
mod foundation;
/// SVG and raster output.
pub mod render;
/// Data-to-visual scales.
pub mod scale;
/// Static render tree.
pub mod scene;
/// Geometry generators.
pub mod shape;
/// Scene dispatch and the shared canvas.
pub mod story;

pub use crate::foundation::color::{Color, HALO, TABLEAU10};
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Millis, Point, Rect, Vec2, ViewBox,
};
pub use crate::foundation::error::{ScrollyError, ScrollyResult};

pub use crate::chart::{MultiLineChart, PieChart};
pub use crate::config::StoryConfig;
pub use crate::data::{Accessors, DataSource, DirSource, MemorySource, Table};
pub use crate::render::{FrameRGBA, rasterize, save_png, to_svg};
pub use crate::scene::Document;
pub use crate::story::{
    DispatchReport, SceneData, SceneTicket, ScrollState, Story, Scene, VisMode,
    scrolled_sections,
};
