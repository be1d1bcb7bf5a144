//! Static render tree produced by sampling chart state at a clock time.

/// Render tree node types.
pub mod node;

pub use node::{
    Document, Font, Group, ImageNode, Length, Node, Paint, PathNode, Stroke, TextAnchor,
    TextNode, TextRun, TextSpan,
};
