use crate::foundation::{
    color::Color,
    core::{Affine, BezPath, Canvas, Point, Rect, ViewBox},
};

/// A fully resolved frame: every animated property already sampled.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// Output size.
    pub canvas: Canvas,
    /// Visible coordinate window.
    pub view_box: ViewBox,
    /// Top-level nodes, back to front.
    pub children: Vec<Node>,
}

/// One element of the render tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Container with shared transform, opacity, and text defaults.
    Group(Group),
    /// Filled and/or stroked outline.
    Path(PathNode),
    /// Text, optionally split into styled spans.
    Text(TextNode),
    /// Referenced bitmap.
    Image(ImageNode),
}

/// Fill or stroke paint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Paint {
    /// Take the parent's paint.
    #[default]
    Inherit,
    /// Paint nothing.
    None,
    /// Solid color.
    Solid(Color),
    /// The inherited text color.
    CurrentColor,
}

/// Outline stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke paint.
    pub paint: Paint,
    /// Stroke width.
    pub width: f64,
}

/// Length in user units or font-relative units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// User-space units.
    Px(f64),
    /// Multiples of the font size.
    Em(f64),
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centred on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// Inheritable font settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// CSS font-family list.
    pub family: String,
    /// Size in user units.
    pub size: f64,
}

/// Container node.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    /// Identifying class.
    pub class: Option<String>,
    /// Transform applied to children.
    pub transform: Affine,
    /// Group opacity.
    pub opacity: f64,
    /// Fill inherited by children.
    pub fill: Paint,
    /// Font inherited by children.
    pub font: Option<Font>,
    /// Alignment inherited by child text.
    pub text_anchor: Option<TextAnchor>,
    /// Children, back to front.
    pub children: Vec<Node>,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            class: None,
            transform: Affine::IDENTITY,
            opacity: 1.0,
            fill: Paint::Inherit,
            font: None,
            text_anchor: None,
            children: Vec::new(),
        }
    }
}

impl Group {
    /// Empty group with a class.
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }
}

/// Path node.
#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    /// Identifying class.
    pub class: Option<String>,
    /// Outline.
    pub path: BezPath,
    /// Interior paint.
    pub fill: Paint,
    /// Outline stroke.
    pub stroke: Option<Stroke>,
}

/// A styled fragment inside a [`TextNode`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpan {
    /// Identifying class.
    pub class: Option<String>,
    /// Content.
    pub text: String,
    /// Absolute x position.
    pub x: Option<Length>,
    /// Absolute y position.
    pub y: Option<Length>,
    /// Bold weight.
    pub bold: bool,
    /// Fill opacity override.
    pub fill_opacity: Option<f64>,
}

impl TextSpan {
    /// Unpositioned span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            class: None,
            text: text.into(),
            x: None,
            y: None,
            bold: false,
            fill_opacity: None,
        }
    }
}

/// Inline content of a text node.
#[derive(Clone, Debug, PartialEq)]
pub enum TextRun {
    /// Bare characters.
    Plain(String),
    /// Styled fragment.
    Span(TextSpan),
}

/// Text node.
#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    /// Identifying class.
    pub class: Option<String>,
    /// Transform of the text's coordinate system.
    pub transform: Affine,
    /// Anchor point.
    pub position: Point,
    /// Baseline shift.
    pub dy: Option<Length>,
    /// Glyph fill.
    pub fill: Paint,
    /// Glyph outline.
    pub stroke: Option<Stroke>,
    /// Content.
    pub runs: Vec<TextRun>,
}

impl TextNode {
    /// Text at the origin with no content.
    pub fn new() -> Self {
        Self {
            class: None,
            transform: Affine::IDENTITY,
            position: Point::ORIGIN,
            dy: None,
            fill: Paint::Inherit,
            stroke: None,
            runs: Vec::new(),
        }
    }

    /// Plain text at `position`.
    pub fn plain(position: Point, text: impl Into<String>) -> Self {
        Self {
            position,
            runs: vec![TextRun::Plain(text.into())],
            ..Self::new()
        }
    }

    /// Concatenated characters of every run.
    pub fn content(&self) -> String {
        self.runs
            .iter()
            .map(|r| match r {
                TextRun::Plain(s) => s.as_str(),
                TextRun::Span(s) => s.text.as_str(),
            })
            .collect()
    }

    /// This label preceded by a copy with no fill and a thick `halo` outline, so the label stays
    /// legible over any background.
    pub fn with_halo(self, halo: Stroke) -> [Node; 2] {
        let under = TextNode {
            fill: Paint::None,
            stroke: Some(halo),
            ..self.clone()
        };
        [Node::Text(under), Node::Text(self)]
    }
}

impl Default for TextNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Bitmap node.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageNode {
    /// Identifying class.
    pub class: Option<String>,
    /// Resource reference, relative to the resources directory.
    pub href: String,
    /// Placement.
    pub rect: Rect,
    /// Opacity.
    pub opacity: f64,
}

impl Node {
    /// Visit this node and its descendants depth-first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        if let Node::Group(g) = self {
            for c in &g.children {
                c.walk(f);
            }
        }
    }

    /// Class of this node, if any.
    pub fn class(&self) -> Option<&str> {
        match self {
            Node::Group(g) => g.class.as_deref(),
            Node::Path(p) => p.class.as_deref(),
            Node::Text(t) => t.class.as_deref(),
            Node::Image(i) => i.class.as_deref(),
        }
    }
}

impl Document {
    /// First top-level-or-nested node carrying `class`.
    pub fn find_class(&self, class: &str) -> Option<&Node> {
        let mut found = None;
        for c in &self.children {
            c.walk(&mut |n| {
                if found.is_none() && n.class() == Some(class) {
                    found = Some(n);
                }
            });
        }
        found
    }
}
