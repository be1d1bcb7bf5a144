use std::fmt::{self, Write as _};

use crate::{
    foundation::{
        core::Affine,
        error::{ScrollyError, ScrollyResult},
    },
    scene::node::{
        Document, Group, ImageNode, Length, Node, Paint, PathNode, Stroke, TextAnchor, TextNode,
        TextRun, TextSpan,
    },
};

/// Serialize `doc` as a standalone SVG document.
pub fn to_svg(doc: &Document) -> ScrollyResult<String> {
    let mut out = String::new();
    write_document(&mut out, doc).map_err(|e| ScrollyError::render(format!("write svg: {e}")))?;
    Ok(out)
}

fn write_document(out: &mut String, doc: &Document) -> fmt::Result {
    let vb = doc.view_box;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        doc.canvas.width,
        doc.canvas.height,
        num(vb.min_x),
        num(vb.min_y),
        num(vb.width),
        num(vb.height),
    )?;
    for child in &doc.children {
        write_node(out, child, 1)?;
    }
    out.push_str("</svg>\n");
    Ok(())
}

fn write_node(out: &mut String, node: &Node, depth: usize) -> fmt::Result {
    match node {
        Node::Group(g) => write_group(out, g, depth),
        Node::Path(p) => write_path(out, p, depth),
        Node::Text(t) => write_text(out, t, depth),
        Node::Image(i) => write_image(out, i, depth),
    }
}

fn write_group(out: &mut String, g: &Group, depth: usize) -> fmt::Result {
    indent(out, depth);
    out.push_str("<g");
    write_class(out, g.class.as_deref())?;
    write_transform(out, g.transform)?;
    if g.opacity != 1.0 {
        write!(out, r#" opacity="{}""#, num(g.opacity))?;
    }
    write_paint(out, "fill", g.fill)?;
    if let Some(font) = &g.font {
        write!(
            out,
            r#" font-family="{}" font-size="{}""#,
            escape(&font.family),
            num(font.size)
        )?;
    }
    if let Some(anchor) = g.text_anchor {
        write!(out, r#" text-anchor="{}""#, anchor_name(anchor))?;
    }

    if g.children.is_empty() {
        out.push_str("/>\n");
        return Ok(());
    }
    out.push_str(">\n");
    for child in &g.children {
        write_node(out, child, depth + 1)?;
    }
    indent(out, depth);
    out.push_str("</g>\n");
    Ok(())
}

fn write_path(out: &mut String, p: &PathNode, depth: usize) -> fmt::Result {
    indent(out, depth);
    out.push_str("<path");
    write_class(out, p.class.as_deref())?;
    write!(out, r#" d="{}""#, p.path.to_svg())?;
    write_paint(out, "fill", p.fill)?;
    write_stroke(out, p.stroke)?;
    out.push_str("/>\n");
    Ok(())
}

fn write_text(out: &mut String, t: &TextNode, depth: usize) -> fmt::Result {
    indent(out, depth);
    out.push_str("<text");
    write_class(out, t.class.as_deref())?;
    write_transform(out, t.transform)?;
    if t.position.x != 0.0 {
        write!(out, r#" x="{}""#, num(t.position.x))?;
    }
    if t.position.y != 0.0 {
        write!(out, r#" y="{}""#, num(t.position.y))?;
    }
    if let Some(dy) = t.dy {
        write!(out, r#" dy="{}""#, length(dy))?;
    }
    write_paint(out, "fill", t.fill)?;
    write_stroke(out, t.stroke)?;
    out.push('>');
    for run in &t.runs {
        match run {
            TextRun::Plain(s) => out.push_str(&escape(s)),
            TextRun::Span(span) => write_span(out, span)?,
        }
    }
    out.push_str("</text>\n");
    Ok(())
}

fn write_span(out: &mut String, s: &TextSpan) -> fmt::Result {
    out.push_str("<tspan");
    write_class(out, s.class.as_deref())?;
    if let Some(x) = s.x {
        write!(out, r#" x="{}""#, length(x))?;
    }
    if let Some(y) = s.y {
        write!(out, r#" y="{}""#, length(y))?;
    }
    if s.bold {
        out.push_str(r#" font-weight="bold""#);
    }
    if let Some(o) = s.fill_opacity {
        write!(out, r#" fill-opacity="{}""#, num(o))?;
    }
    write!(out, ">{}</tspan>", escape(&s.text))
}

fn write_image(out: &mut String, i: &ImageNode, depth: usize) -> fmt::Result {
    indent(out, depth);
    out.push_str("<image");
    write_class(out, i.class.as_deref())?;
    let href = escape(&i.href);
    writeln!(
        out,
        r#" href="{href}" xlink:href="{href}" x="{}" y="{}" width="{}" height="{}" opacity="{}"/>"#,
        num(i.rect.x0),
        num(i.rect.y0),
        num(i.rect.width()),
        num(i.rect.height()),
        num(i.opacity),
    )
}

fn write_class(out: &mut String, class: Option<&str>) -> fmt::Result {
    match class {
        Some(c) => write!(out, r#" class="{}""#, escape(c)),
        None => Ok(()),
    }
}

fn write_transform(out: &mut String, t: Affine) -> fmt::Result {
    let [a, b, c, d, e, f] = t.as_coeffs();
    if (a, b, c, d) == (1.0, 0.0, 0.0, 1.0) {
        if (e, f) == (0.0, 0.0) {
            return Ok(());
        }
        return write!(out, r#" transform="translate({},{})""#, num(e), num(f));
    }
    write!(
        out,
        r#" transform="matrix({} {} {} {} {} {})""#,
        num(a),
        num(b),
        num(c),
        num(d),
        num(e),
        num(f)
    )
}

fn write_paint(out: &mut String, attr: &str, paint: Paint) -> fmt::Result {
    match paint {
        Paint::Inherit => Ok(()),
        Paint::None => write!(out, r#" {attr}="none""#),
        Paint::CurrentColor => write!(out, r#" {attr}="currentColor""#),
        Paint::Solid(c) => {
            write!(out, r#" {attr}="{}""#, c.to_hex())?;
            if c.a != 255 {
                write!(out, r#" {attr}-opacity="{}""#, num(c.opacity()))?;
            }
            Ok(())
        }
    }
}

fn write_stroke(out: &mut String, stroke: Option<Stroke>) -> fmt::Result {
    let Some(s) = stroke else {
        return Ok(());
    };
    write_paint(out, "stroke", s.paint)?;
    if s.width != 1.0 {
        write!(out, r#" stroke-width="{}""#, num(s.width))?;
    }
    Ok(())
}

fn anchor_name(a: TextAnchor) -> &'static str {
    match a {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn length(l: Length) -> String {
    match l {
        Length::Px(v) => num(v),
        Length::Em(v) => format!("{}em", num(v)),
    }
}

/// Shortest decimal rendering with at most three fraction digits.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "NaN".to_owned();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{
        color::Color,
        core::{Canvas, Point, Vec2},
    };

    fn doc(children: Vec<Node>) -> Document {
        let canvas = Canvas {
            width: 100,
            height: 80,
        };
        Document {
            canvas,
            view_box: canvas.centered_view_box(),
            children,
        }
    }

    #[test]
    fn header_carries_size_and_view_box() {
        let svg = to_svg(&doc(Vec::new())).unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"width="100" height="80" viewBox="-50 -40 100 80""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn text_is_escaped_and_spans_keep_attributes() {
        let mut t = TextNode::plain(Point::new(1.5, 0.0), "a<b & \"c\"");
        t.runs.push(TextRun::Span(TextSpan {
            bold: true,
            y: Some(Length::Em(1.1)),
            ..TextSpan::plain(" K")
        }));
        let svg = to_svg(&doc(vec![Node::Text(t)])).unwrap();
        assert!(svg.contains(r#"<text x="1.5">a&lt;b &amp; &quot;c&quot;"#));
        assert!(svg.contains(r#"<tspan y="1.1em" font-weight="bold"> K</tspan>"#));
    }

    #[test]
    fn groups_write_transform_opacity_and_paint() {
        let g = Group {
            class: Some("pie-chart".to_owned()),
            transform: Affine::translate(Vec2::new(50.0, 50.0)),
            opacity: 0.0,
            fill: Paint::Solid(Color::rgb(0x4e, 0x79, 0xa7)),
            ..Group::default()
        };
        let svg = to_svg(&doc(vec![Node::Group(g)])).unwrap();
        assert!(svg.contains(
            r##"<g class="pie-chart" transform="translate(50,50)" opacity="0" fill="#4e79a7"/>"##
        ));
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(2.125), "2.125");
        assert_eq!(num(f64::NAN), "NaN");
    }
}
