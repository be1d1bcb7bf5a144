use chrono::{DateTime, Utc};

use crate::{
    foundation::core::{Affine, BezPath, Point, Vec2},
    scale::time::UtcScale,
    scene::node::{Font, Group, Length, Node, Paint, PathNode, Stroke, TextAnchor, TextNode},
};

/// Half-pixel shift keeping one-unit strokes crisp.
const OFFSET: f64 = 0.5;
const TICK_COUNT: usize = 10;

/// One rendered tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Tick instant.
    pub at: DateTime<Utc>,
    /// Horizontal position in the axis' coordinate space.
    pub x: f64,
    /// Label.
    pub label: String,
}

/// Horizontal axis with ticks and labels hanging below the line.
///
/// The axis snapshots its scale on [`BottomAxis::update`]; later scale changes are not seen until
/// the next update.
#[derive(Clone, Debug, PartialEq)]
pub struct BottomAxis {
    /// Length of tick marks.
    pub tick_size_inner: f64,
    /// Length of the domain line's end caps.
    pub tick_size_outer: f64,
    /// Gap between tick mark and label.
    pub tick_padding: f64,
    range: [f64; 2],
    ticks: Vec<Tick>,
}

impl Default for BottomAxis {
    fn default() -> Self {
        Self {
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            range: [0.0, 1.0],
            ticks: Vec::new(),
        }
    }
}

impl BottomAxis {
    /// Recompute ticks from `scale`.
    pub fn update(&mut self, scale: &UtcScale) {
        self.range = scale.range();
        self.ticks = scale
            .ticks(TICK_COUNT)
            .into_iter()
            .map(|at| Tick {
                x: scale.map(&at),
                label: UtcScale::tick_format(&at),
                at,
            })
            .collect();
    }

    /// Current ticks.
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Domain line plus one group per tick, placed by `transform`.
    pub fn render(&self, transform: Affine, font_size: f64) -> Group {
        let [r0, r1] = self.range;
        let outer = self.tick_size_outer;

        let mut domain = BezPath::new();
        domain.move_to(Point::new(r0 + OFFSET, outer));
        domain.line_to(Point::new(r0 + OFFSET, OFFSET));
        domain.line_to(Point::new(r1 + OFFSET, OFFSET));
        domain.line_to(Point::new(r1 + OFFSET, outer));

        let current = Stroke {
            paint: Paint::CurrentColor,
            width: 1.0,
        };

        let mut group = Group {
            class: Some("axis".to_owned()),
            transform,
            fill: Paint::None,
            font: Some(Font {
                family: "sans-serif".to_owned(),
                size: font_size,
            }),
            text_anchor: Some(TextAnchor::Middle),
            ..Group::default()
        };
        group.children.push(Node::Path(PathNode {
            class: Some("domain".to_owned()),
            path: domain,
            fill: Paint::Inherit,
            stroke: Some(current),
        }));

        for tick in &self.ticks {
            let mut mark = BezPath::new();
            mark.move_to(Point::ORIGIN);
            mark.line_to(Point::new(0.0, self.tick_size_inner));

            let label = TextNode {
                position: Point::new(0.0, self.tick_size_inner.max(0.0) + self.tick_padding),
                dy: Some(Length::Em(0.71)),
                fill: Paint::CurrentColor,
                ..TextNode::plain(Point::ORIGIN, tick.label.clone())
            };

            group.children.push(Node::Group(Group {
                class: Some("tick".to_owned()),
                transform: Affine::translate(Vec2::new(tick.x + OFFSET, 0.0)),
                children: vec![
                    Node::Path(PathNode {
                        class: None,
                        path: mark,
                        fill: Paint::Inherit,
                        stroke: Some(current),
                    }),
                    Node::Text(label),
                ],
                ..Group::default()
            }));
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn ticks_follow_the_scale() {
        let mut scale = UtcScale::default();
        scale.set_domain([ymd(2013), ymd(2020)]).set_range([50.0, 890.0]);
        let mut axis = BottomAxis::default();
        axis.update(&scale);

        let ticks = axis.ticks();
        assert_eq!(ticks.len(), 8);
        assert_eq!(ticks[0].label, "2013");
        assert_eq!(ticks[0].x, 50.0);
        assert_eq!(ticks[7].x, 890.0);
    }

    #[test]
    fn render_emits_domain_and_one_group_per_tick() {
        let mut scale = UtcScale::default();
        scale.set_domain([ymd(2013), ymd(2020)]).set_range([50.0, 890.0]);
        let mut axis = BottomAxis::default();
        axis.update(&scale);

        let g = axis.render(Affine::IDENTITY, 14.0);
        assert_eq!(g.children.len(), 1 + 8);
        assert_eq!(g.font.as_ref().map(|f| f.size), Some(14.0));
        let Node::Group(first) = &g.children[1] else {
            panic!("tick group expected");
        };
        assert_eq!(first.transform, Affine::translate(Vec2::new(50.5, 0.0)));
    }
}
