use chrono::{DateTime, Utc};

use crate::{
    animation::{
        ease::Ease,
        tween::{Timing, Tween},
    },
    chart::axis::BottomAxis,
    data::records::Series,
    foundation::{
        color::{Color, HALO},
        core::{Affine, BezPath, Millis, Point, Vec2},
        error::{ScrollyError, ScrollyResult},
    },
    format::plain_number,
    scale::{LinearScale, OrdinalScale, UtcScale},
    scene::node::{
        Font, Group, Length, Node, Paint, PathNode, Stroke, TextAnchor, TextNode, TextRun,
        TextSpan,
    },
    shape::line_path,
};

const EXIT_MS: u64 = 250;
const EXIT_OPACITY: f64 = 0.1;
const AXIS_FONT_SIZE: f64 = 14.0;
const LABEL_HALO: Stroke = Stroke {
    paint: Paint::Solid(HALO),
    width: 6.0,
};

/// Space between the canvas edge and the plotting area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 30.0,
            bottom: 80.0,
            left: 50.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct PointLabel {
    name: usize,
    position: Point,
    text: String,
    suffix: Option<String>,
}

#[derive(Clone, Debug)]
struct LineGroup {
    key: String,
    path: BezPath,
    stroke: Color,
    labels: Vec<PointLabel>,
}

#[derive(Clone, Debug)]
struct ExitingGroup {
    group: LineGroup,
    fade: Tween<f64>,
}

/// Time-series chart with one stroked line and one value label per point for each series.
///
/// Series are matched across draws by key. A series missing from a draw fades to near
/// transparency and is then dropped.
#[derive(Clone, Debug)]
pub struct MultiLineChart {
    class: String,
    margin: Margin,
    width: f64,
    height: f64,
    x: UtcScale,
    y: LinearScale,
    colors: OrdinalScale,
    scheme: Vec<Color>,
    axis: BottomAxis,
    groups: Vec<LineGroup>,
    exiting: Vec<ExitingGroup>,
    visible: bool,
}

impl MultiLineChart {
    /// Hidden, empty chart filling a `width` x `height` canvas.
    pub fn new(class: impl Into<String>, width: f64, height: f64, scheme: Vec<Color>) -> Self {
        let margin = Margin::default();
        Self {
            class: class.into(),
            width: width - margin.left - margin.right,
            height: height - margin.top - margin.bottom,
            margin,
            x: UtcScale::default(),
            y: LinearScale::default(),
            colors: OrdinalScale::new(),
            scheme,
            axis: BottomAxis::default(),
            groups: Vec::new(),
            exiting: Vec::new(),
            visible: false,
        }
    }

    /// Rescale to `dates` and `series`, then join one line group per series.
    ///
    /// Fails with a data error when `dates` is empty, before anything on the canvas changes.
    #[tracing::instrument(skip_all, fields(chart = %self.class, series = series.len()))]
    pub fn draw_chart(
        &mut self,
        dates: &[DateTime<Utc>],
        series: &[Series],
        keys: &[String],
        now: Millis,
    ) -> ScrollyResult<&mut Self> {
        let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) else {
            return Err(ScrollyError::data("multi-line chart needs at least one date"));
        };

        let m = self.margin;
        self.x
            .set_domain([*first, *last])
            .set_range([m.left, self.width - m.right]);
        let max = series
            .iter()
            .filter_map(Series::max_value)
            .reduce(f64::max)
            .unwrap_or(f64::NAN);
        self.y
            .set_domain([0.0, max])
            .set_range([self.height - m.bottom, m.top]);
        self.colors.set_domain(keys).set_range(self.scheme.clone());
        self.axis.update(&self.x);

        self.prune(now);
        self.join_lines(series, now);
        self.join_labels(series);
        Ok(self)
    }

    fn join_lines(&mut self, series: &[Series], now: Millis) {
        let mut previous: Vec<Option<LineGroup>> =
            std::mem::take(&mut self.groups).into_iter().map(Some).collect();
        let mut next = Vec::with_capacity(series.len());

        for s in series {
            let path = self.line(s);
            let stroke = self.colors.get_or_insert(&s.key).unwrap_or(Color::BLACK);
            let reused = previous
                .iter_mut()
                .find(|g| g.as_ref().is_some_and(|g| g.key == s.key))
                .and_then(Option::take)
                .or_else(|| self.revive(&s.key));
            next.push(match reused {
                Some(mut g) => {
                    g.path = path;
                    g.stroke = stroke;
                    g
                }
                None => LineGroup {
                    key: s.key.clone(),
                    path,
                    stroke,
                    labels: Vec::new(),
                },
            });
        }

        let fade = Timing::new(now, EXIT_MS).with_ease(Ease::Linear);
        for group in previous.into_iter().flatten() {
            tracing::debug!(key = %group.key, "line group exiting");
            self.exiting.push(ExitingGroup {
                group,
                fade: Tween::animate(1.0, EXIT_OPACITY, fade),
            });
        }
        self.groups = next;
    }

    /// Pull a still-fading group back onto the canvas.
    fn revive(&mut self, key: &str) -> Option<LineGroup> {
        let i = self.exiting.iter().position(|e| e.group.key == key)?;
        Some(self.exiting.remove(i).group)
    }

    /// Labels are keyed by point ordinal. Surviving labels take the point's current position and
    /// value so they stay on the redrawn line.
    fn join_labels(&mut self, series: &[Series]) {
        for (group, s) in self.groups.iter_mut().zip(series) {
            group
                .labels
                .retain(|l| s.points.iter().any(|p| p.name == l.name));
            for p in &s.points {
                let position = Point::new(self.x.map(&p.date), self.y.map(p.value));
                let text = plain_number(p.value);
                match group.labels.iter_mut().find(|l| l.name == p.name) {
                    Some(l) => {
                        l.position = position;
                        l.text = text;
                    }
                    None => group.labels.push(PointLabel {
                        name: p.name,
                        position,
                        text,
                        suffix: None,
                    }),
                }
            }
            group.labels.sort_by_key(|l| l.name);

            let last = s.points.last().map(|p| p.name);
            for l in &mut group.labels {
                l.suffix = (Some(l.name) == last).then(|| s.key.clone());
            }
        }
    }

    fn line(&self, s: &Series) -> BezPath {
        line_path(
            s.points
                .iter()
                .map(|p| Point::new(self.x.map(&p.date), self.y.map(p.value))),
        )
    }

    /// Drop exiting groups whose fade has finished by `now`.
    pub fn prune(&mut self, now: Millis) {
        self.exiting.retain(|e| match e.fade.timing() {
            Some(t) => !t.is_finished(now),
            None => false,
        });
    }

    /// Make the chart opaque.
    pub fn show(&mut self) -> &mut Self {
        self.visible = true;
        self
    }

    /// Make the chart fully transparent. Nothing is removed.
    pub fn unshow(&mut self) -> &mut Self {
        self.visible = false;
        self
    }

    /// Return `true` while shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Keys of the live line groups, in draw order.
    pub fn keys(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.key.as_str()).collect()
    }

    /// Keys of groups still fading out.
    pub fn exiting_keys(&self) -> Vec<&str> {
        self.exiting.iter().map(|e| e.group.key.as_str()).collect()
    }

    /// Stroke color of a live line group.
    pub fn color_of(&self, key: &str) -> Option<Color> {
        self.groups.iter().find(|g| g.key == key).map(|g| g.stroke)
    }

    /// Full label text (value plus any suffix) of a live line group, in point order.
    pub fn label_texts(&self, key: &str) -> Option<Vec<String>> {
        let g = self.groups.iter().find(|g| g.key == key)?;
        Some(
            g.labels
                .iter()
                .map(|l| match &l.suffix {
                    Some(k) => format!("{} {k}", l.text),
                    None => l.text.clone(),
                })
                .collect(),
        )
    }

    /// Current y domain.
    pub fn y_domain(&self) -> [f64; 2] {
        self.y.domain()
    }

    /// Current x scale.
    pub fn x_scale(&self) -> &UtcScale {
        &self.x
    }

    /// Chart group sampled at `now`: axis first, then one group per series.
    pub fn render(&self, now: Millis) -> Node {
        let mut lines = Group::with_class("lines");
        for g in &self.groups {
            lines.children.push(render_group(g, 1.0));
        }
        for e in &self.exiting {
            if e.fade.timing().is_some_and(|t| !t.is_finished(now)) {
                lines.children.push(render_group(&e.group, e.fade.sample(now)));
            }
        }

        let axis = self.axis.render(
            Affine::translate(Vec2::new(0.0, self.height - self.margin.bottom)),
            AXIS_FONT_SIZE,
        );

        Node::Group(Group {
            class: Some(self.class.clone()),
            transform: Affine::translate(Vec2::new(self.margin.left, self.margin.top)),
            opacity: if self.visible { 1.0 } else { 0.0 },
            children: vec![Node::Group(axis), Node::Group(lines)],
            ..Group::default()
        })
    }
}

fn render_group(g: &LineGroup, opacity: f64) -> Node {
    let mut labels = Group {
        class: Some("label-group".to_owned()),
        font: Some(Font {
            family: "sans-serif".to_owned(),
            size: 14.0,
        }),
        text_anchor: Some(TextAnchor::Middle),
        ..Group::default()
    };
    for l in &g.labels {
        let mut runs = vec![TextRun::Plain(l.text.clone())];
        if let Some(key) = &l.suffix {
            runs.push(TextRun::Span(TextSpan {
                bold: true,
                ..TextSpan::plain(format!(" {key}"))
            }));
        }
        let text = TextNode {
            position: l.position,
            dy: Some(Length::Em(0.35)),
            runs,
            ..TextNode::new()
        };
        labels.children.extend(text.with_halo(LABEL_HALO));
    }

    Node::Group(Group {
        class: Some("line-group".to_owned()),
        opacity,
        children: vec![
            Node::Path(PathNode {
                class: Some("line-series".to_owned()),
                path: g.path.clone(),
                fill: Paint::None,
                stroke: Some(Stroke {
                    paint: Paint::Solid(g.stroke),
                    width: 1.0,
                }),
            }),
            Node::Group(labels),
        ],
        ..Group::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::records::SeriesPoint, foundation::color::TABLEAU10};
    use chrono::NaiveDate;

    fn year(y: i32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn series(key: &str, values: &[(i32, f64)]) -> Series {
        Series {
            key: key.to_owned(),
            points: values
                .iter()
                .enumerate()
                .map(|(name, (y, v))| SeriesPoint {
                    key: key.to_owned(),
                    name,
                    date: year(*y),
                    value: *v,
                })
                .collect(),
        }
    }

    fn chart() -> MultiLineChart {
        MultiLineChart::new("multiline-chart", 1000.0, 950.0, TABLEAU10.to_vec())
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scales_follow_margins_and_data() {
        let mut c = chart();
        let s = [series("A", &[(2019, 3.0), (2020, 5.0)])];
        c.draw_chart(&[year(2019), year(2020)], &s, &keys(&["A"]), Millis::ZERO)
            .unwrap()
            .show();

        assert_eq!(c.y_domain(), [0.0, 5.0]);
        assert_eq!(c.x_scale().range(), [50.0, 890.0]);
        assert_eq!(c.label_texts("A").unwrap(), ["3", "5 A"]);
        assert_eq!(c.color_of("A"), Some(TABLEAU10[0]));
        assert!(c.is_visible());
    }

    #[test]
    fn absent_series_fade_then_disappear() {
        let mut c = chart();
        let dates = [year(2019), year(2020)];
        let ab = [
            series("A", &[(2019, 1.0), (2020, 2.0)]),
            series("B", &[(2019, 2.0), (2020, 1.0)]),
        ];
        c.draw_chart(&dates, &ab, &keys(&["A", "B"]), Millis::ZERO)
            .unwrap();

        let a = [series("A", &[(2019, 4.0), (2020, 2.0)])];
        c.draw_chart(&dates, &a, &keys(&["A"]), Millis(100)).unwrap();
        assert_eq!(c.keys(), ["A"]);
        assert_eq!(c.exiting_keys(), ["B"]);

        c.prune(Millis(349));
        assert_eq!(c.exiting_keys(), ["B"]);
        c.prune(Millis(350));
        assert!(c.exiting_keys().is_empty());
    }

    #[test]
    fn kept_labels_follow_the_redrawn_line() {
        let mut c = chart();
        let dates = [year(2019), year(2020), year(2021)];
        c.draw_chart(
            &dates,
            &[series("A", &[(2019, 1.0), (2020, 2.0)])],
            &keys(&["A"]),
            Millis::ZERO,
        )
        .unwrap();
        c.draw_chart(
            &dates,
            &[series("A", &[(2019, 9.0), (2020, 9.0), (2021, 7.0)])],
            &keys(&["A"]),
            Millis(10),
        )
        .unwrap();
        assert_eq!(c.label_texts("A").unwrap(), ["9", "9", "7 A"]);

        let top = c.y_domain()[1];
        assert_eq!(top, 9.0);
        let group = &c.groups[0];
        let ys: Vec<f64> = group.labels.iter().map(|l| l.position.y).collect();
        assert_eq!(ys[0], c.y.map(9.0));
        assert_eq!(ys[2], c.y.map(7.0));
    }

    #[test]
    fn returning_series_is_pulled_back_from_exit() {
        let mut c = chart();
        let dates = [year(2019)];
        c.draw_chart(&dates, &[series("A", &[(2019, 1.0)])], &keys(&["A"]), Millis::ZERO)
            .unwrap();
        c.draw_chart(&dates, &[series("B", &[(2019, 1.0)])], &keys(&["B"]), Millis(10))
            .unwrap();
        c.draw_chart(&dates, &[series("A", &[(2019, 1.0)])], &keys(&["A"]), Millis(20))
            .unwrap();
        assert_eq!(c.keys(), ["A"]);
        assert_eq!(c.exiting_keys(), ["B"]);
    }

    #[test]
    fn empty_dates_fail_without_touching_groups() {
        let mut c = chart();
        let err = c.draw_chart(&[], &[], &[], Millis::ZERO).err().unwrap();
        assert!(err.to_string().starts_with("data error:"));
        assert!(c.keys().is_empty());
    }

    #[test]
    fn all_nan_values_give_nan_domain() {
        let mut c = chart();
        c.draw_chart(
            &[year(2019)],
            &[series("A", &[(2019, f64::NAN)])],
            &keys(&["A"]),
            Millis::ZERO,
        )
        .unwrap();
        assert!(c.y_domain()[1].is_nan());
        assert_eq!(c.label_texts("A").unwrap(), ["NaN A"]);
    }

    #[test]
    fn render_nests_axis_and_lines_under_margins() {
        let mut c = chart();
        c.draw_chart(
            &[year(2019), year(2020)],
            &[series("A", &[(2019, 1.0), (2020, 2.0)])],
            &keys(&["A"]),
            Millis::ZERO,
        )
        .unwrap();
        let Node::Group(g) = c.render(Millis::ZERO) else {
            panic!("group expected");
        };
        assert_eq!(g.transform, Affine::translate(Vec2::new(50.0, 50.0)));
        assert_eq!(g.opacity, 0.0);
        assert_eq!(g.children.len(), 2);
        assert_eq!(g.children[0].class(), Some("axis"));
    }
}
