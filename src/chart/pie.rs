use crate::{
    animation::tween::{Stagger, Tween},
    data::records::ProportionRecord,
    foundation::{
        color::Color,
        core::{Affine, Millis, Point},
        error::{ScrollyError, ScrollyResult},
    },
    format::{locale_number, percent_whole},
    scale::OrdinalScale,
    scene::node::{
        Font, Group, Length, Node, Paint, PathNode, Stroke, TextAnchor, TextNode, TextRun,
        TextSpan,
    },
    shape::{ArcAngles, ArcGenerator, PieLayout, PieSlice},
};

const FONT_FAMILY: &str = "'Work sans', sans-serif";
const PAD_ANGLE: f64 = 0.02;
const INNER_RATIO: f64 = 0.4;
const OUTER_RATIO: f64 = 0.9;
/// Wedges narrower than this (radians) get no label.
const LABEL_MIN_SPAN: f64 = 0.25;
const SWEEP: Stagger = Stagger {
    duration_ms: 400,
    step_ms: 5,
};
const LABEL_HALO: Stroke = Stroke {
    paint: Paint::Solid(Color::WHITE),
    width: 3.0,
};

#[derive(Clone, Debug)]
struct Wedge {
    angles: Tween<ArcAngles>,
    fill: Tween<Color>,
}

#[derive(Clone, Debug, PartialEq)]
struct LabelLines {
    name: String,
    value: String,
}

impl LabelLines {
    fn of(record: &ProportionRecord) -> Self {
        Self {
            name: record.name.clone(),
            value: locale_number(record.value),
        }
    }
}

#[derive(Clone, Debug)]
struct PieLabel {
    position: Tween<Point>,
    lines: Option<LabelLines>,
}

/// Donut chart with per-wedge labels and a separate percent readout.
///
/// Wedges and labels are matched to the new layout by position. Drawing twice with the same data
/// leaves the chart where it was.
#[derive(Clone, Debug)]
pub struct PieChart {
    class: String,
    arc: ArcGenerator,
    layout: PieLayout,
    colors: OrdinalScale,
    scheme: Vec<Color>,
    wedges: Vec<Wedge>,
    labels: Vec<PieLabel>,
    slices: Vec<PieSlice>,
    data: Vec<ProportionRecord>,
    percent: String,
    visible: bool,
}

impl PieChart {
    /// Hidden, empty chart of radius `min(width, height) / 2`.
    pub fn new(class: impl Into<String>, width: f64, height: f64, scheme: Vec<Color>) -> Self {
        let radius = width.min(height) / 2.0;
        Self {
            class: class.into(),
            arc: ArcGenerator::new(radius * INNER_RATIO, radius * OUTER_RATIO),
            layout: PieLayout::default().with_pad_angle(PAD_ANGLE),
            colors: OrdinalScale::new(),
            scheme,
            wedges: Vec::new(),
            labels: Vec::new(),
            slices: Vec::new(),
            data: Vec::new(),
            percent: String::new(),
            visible: false,
        }
    }

    /// Lay out `data`, start the sweep towards it, and read out the share of `data_key`.
    ///
    /// Fails with [`ScrollyError::RecordNotFound`] when no record is named `data_key`. Wedges and
    /// labels have already moved by then.
    #[tracing::instrument(skip(self, data), fields(chart = %self.class, records = data.len()))]
    pub fn draw_chart(
        &mut self,
        data: &[ProportionRecord],
        data_key: &str,
        now: Millis,
    ) -> ScrollyResult<&mut Self> {
        self.colors
            .set_domain(data.iter().map(|d| d.name.as_str()))
            .set_range(self.scheme.clone());

        let values: Vec<f64> = data.iter().map(|d| d.value).collect();
        let slices = self.layout.layout(&values);

        self.join_wedges(data, &slices, now);
        self.join_labels(data, &slices, now);
        self.slices = slices;
        self.data = data.to_vec();

        let record = data
            .iter()
            .find(|d| d.name == data_key)
            .ok_or_else(|| ScrollyError::record_not_found(format!("no record named '{data_key}'")))?;
        self.percent = percent_whole(record.value / 100.0);
        Ok(self)
    }

    fn join_wedges(&mut self, data: &[ProportionRecord], slices: &[PieSlice], now: Millis) {
        self.wedges.truncate(slices.len());
        for (i, (slice, record)) in slices.iter().zip(data).enumerate() {
            let angles = ArcAngles::from(slice);
            let fill = self.colors.get(&record.name).unwrap_or(Color::BLACK);
            let timing = SWEEP.timing(now, i);
            match self.wedges.get_mut(i) {
                Some(w) => {
                    w.angles.retarget(now, angles, timing);
                    w.fill.retarget(now, fill, timing);
                }
                None => self.wedges.push(Wedge {
                    angles: Tween::animate(ArcAngles::collapsed_at(angles.start), angles, timing),
                    fill: Tween::fixed(fill),
                }),
            }
        }
    }

    fn join_labels(&mut self, data: &[ProportionRecord], slices: &[PieSlice], now: Millis) {
        let first_draw = self.labels.iter().all(|l| l.lines.is_none());
        self.labels.truncate(slices.len());

        for (i, (slice, record)) in slices.iter().zip(data).enumerate() {
            let centroid = self.arc.centroid(&ArcAngles::from(slice));
            if first_draw {
                let label = PieLabel {
                    position: Tween::fixed(centroid),
                    lines: (slice.span() > LABEL_MIN_SPAN).then(|| LabelLines::of(record)),
                };
                match self.labels.get_mut(i) {
                    Some(l) => *l = label,
                    None => self.labels.push(label),
                }
                continue;
            }

            let timing = SWEEP.timing(now, i);
            match self.labels.get_mut(i) {
                Some(l) => {
                    l.position.retarget(now, centroid, timing);
                    if let Some(lines) = &mut l.lines {
                        *lines = LabelLines::of(record);
                    }
                }
                None => self.labels.push(PieLabel {
                    position: Tween::animate(Point::ORIGIN, centroid, timing),
                    lines: None,
                }),
            }
        }
    }

    /// Make the chart and its readout opaque.
    pub fn show(&mut self) -> &mut Self {
        self.visible = true;
        self
    }

    /// Make the chart and its readout fully transparent. Nothing is removed.
    pub fn unshow(&mut self) -> &mut Self {
        self.visible = false;
        self
    }

    /// Return `true` while shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Color currently assigned to `name`.
    pub fn color_of(&self, name: &str) -> Option<Color> {
        self.colors.get(name)
    }

    /// Percent readout text.
    pub fn percent_text(&self) -> &str {
        &self.percent
    }

    /// Number of wedges on the canvas.
    pub fn wedge_count(&self) -> usize {
        self.wedges.len()
    }

    /// Layout of the last draw.
    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    /// Records of the last draw.
    pub fn data(&self) -> &[ProportionRecord] {
        &self.data
    }

    /// Chart group and readout group, sampled at `now`.
    pub fn render(&self, now: Millis) -> [Node; 2] {
        let opacity = if self.visible { 1.0 } else { 0.0 };

        let mut chart = Group {
            class: Some(self.class.clone()),
            opacity,
            font: Some(Font {
                family: FONT_FAMILY.to_owned(),
                size: 14.0,
            }),
            text_anchor: Some(TextAnchor::Middle),
            ..Group::default()
        };

        for w in &self.wedges {
            chart.children.push(Node::Path(PathNode {
                class: None,
                path: self.arc.path(&w.angles.sample(now)),
                fill: Paint::Solid(w.fill.sample(now)),
                stroke: None,
            }));
        }

        for label in &self.labels {
            let at = label.position.sample(now);
            let mut text = TextNode {
                transform: Affine::translate(at.to_vec2()),
                ..TextNode::new()
            };
            match &label.lines {
                None => chart.children.push(Node::Text(text)),
                Some(lines) => {
                    text.runs = vec![
                        TextRun::Span(TextSpan {
                            class: Some("pie-label-name".to_owned()),
                            y: Some(Length::Em(-0.1)),
                            bold: true,
                            ..TextSpan::plain(lines.name.clone())
                        }),
                        TextRun::Span(TextSpan {
                            class: Some("pie-label-value".to_owned()),
                            x: Some(Length::Px(0.0)),
                            y: Some(Length::Em(1.1)),
                            fill_opacity: Some(0.7),
                            ..TextSpan::plain(lines.value.clone())
                        }),
                    ];
                    chart.children.extend(text.with_halo(LABEL_HALO));
                }
            }
        }

        let readout = Group {
            class: Some(format!("{}-percent", self.class)),
            opacity,
            font: Some(Font {
                family: FONT_FAMILY.to_owned(),
                size: 24.0,
            }),
            text_anchor: Some(TextAnchor::Middle),
            children: vec![Node::Text(TextNode::plain(Point::ORIGIN, self.percent.clone()))],
            ..Group::default()
        };

        [Node::Group(chart), Node::Group(readout)]
    }
}
