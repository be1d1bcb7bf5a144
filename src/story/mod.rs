//! The scroll-driven story: which scene runs when the active step changes, and what it puts on
//! the shared canvas.

/// Step index tracking.
pub mod dispatch;
/// Scene table.
pub mod scene;

use crate::{
    animation::tween::{Timing, Tween},
    chart::{MultiLineChart, PieChart},
    config::StoryConfig,
    data::{
        accessors::Accessors,
        records::{MultiSeries, ProportionRecord},
        table::DataSource,
    },
    foundation::{
        core::{Canvas, Millis, Rect, ViewBox},
        error::{ScrollyError, ScrollyResult},
    },
    scene::node::{Document, ImageNode, Node},
};

pub use dispatch::{ScrollState, scrolled_sections};
pub use scene::{Scene, VisMode};

const STEP_FADE_MS: u64 = 500;
const STEP_ACTIVE: f64 = 1.0;
const STEP_INACTIVE: f64 = 0.1;

/// Proof that a scene was entered, stamped with the entry generation.
///
/// Only the ticket of the most recent entry may present data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneTicket {
    /// Scene that was entered.
    pub scene: Scene,
    /// Entry generation.
    pub generation: u64,
}

/// Data a scene needs before it can draw.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneData {
    /// Nothing to fetch.
    Image,
    /// Wedges plus the record the readout reports.
    Pie {
        /// Wedge records.
        records: Vec<ProportionRecord>,
        /// Name of the readout record.
        key: String,
    },
    /// Time series.
    Lines(MultiSeries),
}

/// What one active-step change did.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Scenes run, in order.
    pub invoked: Vec<Scene>,
    /// Scenes that failed part-way, with the error. Later scenes still ran.
    pub failures: Vec<(Scene, ScrollyError)>,
}

#[derive(Clone, Debug, PartialEq)]
struct ImageLayer {
    href: String,
    opacity: f64,
}

/// One shared canvas, three visualizations, five scenes.
///
/// All time-dependent state is sampled against the story clock, which only moves through
/// [`Story::advance_to`].
#[derive(Debug)]
pub struct Story<S> {
    config: StoryConfig,
    accessors: Accessors<S>,
    canvas: Canvas,
    view_box: ViewBox,
    image: Option<ImageLayer>,
    pie: PieChart,
    multiline: MultiLineChart,
    scroll: ScrollState,
    generation: u64,
    clock: Millis,
    steps: Vec<Tween<f64>>,
}

impl<S: DataSource> Story<S> {
    /// Build both charts and run the opening scene.
    pub fn new(config: StoryConfig, source: S) -> ScrollyResult<Self> {
        config.validate()?;
        let canvas = Canvas::new(config.canvas.width, config.canvas.height)?;
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);

        let accessors = Accessors::new(
            source,
            config.files.clone(),
            config.columns.clone(),
            config.boyband_keys.clone(),
        );

        let mut story = Self {
            multiline: MultiLineChart::new("multiline-chart", w, h, config.color_scheme.clone()),
            pie: PieChart::new("pie-chart", w / 2.0, h / 2.0, config.color_scheme.clone()),
            accessors,
            view_box: canvas.default_view_box(),
            canvas,
            image: None,
            scroll: ScrollState::new(Scene::ALL.len()),
            generation: 0,
            clock: Millis::ZERO,
            steps: vec![Tween::fixed(STEP_ACTIVE); Scene::ALL.len()],
            config,
        };
        story.run_scene(Scene::Intro)?;
        Ok(story)
    }

    /// Handle the active step becoming `index`: fade step highlights and run every scene crossed
    /// on the way, in order.
    ///
    /// A failing scene is logged and reported; it does not stop the scenes after it.
    #[tracing::instrument(skip(self), fields(from = self.scroll.current()))]
    pub fn on_active(&mut self, index: usize) -> ScrollyResult<DispatchReport> {
        let sections = self.scroll.transition(index)?;

        let timing = Timing::new(self.clock, STEP_FADE_MS);
        for (i, step) in self.steps.iter_mut().enumerate() {
            let target = if i == index {
                STEP_ACTIVE
            } else {
                STEP_INACTIVE
            };
            step.retarget(self.clock, target, timing);
        }

        tracing::debug!(?sections, "scrolled sections");
        let mut report = DispatchReport::default();
        for i in sections {
            let scene = Scene::from_index(i)?;
            tracing::debug!(section = i, "section");
            report.invoked.push(scene);
            if let Err(err) = self.run_scene(scene) {
                tracing::error!(?scene, error = %err, "scene failed");
                report.failures.push((scene, err));
            }
        }
        Ok(report)
    }

    fn run_scene(&mut self, scene: Scene) -> ScrollyResult<()> {
        let ticket = self.enter_scene(scene);
        let data = self.load(&ticket)?;
        self.present(&ticket, data)?;
        Ok(())
    }

    /// Clear other visualizations and prepare the canvas for `scene`.
    ///
    /// Invalidates every earlier ticket.
    pub fn enter_scene(&mut self, scene: Scene) -> SceneTicket {
        self.generation += 1;
        tracing::info!(?scene, generation = self.generation, "enter scene");

        let mode = scene.mode();
        self.clean(mode);
        match mode {
            VisMode::Image => {
                let href = self.config.image.clone();
                self.image
                    .get_or_insert(ImageLayer { href, opacity: 1.0 })
                    .opacity = 1.0;
            }
            VisMode::Pie => self.view_box = self.canvas.centered_view_box(),
            VisMode::Multiline => {}
        }

        SceneTicket {
            scene,
            generation: self.generation,
        }
    }

    /// Fetch the data `ticket`'s scene draws. Every call refetches.
    pub fn load(&self, ticket: &SceneTicket) -> ScrollyResult<SceneData> {
        Ok(match ticket.scene {
            Scene::Intro => SceneData::Image,
            Scene::ComposeRatio => SceneData::Pie {
                records: self.accessors.bts_compose_ratio()?,
                key: self.config.compose_key.clone(),
            },
            Scene::WriteRatio => SceneData::Pie {
                records: self.accessors.bts_write_ratio()?,
                key: self.config.write_key.clone(),
            },
            Scene::BoybandOwnSongs => SceneData::Lines(self.accessors.boyband_own_song()?),
            Scene::MemberSongs => SceneData::Lines(self.accessors.song_by_bts_members()?),
        })
    }

    /// Draw and show `data` if `ticket` is still current.
    ///
    /// Returns `false` without touching the canvas when a later scene has been entered since.
    pub fn present(&mut self, ticket: &SceneTicket, data: SceneData) -> ScrollyResult<bool> {
        if ticket.generation != self.generation {
            tracing::warn!(
                scene = ?ticket.scene,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale scene draw"
            );
            return Ok(false);
        }

        let now = self.clock;
        match data {
            SceneData::Image => {}
            SceneData::Pie { records, key } => {
                self.pie.draw_chart(&records, &key, now)?.show();
            }
            SceneData::Lines(lines) => {
                self.multiline
                    .draw_chart(&lines.dates, &lines.series, &lines.keys, now)?
                    .show();
            }
        }
        Ok(true)
    }

    fn clean(&mut self, mode: VisMode) {
        if mode != VisMode::Multiline {
            self.multiline.unshow();
            tracing::debug!("clean multi-line chart");
        }
        if mode != VisMode::Image {
            if let Some(img) = &mut self.image {
                img.opacity = 0.0;
            }
            tracing::debug!("clean image");
        }
        if mode != VisMode::Pie {
            self.pie.unshow();
            self.view_box = self.canvas.default_view_box();
            tracing::debug!("clean pie chart");
        }
    }
}

impl<S> Story<S> {
    /// Move the story clock forward to `now`. Earlier times are ignored.
    pub fn advance_to(&mut self, now: Millis) {
        self.clock = self.clock.max(now);
        self.multiline.prune(self.clock);
    }

    /// Move the story clock forward by `ms`.
    pub fn advance_by(&mut self, ms: u64) {
        self.advance_to(self.clock.after(ms));
    }

    /// Current story clock.
    pub fn now(&self) -> Millis {
        self.clock
    }

    /// Active step.
    pub fn current_step(&self) -> usize {
        self.scroll.current()
    }

    /// Generation of the most recent scene entry.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Visualizations currently shown.
    pub fn visible_modes(&self) -> Vec<VisMode> {
        let mut out = Vec::new();
        if self.image.as_ref().is_some_and(|i| i.opacity > 0.0) {
            out.push(VisMode::Image);
        }
        if self.pie.is_visible() {
            out.push(VisMode::Pie);
        }
        if self.multiline.is_visible() {
            out.push(VisMode::Multiline);
        }
        out
    }

    /// Opacity of narrative step `index` at the current clock.
    pub fn step_opacity(&self, index: usize) -> Option<f64> {
        self.steps.get(index).map(|s| s.sample(self.clock))
    }

    /// Current framing of the canvas.
    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// The donut chart.
    pub fn pie(&self) -> &PieChart {
        &self.pie
    }

    /// The time-series chart.
    pub fn multiline(&self) -> &MultiLineChart {
        &self.multiline
    }

    /// Data accessors.
    pub fn accessors(&self) -> &Accessors<S> {
        &self.accessors
    }

    /// Configuration the story was built from.
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// The whole canvas sampled at the current clock.
    pub fn render(&self) -> Document {
        let now = self.clock;
        let mut children = vec![self.multiline.render(now)];
        children.extend(self.pie.render(now));
        if let Some(img) = &self.image {
            children.push(Node::Image(ImageNode {
                class: Some("bts-img".to_owned()),
                href: img.href.clone(),
                rect: Rect::new(
                    0.0,
                    0.0,
                    f64::from(self.canvas.width),
                    f64::from(self.canvas.height),
                ),
                opacity: img.opacity,
            }));
        }
        Document {
            canvas: self.canvas,
            view_box: self.view_box,
            children,
        }
    }
}
