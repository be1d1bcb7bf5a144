use crate::foundation::error::{ScrollyError, ScrollyResult};

/// Which visualization a scene puts on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisMode {
    /// The opening bitmap.
    Image,
    /// The donut chart and its readout.
    Pie,
    /// The time-series chart.
    Multiline,
}

/// One narrative step's visualization, in scroll order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Group photo.
    Intro,
    /// Members' share of composing credits.
    ComposeRatio,
    /// Members' share of lyric credits.
    WriteRatio,
    /// Self-written songs per year across groups.
    BoybandOwnSongs,
    /// Self-written songs per year for each member.
    MemberSongs,
}

impl Scene {
    /// Every scene, indexed by step.
    pub const ALL: [Scene; 5] = [
        Scene::Intro,
        Scene::ComposeRatio,
        Scene::WriteRatio,
        Scene::BoybandOwnSongs,
        Scene::MemberSongs,
    ];

    /// Scene for step `index`.
    pub fn from_index(index: usize) -> ScrollyResult<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            ScrollyError::validation(format!(
                "step index {index} out of range (0..{})",
                Self::ALL.len()
            ))
        })
    }

    /// Step index of this scene.
    pub fn index(self) -> usize {
        match self {
            Scene::Intro => 0,
            Scene::ComposeRatio => 1,
            Scene::WriteRatio => 2,
            Scene::BoybandOwnSongs => 3,
            Scene::MemberSongs => 4,
        }
    }

    /// Visualization this scene shows.
    pub fn mode(self) -> VisMode {
        match self {
            Scene::Intro => VisMode::Image,
            Scene::ComposeRatio | Scene::WriteRatio => VisMode::Pie,
            Scene::BoybandOwnSongs | Scene::MemberSongs => VisMode::Multiline,
        }
    }
}
