//! Story configuration loaded from JSON.

use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    color::{Color, TABLEAU10},
    core::Canvas,
    error::{ScrollyError, ScrollyResult},
};

/// Everything a [`crate::story::Story`] needs that is not data.
///
/// Every field has a default, so `{}` is a complete configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoryConfig {
    /// Canvas size in logical units.
    pub canvas: Canvas,
    /// Categorical colors shared by both charts.
    pub color_scheme: Vec<Color>,
    /// Directory holding the CSV resources, relative to the config file.
    pub data_dir: String,
    /// Bitmap shown by the opening scene, relative to the config file.
    pub image: String,
    /// Resource names for each accessor.
    pub files: DataFiles,
    /// Column names that are not plain ASCII identifiers.
    pub columns: ColumnNames,
    /// Record whose value the composing-ratio pie reads out as a percentage.
    pub compose_key: String,
    /// Record whose value the lyric-writing-ratio pie reads out as a percentage.
    pub write_key: String,
    /// Series columns of the cross-group table, in legend order.
    pub boyband_keys: Vec<String>,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1000,
                height: 950,
            },
            color_scheme: TABLEAU10.to_vec(),
            data_dir: "data".to_owned(),
            image: "images/bts.jpeg".to_owned(),
            files: DataFiles::default(),
            columns: ColumnNames::default(),
            compose_key: "멤버 작곡 참여 비율".to_owned(),
            write_key: "멤버 작사 참여 비율".to_owned(),
            boyband_keys: vec!["BTS".to_owned(), "EXO".to_owned(), "GOT7".to_owned()],
        }
    }
}

/// Resource names, relative to the data source root.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataFiles {
    /// `name,value` rows: lyric-writing participation.
    pub write_ratio: String,
    /// `name,value` rows: composing participation.
    pub compose_ratio: String,
    /// `date,value` rows: songs the group wrote per year.
    pub make_own_song: String,
    /// Per-group lyric-writing participation split.
    pub boyband_write: String,
    /// Per-group composing participation split.
    pub boyband_compose: String,
    /// `date` plus one column per group.
    pub boyband_own_song: String,
    /// `date,member,value` rows.
    pub member_songs: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            write_ratio: "BTS작사비율.csv".to_owned(),
            compose_ratio: "BTS작곡비율.csv".to_owned(),
            make_own_song: "BTS년도별작곡작사횟수.csv".to_owned(),
            boyband_write: "남자아이돌작사비율.csv".to_owned(),
            boyband_compose: "남자아이돌작곡비율.csv".to_owned(),
            boyband_own_song: "남자아이돌년도별작곡작사횟수.csv".to_owned(),
            member_songs: "BTS멤버년도별작곡작사횟수.csv".to_owned(),
        }
    }
}

/// Localized column headers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnNames {
    /// Participating-share column.
    pub participation: String,
    /// Non-participating-share column.
    pub non_participation: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            participation: "참여".to_owned(),
            non_participation: "비참여".to_owned(),
        }
    }
}

impl StoryConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollyResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrollyError::serde(format!("parse story config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollyResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollyError::validation(format!("open story config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check static invariants.
    pub fn validate(&self) -> ScrollyResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.color_scheme.is_empty() {
            return Err(ScrollyError::validation(
                "color_scheme must contain at least one color",
            ));
        }
        if self.compose_key.trim().is_empty() || self.write_key.trim().is_empty() {
            return Err(ScrollyError::validation("pie keys must be non-empty"));
        }
        if self.boyband_keys.is_empty() {
            return Err(ScrollyError::validation(
                "boyband_keys must name at least one series column",
            ));
        }
        if self.image.trim().is_empty() {
            return Err(ScrollyError::validation("image must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default() {
        let cfg = StoryConfig::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(cfg, StoryConfig::default());
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.canvas.width, 1000);
        assert_eq!(cfg.color_scheme.len(), 10);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let cfg = StoryConfig::from_reader(
            r##"{"color_scheme": ["#000000"], "files": {"write_ratio": "w.csv"}}"##.as_bytes(),
        )
        .unwrap();
        assert_eq!(cfg.color_scheme, vec![Color::BLACK]);
        assert_eq!(cfg.files.write_ratio, "w.csv");
        assert_eq!(cfg.files.compose_ratio, DataFiles::default().compose_ratio);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = StoryConfig::default();
        cfg.color_scheme.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = StoryConfig::default();
        cfg.canvas.height = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = StoryConfig::default();
        cfg.boyband_keys.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_fields_and_bad_colors_fail() {
        assert!(StoryConfig::from_reader(r#"{"bogus": 1}"#.as_bytes()).is_err());
        assert!(StoryConfig::from_reader(r#"{"color_scheme": ["red"]}"#.as_bytes()).is_err());
    }
}
