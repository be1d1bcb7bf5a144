use std::{
    collections::BTreeMap,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::error::{ScrollyError, ScrollyResult};

/// A parsed CSV resource: one header row plus string records.
#[derive(Clone, Debug)]
pub struct Table {
    headers: Vec<String>,
    columns: BTreeMap<String, usize>,
    rows: Vec<csv::StringRecord>,
}

impl Table {
    /// Parse CSV text with a header row. Short rows are allowed; their missing fields read as
    /// empty strings.
    pub fn from_reader<R: Read>(r: R) -> ScrollyResult<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(r);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();
        let mut columns = BTreeMap::new();
        for (i, h) in headers.iter().enumerate() {
            columns.entry(h.clone()).or_insert(i);
        }

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, csv::Error>>()?;

        Ok(Self {
            headers,
            columns,
            rows,
        })
    }

    /// Parse CSV from an in-memory string.
    pub fn from_csv_str(text: &str) -> ScrollyResult<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// Return `true` when `name` is a column.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Return `true` when there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |record| Row {
            table: self,
            record,
        })
    }

    /// Fail unless every named column exists.
    pub fn require_columns(&self, names: &[&str]) -> ScrollyResult<()> {
        for name in names {
            if !self.has_column(name) {
                return Err(ScrollyError::data(format!(
                    "missing column '{name}' (have: {})",
                    self.headers.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// One data row, addressed by column name.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    table: &'a Table,
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    /// Field under `column`; `""` when the row is short, an error when the column does not exist.
    pub fn get(&self, column: &str) -> ScrollyResult<&'a str> {
        let idx = *self
            .table
            .columns
            .get(column)
            .ok_or_else(|| ScrollyError::data(format!("missing column '{column}'")))?;
        Ok(self.record.get(idx).unwrap_or(""))
    }

    /// Every `(column, field)` pair of the row except those named in `skip`.
    pub fn fields_except(&self, skip: &[&str]) -> BTreeMap<String, String> {
        self.table
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !skip.contains(&h.as_str()))
            .map(|(i, h)| (h.clone(), self.record.get(i).unwrap_or("").to_owned()))
            .collect()
    }
}

/// Somewhere named tabular resources can be fetched from.
pub trait DataSource {
    /// Fetch and parse the resource called `name`.
    fn fetch(&self, name: &str) -> ScrollyResult<Table>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn fetch(&self, name: &str) -> ScrollyResult<Table> {
        (**self).fetch(name)
    }
}

/// Resources read from files under a root directory.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for DirSource {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn fetch(&self, name: &str) -> ScrollyResult<Table> {
        let rel = normalize_rel_path(name)?;
        let path = self.root.join(Path::new(&rel));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read table '{}'", path.display()))?;
        Table::from_reader(bytes.as_slice())
    }
}

/// Resources held in memory as CSV text, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    tables: BTreeMap<String, String>,
}

impl MemorySource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `csv` under `name`, replacing any previous text.
    pub fn insert(&mut self, name: impl Into<String>, csv: impl Into<String>) -> &mut Self {
        self.tables.insert(name.into(), csv.into());
        self
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, name: &str) -> ScrollyResult<Table> {
        let text = self
            .tables
            .get(name)
            .ok_or_else(|| ScrollyError::data(format!("no table named '{name}'")))?;
        Table::from_csv_str(text)
    }
}

/// Normalize and validate a source-relative resource path.
///
/// The result uses `/` separators, drops `.` segments, and rejects absolute paths and parent
/// traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> ScrollyResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ScrollyError::validation("resource paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ScrollyError::validation(
                "resource paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ScrollyError::validation(
            "resource path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}
