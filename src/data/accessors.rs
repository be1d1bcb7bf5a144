use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::{
    config::{ColumnNames, DataFiles},
    data::{
        parse::{parse_date, parse_float, parse_int},
        records::{
            DatedValue, MultiSeries, ParticipationRecord, ProportionRecord, Series, SeriesPoint,
        },
        table::{DataSource, Table},
    },
    foundation::error::ScrollyResult,
};

const NAME: &str = "name";
const VALUE: &str = "value";
const DATE: &str = "date";
const MEMBER: &str = "member";

/// Fetches each named resource and reshapes it into chart input.
///
/// Every accessor refetches; nothing is cached.
#[derive(Clone, Debug)]
pub struct Accessors<S> {
    source: S,
    files: DataFiles,
    columns: ColumnNames,
    boyband_keys: Vec<String>,
}

impl<S: DataSource> Accessors<S> {
    /// Accessors reading `files` from `source`.
    pub fn new(
        source: S,
        files: DataFiles,
        columns: ColumnNames,
        boyband_keys: Vec<String>,
    ) -> Self {
        Self {
            source,
            files,
            columns,
            boyband_keys,
        }
    }

    /// Underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Lyric-writing participation split.
    #[tracing::instrument(skip(self))]
    pub fn bts_write_ratio(&self) -> ScrollyResult<Vec<ProportionRecord>> {
        proportions(&self.source.fetch(&self.files.write_ratio)?)
    }

    /// Composing participation split.
    #[tracing::instrument(skip(self))]
    pub fn bts_compose_ratio(&self) -> ScrollyResult<Vec<ProportionRecord>> {
        proportions(&self.source.fetch(&self.files.compose_ratio)?)
    }

    /// Songs written per year, in row order.
    #[tracing::instrument(skip(self))]
    pub fn bts_make_own_song(&self) -> ScrollyResult<Vec<DatedValue>> {
        dated_values(&self.source.fetch(&self.files.make_own_song)?)
    }

    /// Per-group lyric-writing split, highest participation first.
    #[tracing::instrument(skip(self))]
    pub fn boyband_write(&self) -> ScrollyResult<Vec<ParticipationRecord>> {
        participation(
            &self.source.fetch(&self.files.boyband_write)?,
            &self.columns,
        )
    }

    /// Per-group composing split, highest participation first.
    #[tracing::instrument(skip(self))]
    pub fn boyband_compose(&self) -> ScrollyResult<Vec<ParticipationRecord>> {
        participation(
            &self.source.fetch(&self.files.boyband_compose)?,
            &self.columns,
        )
    }

    /// Songs per year for each group, one series per configured key column.
    #[tracing::instrument(skip(self))]
    pub fn boyband_own_song(&self) -> ScrollyResult<MultiSeries> {
        series_from_columns(
            &self.source.fetch(&self.files.boyband_own_song)?,
            &self.boyband_keys,
        )
    }

    /// Songs per year for each member, one series per distinct `member`.
    #[tracing::instrument(skip(self))]
    pub fn song_by_bts_members(&self) -> ScrollyResult<MultiSeries> {
        series_from_member_rows(&self.source.fetch(&self.files.member_songs)?)
    }
}

/// `name,value` rows with `value` parsed as a float. Other columns ride along untouched.
pub fn proportions(table: &Table) -> ScrollyResult<Vec<ProportionRecord>> {
    table.require_columns(&[NAME, VALUE])?;
    table
        .rows()
        .map(|row| {
            Ok(ProportionRecord {
                name: row.get(NAME)?.to_owned(),
                value: parse_float(row.get(VALUE)?),
                fields: row.fields_except(&[NAME, VALUE]),
            })
        })
        .collect()
}

/// `date,value` rows with an integer `value`, in row order.
pub fn dated_values(table: &Table) -> ScrollyResult<Vec<DatedValue>> {
    table.require_columns(&[DATE, VALUE])?;
    table
        .rows()
        .map(|row| {
            Ok(DatedValue {
                date: parse_date(row.get(DATE)?)?,
                value: parse_int(row.get(VALUE)?),
            })
        })
        .collect()
}

/// Participation splits sorted descending by the participating share.
///
/// `NaN` shares sort after every number.
pub fn participation(
    table: &Table,
    columns: &ColumnNames,
) -> ScrollyResult<Vec<ParticipationRecord>> {
    let yes = columns.participation.as_str();
    let no = columns.non_participation.as_str();
    table.require_columns(&[yes, no])?;

    let mut out = table
        .rows()
        .map(|row| {
            Ok(ParticipationRecord {
                participation: parse_float(row.get(yes)?),
                non_participation: parse_float(row.get(no)?),
                fields: row.fields_except(&[yes, no]),
            })
        })
        .collect::<ScrollyResult<Vec<_>>>()?;

    out.sort_by(|a, b| {
        b.participation
            .partial_cmp(&a.participation)
            .unwrap_or_else(|| a.participation.is_nan().cmp(&b.participation.is_nan()))
    });
    Ok(out)
}

/// Wide table (`date` plus one column per key) to one series per key.
///
/// Rows are ordered by date first, so each point's ordinal is its chronological position.
pub fn series_from_columns(table: &Table, keys: &[String]) -> ScrollyResult<MultiSeries> {
    table.require_columns(&[DATE])?;
    let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    table.require_columns(&key_refs)?;

    let mut rows = table
        .rows()
        .map(|row| Ok((parse_date(row.get(DATE)?)?, row)))
        .collect::<ScrollyResult<Vec<_>>>()?;
    rows.sort_by_key(|(date, _)| *date);

    let dates = distinct_sorted(rows.iter().map(|(d, _)| *d));

    let series = keys
        .iter()
        .map(|key| {
            let points = rows
                .iter()
                .enumerate()
                .map(|(name, (date, row))| {
                    Ok(SeriesPoint {
                        key: key.clone(),
                        name,
                        date: *date,
                        value: parse_int(row.get(key)?),
                    })
                })
                .collect::<ScrollyResult<Vec<_>>>()?;
            Ok(Series {
                key: key.clone(),
                points,
            })
        })
        .collect::<ScrollyResult<Vec<_>>>()?;

    Ok(MultiSeries {
        dates,
        series,
        keys: keys.to_vec(),
    })
}

/// Long table (`date,member,value`) to one series per member.
///
/// Keys keep first-appearance order; each series is ordered by date.
pub fn series_from_member_rows(table: &Table) -> ScrollyResult<MultiSeries> {
    table.require_columns(&[DATE, MEMBER, VALUE])?;

    let mut keys: Vec<String> = Vec::new();
    let mut parsed = Vec::with_capacity(table.len());
    for row in table.rows() {
        let member = row.get(MEMBER)?;
        if !keys.iter().any(|k| k == member) {
            keys.push(member.to_owned());
        }
        parsed.push((
            member,
            parse_date(row.get(DATE)?)?,
            parse_int(row.get(VALUE)?),
        ));
    }

    let dates = distinct_sorted(parsed.iter().map(|(_, d, _)| *d));

    let series = keys
        .iter()
        .map(|key| {
            let mut rows: Vec<_> = parsed.iter().filter(|(m, _, _)| *m == key.as_str()).collect();
            rows.sort_by_key(|(_, date, _)| *date);
            Series {
                key: key.clone(),
                points: rows
                    .into_iter()
                    .enumerate()
                    .map(|(name, (_, date, value))| SeriesPoint {
                        key: key.clone(),
                        name,
                        date: *date,
                        value: *value,
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(MultiSeries {
        dates,
        series,
        keys,
    })
}

fn distinct_sorted(dates: impl Iterator<Item = DateTime<Utc>>) -> Vec<DateTime<Utc>> {
    dates.collect::<BTreeSet<_>>().into_iter().collect()
}
