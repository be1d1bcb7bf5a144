//! Tabular resources and their reshaping into chart inputs.

/// Named-resource accessors producing typed chart inputs.
pub mod accessors;
/// Lenient numeric and date parsing of text fields.
pub mod parse;
/// Typed chart inputs.
pub mod records;
/// CSV tables and the sources they are fetched from.
pub mod table;

pub use accessors::Accessors;
pub use records::{
    DatedValue, MultiSeries, ParticipationRecord, ProportionRecord, Series, SeriesPoint,
};
pub use table::{DataSource, DirSource, MemorySource, Row, Table};
