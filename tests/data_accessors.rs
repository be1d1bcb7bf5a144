mod common;

use chrono::{TimeZone, Utc};
use scrollyviz::{
    Accessors, DataSource, DirSource, MemorySource, StoryConfig,
    data::{SeriesPoint, accessors},
};

fn accessors_over(src: MemorySource) -> Accessors<MemorySource> {
    let cfg = StoryConfig::default();
    Accessors::new(src, cfg.files, cfg.columns, cfg.boyband_keys)
}

#[test]
fn proportion_values_parse_leniently() {
    let files = StoryConfig::default().files;
    let mut src = MemorySource::new();
    src.insert(files.write_ratio, "name,value\nA,42.5\nB,abc\n");

    let recs = accessors_over(src).bts_write_ratio().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].name, "A");
    assert_eq!(recs[0].value, 42.5);
    assert!(recs[1].value.is_nan());
}

#[test]
fn wide_rows_reshape_into_keyed_series() {
    let table = scrollyviz::Table::from_csv_str(
        "date,BTS,EXO\n2020-01-01,3,1\n2021-01-01,5,2\n",
    )
    .unwrap();
    let ms = accessors::series_from_columns(&table, &["BTS".to_owned(), "EXO".to_owned()])
        .unwrap();

    let d2020 = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let d2021 = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

    assert_eq!(ms.series.len(), 2);
    assert_eq!(
        ms.series[0].points,
        [
            SeriesPoint {
                key: "BTS".to_owned(),
                name: 0,
                date: d2020,
                value: 3.0,
            },
            SeriesPoint {
                key: "BTS".to_owned(),
                name: 1,
                date: d2021,
                value: 5.0,
            },
        ]
    );
    assert_eq!(ms.series[1].points.len(), 2);
    assert_eq!(ms.dates, [d2020, d2021]);
    assert_eq!(ms.keys, ["BTS", "EXO"]);
}

#[test]
fn member_rows_group_by_member() {
    let src = common::full_source();
    let ms = accessors_over(src).song_by_bts_members().unwrap();
    assert_eq!(ms.keys, ["RM", "SUGA"]);
    assert_eq!(ms.series[1].points[1].value, 7.0);
    assert_eq!(ms.dates.len(), 2);
}

#[test]
fn boyband_split_sorts_by_participation() {
    let files = StoryConfig::default().files;
    let mut src = MemorySource::new();
    src.insert(
        files.boyband_compose,
        "group,참여,비참여\nEXO,12.5,87.5\nBTS,60,40\nGOT7,30,70\n",
    );
    let recs = accessors_over(src).boyband_compose().unwrap();
    let groups: Vec<&str> = recs.iter().map(|r| r.fields["group"].as_str()).collect();
    assert_eq!(groups, ["BTS", "GOT7", "EXO"]);
    assert_eq!(recs[0].non_participation, 40.0);
}

#[test]
fn yearly_counts_keep_row_order() {
    let files = StoryConfig::default().files;
    let mut src = MemorySource::new();
    src.insert(files.make_own_song, "date,value\n2015,4\n2014,2\n");
    let vals = accessors_over(src).bts_make_own_song().unwrap();
    assert_eq!(vals[0].value, 4.0);
    assert_eq!(
        vals[1].date,
        Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn missing_column_is_a_data_error() {
    let files = StoryConfig::default().files;
    let mut src = MemorySource::new();
    src.insert(files.boyband_own_song, "date,BTS\n2019,1\n");
    let err = accessors_over(src).boyband_own_song().unwrap_err();
    assert!(err.to_string().starts_with("data error:"), "{err}");
    assert!(err.to_string().contains("EXO"));
}

#[test]
fn dir_source_reads_named_files() {
    let tmp = common::temp_dir("dir_source");
    std::fs::create_dir_all(&tmp).unwrap();
    let name = StoryConfig::default().files.compose_ratio;
    std::fs::write(tmp.join(&name), common::COMPOSE).unwrap();

    let src = DirSource::new(&tmp);
    assert_eq!(src.fetch(&name).unwrap().len(), 2);
    assert!(src.fetch("absent.csv").is_err());
    assert!(src.fetch("../escape.csv").is_err());

    std::fs::remove_dir_all(&tmp).ok();
}
