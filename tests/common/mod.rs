#![allow(dead_code)]

use std::cell::RefCell;

use scrollyviz::{DataSource, MemorySource, ScrollyResult, StoryConfig, Table};

pub const COMPOSE: &str = "name,value\n멤버 작곡 참여 비율,70\n멤버 작곡 비참여 비율,30\n";
pub const WRITE: &str = "name,value\n멤버 작사 참여 비율,92.5\n멤버 작사 비참여 비율,7.5\n";
pub const BOYBAND: &str = "date,BTS,EXO,GOT7\n2019-01-01,12,1,4\n2018-01-01,10,2,3\n";
pub const MEMBERS: &str =
    "date,member,value\n2018-01-01,RM,5\n2019-01-01,RM,6\n2018-01-01,SUGA,4\n2019-01-01,SUGA,7\n";

/// A source holding every table the default configuration names.
pub fn full_source() -> MemorySource {
    let files = StoryConfig::default().files;
    let mut src = MemorySource::new();
    src.insert(files.compose_ratio, COMPOSE)
        .insert(files.write_ratio, WRITE)
        .insert(files.boyband_own_song, BOYBAND)
        .insert(files.member_songs, MEMBERS);
    src
}

/// Records every fetched name.
pub struct CountingSource<S> {
    pub inner: S,
    pub fetched: RefCell<Vec<String>>,
}

impl<S> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fetched: RefCell::new(Vec::new()),
        }
    }

    pub fn count(&self) -> usize {
        self.fetched.borrow().len()
    }
}

impl<S: DataSource> DataSource for CountingSource<S> {
    fn fetch(&self, name: &str) -> ScrollyResult<Table> {
        self.fetched.borrow_mut().push(name.to_owned());
        self.inner.fetch(name)
    }
}

pub fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "scrollyviz_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}
