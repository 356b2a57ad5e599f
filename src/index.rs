use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::LoadError;
use crate::record::{DataRecord, FileKind, IndexRecord, Record, SynsetOffset, parse_line};

/// Dictionary files in load order. Later data files overwrite offsets already
/// defined by earlier ones, so this order is part of the observable behaviour.
pub const DICT_FILES: [&str; 8] = [
    "index.adj",
    "index.adv",
    "index.noun",
    "index.verb",
    "data.adj",
    "data.adv",
    "data.noun",
    "data.verb",
];

/// Word → synsets and synset → words, built once and then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    words: HashMap<String, Vec<SynsetOffset>>,
    synsets: HashMap<SynsetOffset, Vec<String>>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every file in [`DICT_FILES`] from `dict_dir`.
    ///
    /// The first unreadable file or malformed line aborts the load.
    pub fn load<P: AsRef<Path>>(dict_dir: P) -> Result<Arc<Self>, LoadError> {
        let dir = dict_dir.as_ref();
        let mut index = Self::new();

        for name in DICT_FILES {
            let path = dir.join(name);
            let kind = FileKind::from_file_name(name);
            let file = File::open(&path).map_err(|source| LoadError::MissingFile {
                path: path.clone(),
                source,
            })?;

            let mut records = 0usize;
            for (lineno, line) in BufReader::new(file).lines().enumerate() {
                let line = line.map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                })?;
                let record =
                    parse_line(&line, kind).map_err(|source| LoadError::MalformedRecord {
                        path: path.clone(),
                        line: lineno + 1,
                        source,
                    })?;
                match record {
                    Some(Record::Index(record)) => index.insert_index_record(record),
                    Some(Record::Data(record)) => index.insert_data_record(record),
                    None => continue,
                }
                records += 1;
            }
            info!("loaded {records} records from {name}");
        }

        info!(
            "indexed {} words across {} synsets",
            index.word_count(),
            index.synset_count()
        );
        Ok(Arc::new(index))
    }

    /// Set the offsets for a word. A word seen again replaces its earlier list.
    pub fn insert_index_record(&mut self, record: IndexRecord) {
        if let Some(previous) = self.words.insert(record.word, record.synset_offsets) {
            debug!("index word redefined, dropping {} offsets", previous.len());
        }
    }

    /// Set the member words of a synset. A repeated offset replaces its earlier list.
    pub fn insert_data_record(&mut self, record: DataRecord) {
        if self.synsets.insert(record.offset, record.words).is_some() {
            debug!("synset {} redefined", record.offset);
        }
    }

    /// Synonyms of `word` across all its synsets, first occurrence wins.
    ///
    /// Unknown words and offsets missing from the data files contribute
    /// nothing. Words keep the casing they have in the data files.
    pub fn synonyms_of(&self, word: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for offset in self.offsets(word) {
            for member in self.synset(*offset) {
                if seen.insert(member.as_str()) {
                    result.push(member.clone());
                }
            }
        }
        result
    }

    /// Offsets recorded for `word`, or an empty slice.
    pub fn offsets(&self, word: &str) -> &[SynsetOffset] {
        self.words.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Member words of one synset, or an empty slice if the offset is unknown.
    pub fn synset(&self, offset: SynsetOffset) -> &[String] {
        self.synsets
            .get(&offset)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }
}
