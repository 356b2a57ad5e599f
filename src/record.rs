//! Line-level parsing for the WordNet `index.*` and `data.*` files.
//!
//! Only the fields needed for synonym lookup are kept: the lemma and its
//! synset offsets from index lines, and the offset and member words from data
//! lines. Pointer blocks, frames and glosses are skipped without validation.

use crate::error::RecordError;

/// Byte offset of a synset record inside its data file.
pub type SynsetOffset = u32;

/// Fixed fields before the pointer symbols on an index line:
/// `lemma pos synset_cnt p_cnt`.
const INDEX_HEAD_FIELDS: usize = 4;
/// `sense_cnt tagsense_cnt`, which sit between the pointer symbols and the offsets.
const INDEX_SENSE_FIELDS: usize = 2;
/// `synset_offset lex_filenum ss_type w_cnt` before the word list on a data line.
const DATA_HEAD_FIELDS: usize = 4;

/// Which family a dictionary file belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileKind {
    Index,
    Data,
}

impl FileKind {
    /// Classify a dictionary file by its name: `index.*` files are indices,
    /// everything else is treated as data.
    pub fn from_file_name(name: &str) -> Self {
        if name.starts_with("index") {
            FileKind::Index
        } else {
            FileKind::Data
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexRecord {
    pub word: String,
    pub synset_offsets: Vec<SynsetOffset>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataRecord {
    pub offset: SynsetOffset,
    pub words: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Record {
    Index(IndexRecord),
    Data(DataRecord),
}

/// Parse one line of a dictionary file.
///
/// Returns `Ok(None)` for license header lines (two leading spaces) and blank
/// lines. Any numeric field that does not parse, or a line shorter than its
/// declared counts, is an error.
pub fn parse_line(line: &str, kind: FileKind) -> Result<Option<Record>, RecordError> {
    if line.starts_with("  ") || line.trim().is_empty() {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    let record = match kind {
        FileKind::Index => Record::Index(parse_index_fields(&fields)?),
        FileKind::Data => Record::Data(parse_data_fields(&fields)?),
    };
    Ok(Some(record))
}

fn parse_index_fields(fields: &[&str]) -> Result<IndexRecord, RecordError> {
    require_fields(fields, INDEX_HEAD_FIELDS)?;
    let synset_cnt = parse_decimal(fields[2], "synset_cnt")? as usize;
    let p_cnt = parse_decimal(fields[3], "p_cnt")? as usize;

    let start = INDEX_HEAD_FIELDS + p_cnt + INDEX_SENSE_FIELDS;
    require_fields(fields, start + synset_cnt)?;
    let synset_offsets = fields[start..start + synset_cnt]
        .iter()
        .map(|field| parse_decimal(field, "synset_offset"))
        .collect::<Result<_, _>>()?;

    Ok(IndexRecord {
        word: fields[0].to_lowercase(),
        synset_offsets,
    })
}

fn parse_data_fields(fields: &[&str]) -> Result<DataRecord, RecordError> {
    require_fields(fields, DATA_HEAD_FIELDS)?;
    let offset = parse_decimal(fields[0], "synset_offset")?;
    let w_cnt = u32::from_str_radix(fields[3], 16).map_err(|_| RecordError::InvalidNumber {
        field: "w_cnt",
        value: fields[3].to_string(),
    })? as usize;

    // Each word is followed by its lex_id, which is not needed here.
    let end = DATA_HEAD_FIELDS + 2 * w_cnt;
    require_fields(fields, end)?;
    let words = fields[DATA_HEAD_FIELDS..end]
        .iter()
        .step_by(2)
        .map(|word| word.to_string())
        .collect();

    Ok(DataRecord { offset, words })
}

fn require_fields(fields: &[&str], expected: usize) -> Result<(), RecordError> {
    if fields.len() < expected {
        return Err(RecordError::TooFewFields {
            expected,
            got: fields.len(),
        });
    }
    Ok(())
}

fn parse_decimal(value: &str, field: &'static str) -> Result<u32, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
