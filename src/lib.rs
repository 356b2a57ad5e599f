pub mod error;
pub mod handlers;
pub mod index;
pub mod record;
pub mod tokenize;

pub use error::{LoadError, RecordError};
pub use handlers::{AppState, router};
pub use index::{DICT_FILES, Index};
pub use record::{DataRecord, FileKind, IndexRecord, Record, SynsetOffset, parse_line};
pub use tokenize::{STOPWORDS, tokenize};
