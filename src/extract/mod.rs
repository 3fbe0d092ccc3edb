//! Streaming extraction of listing records from raw JSON dumps.
//!
//! A dump is one large JSON document, often a single line, whose
//! interesting content is an array of listing objects under the `"cars"`
//! key. The stages here locate that array, cut it into per-object spans,
//! decode the spans that hold valid JSON, project them onto the fixed
//! output schema, and stream the result to CSV. No stage ever builds a
//! parse tree of the whole document.

pub mod decoder;
pub mod normalizer;
pub mod scanner;
pub mod writer;

pub use decoder::decode_span;
pub use normalizer::normalize;
pub use scanner::{find_array_start, ObjectSpans, ARRAY_MARKER};
pub use writer::CsvSink;
