//! bargain-ingest: field extractors over free text and record normalization into offers/baselines.

pub mod parsers;
pub mod normalize;

pub use parsers::{normalize_text, ExtractedFields, FieldExtractor};
pub use normalize::RecordNormalizer;
