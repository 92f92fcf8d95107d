//! Tokenizer module: boundary scanning, tag tokenizing and entity decoding.

/// Byte-level helpers for scanning.
pub mod helpers;
/// Named character reference lookup table.
pub mod named_character_references;
/// Tag boundary scanner.
pub mod scanner;
/// Tag and attribute tokenizer.
pub mod tag;

pub use named_character_references::{decode, lookup_entity};
pub use scanner::{Boundary, TagScanner};
pub use tag::{RawAttribute, RawAttributes, Tag, VOID_TAG, tokenize_tag};
