//! # x12-parser
//!
//! Parsing engine for ANSI X12 interchanges.
//!
//! The engine runs in three stages over one in-memory source string:
//! the tokenizer discovers the delimiters from the interchange header and
//! splits the text into segments, the envelope assembler folds the
//! segment stream into the interchange / group / transaction set nesting
//! while cross-checking trailer counts, and registered transaction-set
//! binders turn each ST..SE range into a typed document. Recoverable
//! structural defects are collected on the result; only an unusable
//! interchange header is a hard failure.

pub mod assembler;
pub mod hierarchy;
pub mod parser;
pub mod registry;
pub mod tokenizer;

pub use hierarchy::{LoopResolution, find_hierarchical_loops};
pub use parser::StandardParser;
pub use registry::{TransactionSetParser, TransactionSetRegistry};
pub use tokenizer::{TokenizedDocument, tokenize};

use thiserror::Error;

/// Fatal failures while parsing an interchange
///
/// Structural problems inside an interchange (count mismatches, missing
/// HL parents) are not errors at this level; they are collected on the
/// document. Only a source that cannot be tokenized at all fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Document must begin with an ISA interchange header")]
    MissingInterchangeHeader,

    #[error("Malformed ISA interchange header: {0}")]
    MalformedInterchangeHeader(String),
}

pub type Result<T> = std::result::Result<T, Error>;
