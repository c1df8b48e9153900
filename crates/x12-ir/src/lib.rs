#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # x12-ir
//!
//! Document model for ANSI X12 interchanges.
//!
//! This crate provides the in-memory representation produced by parsing an
//! X12 payload: delimiter-separated segments, the interchange / functional
//! group / transaction set envelope nesting, and the hierarchical (HL) loop
//! forest reconstructed from a transaction set's flat segment sequence.
//! Parsing itself lives in `x12-parser`; transaction-set specific shapes
//! (such as the ASN 856 loops) live in their own crates and plug in through
//! the [`TransactionSet`] trait.

/// Top-level parsed document container.
pub mod document;
/// Interchange and functional group envelope field structs.
pub mod envelope;
/// Hierarchical loop nodes reconstructed from HL segments.
pub mod loops;
/// Segment and element primitives.
pub mod segment;
/// Delimiter set discovered from the interchange header.
pub mod syntax;
/// Transaction set envelope, trait, and unhandled fallback.
pub mod transaction;

/// Parsed document type.
pub use document::StandardDocument;
/// Envelope field structs.
pub use envelope::{Group, InterchangeEnvelope};
/// Hierarchical loop node.
pub use loops::HierarchicalLoop;
/// Segment primitive.
pub use segment::Segment;
/// Observed delimiter set.
pub use syntax::Separators;
/// Transaction set surface.
pub use transaction::{TransactionEnvelope, TransactionSet, UnhandledTransactionSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when working with the document model
#[derive(Error, Debug)]
pub enum Error {
    #[error("Element {index} not present in segment {segment_id}")]
    ElementNotFound { segment_id: String, index: usize },

    #[error("Invalid numeric value '{value}' for {field}")]
    InvalidNumber { field: String, value: String },
}

impl Error {
    /// Build an element-not-found error with segment context.
    pub fn element_not_found(segment_id: impl Into<String>, index: usize) -> Self {
        Self::ElementNotFound {
            segment_id: segment_id.into(),
            index,
        }
    }

    /// Build an invalid-number error with field context.
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Crate-local result type for document model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A recoverable structural defect found while assembling a document.
///
/// Structural defects (trailer count mismatches, unresolved HL parents)
/// are collected, never thrown: the best-effort document is still built
/// and callers inspect the accumulated details afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Id of the offending segment or loop (e.g. "HL", "SE").
    pub segment_id: String,

    /// Human-readable description of the defect.
    pub message: String,
}

impl ErrorDetail {
    /// Create a new structural error detail.
    pub fn new(segment_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            segment_id: segment_id.into(),
            message: message.into(),
        }
    }
}
