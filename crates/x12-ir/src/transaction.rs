//! Transaction set surface
//!
//! A transaction set is one business document instance (an 856 shipment
//! notice, an 850 purchase order, ...) between ST and SE markers. The
//! engine stays open to new document types through the [`TransactionSet`]
//! trait: each registered binder produces its own concrete type, and
//! callers narrow back to it with [`TransactionSet::as_any`]. Codes with
//! no registered binder fall back to [`UnhandledTransactionSet`], which
//! keeps the raw segments.

use crate::ErrorDetail;
use crate::segment::Segment;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// ST/SE control fields shared by every transaction set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    /// ST01 transaction set identifier code (e.g. "856")
    pub identifier_code: String,
    /// ST02 header control number
    pub header_control_number: Option<String>,
    /// SE01 declared number of segments, ST and SE included
    pub expected_number_of_segments: Option<u32>,
    /// SE02 control number repeated in the trailer
    pub trailer_control_number: Option<String>,
}

impl TransactionEnvelope {
    /// Segment id that opens a transaction set.
    pub const HEADER_ID: &'static str = "ST";
    /// Segment id that closes a transaction set.
    pub const TRAILER_ID: &'static str = "SE";

    /// Extract the envelope fields from a transaction set's segment range
    /// (the first ST and the last SE, when present).
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut envelope = Self::default();
        if let Some(st) = segments.iter().find(|s| s.id() == Self::HEADER_ID) {
            envelope.identifier_code = st.element(1).unwrap_or("").to_string();
            envelope.header_control_number = st.non_empty_element(2).map(str::to_string);
        }
        if let Some(se) = segments.iter().rev().find(|s| s.id() == Self::TRAILER_ID) {
            envelope.expected_number_of_segments =
                se.non_empty_element(1).and_then(|v| v.parse().ok());
            envelope.trailer_control_number = se.non_empty_element(2).map(str::to_string);
        }
        envelope
    }
}

/// Common surface of every parsed transaction set
pub trait TransactionSet: fmt::Debug + Send + Sync {
    /// ST01 identifier code.
    fn identifier_code(&self) -> &str;

    /// ST02 header control number.
    fn header_control_number(&self) -> Option<&str>;

    /// SE01 declared segment count.
    fn expected_number_of_segments(&self) -> Option<u32>;

    /// SE02 trailer control number.
    fn trailer_control_number(&self) -> Option<&str>;

    /// Whether the hierarchical loop structure resolved cleanly.
    fn looping_valid(&self) -> bool {
        true
    }

    /// Loop resolution defects in discovery order; `None` when valid.
    fn looping_errors(&self) -> Option<&[ErrorDetail]> {
        None
    }

    /// Narrowing hook: downcast to the concrete registered type.
    fn as_any(&self) -> &dyn Any;
}

/// Fallback for transaction set codes with no registered binder
///
/// Retains the raw segment range (ST and SE included) so callers can
/// still inspect documents the registry was not configured for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnhandledTransactionSet {
    /// ST/SE control fields.
    pub envelope: TransactionEnvelope,
    /// The unbound segment range, in source order.
    pub segments: Vec<Segment>,
}

impl UnhandledTransactionSet {
    /// Wrap a raw transaction set segment range.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            envelope: TransactionEnvelope::from_segments(&segments),
            segments,
        }
    }
}

impl TransactionSet for UnhandledTransactionSet {
    fn identifier_code(&self) -> &str {
        &self.envelope.identifier_code
    }

    fn header_control_number(&self) -> Option<&str> {
        self.envelope.header_control_number.as_deref()
    }

    fn expected_number_of_segments(&self) -> Option<u32> {
        self.envelope.expected_number_of_segments
    }

    fn trailer_control_number(&self) -> Option<&str> {
        self.envelope.trailer_control_number.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
