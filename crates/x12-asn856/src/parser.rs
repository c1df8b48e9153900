//! ASN 856 transaction set binder
//!
//! Binds one ST..SE segment range of an 856 into [`AsnTransactionSet`]:
//! the ST/SE envelope, the BSN beginning segment, and the hierarchical
//! loop forest bound into the typed shipment/order/tare/pack/item
//! shapes. Binding assumes the envelope assembler already cross-checked
//! the trailer counts; the only validation added here is the loop
//! resolution performed by the hierarchy builder.

use crate::loops::{AsnLoop, Shipment, bind_loop};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::debug;
use x12_ir::{
    ErrorDetail, HierarchicalLoop, Segment, TransactionEnvelope, TransactionSet,
};
use x12_parser::{TransactionSetParser, find_hierarchical_loops};

/// One parsed 856 Advance Shipment Notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsnTransactionSet {
    /// ST/SE control fields.
    pub envelope: TransactionEnvelope,

    /// BSN01 transaction set purpose code (e.g. "14" previously transmitted)
    pub purpose_code: Option<String>,
    /// BSN02 shipment identification
    pub shipment_identification: Option<String>,
    /// BSN03 shipment date
    pub shipment_date: Option<String>,
    /// BSN04 shipment time
    pub shipment_time: Option<String>,
    /// BSN05 hierarchical structure code (e.g. "0002" shipment/order/item)
    pub hierarchical_structure_code: Option<String>,

    /// Whether the HL loop structure resolved cleanly.
    pub looping_valid: bool,
    /// Loop resolution defects in discovery order; `None` when valid.
    pub looping_errors: Option<Vec<ErrorDetail>>,

    /// Bound root loops in document order. A well-formed 856 has a
    /// single shipment root; orphaned loops surface as extra roots.
    pub loops: Vec<AsnLoop>,
}

impl Default for AsnTransactionSet {
    fn default() -> Self {
        Self {
            envelope: TransactionEnvelope::default(),
            purpose_code: None,
            shipment_identification: None,
            shipment_date: None,
            shipment_time: None,
            hierarchical_structure_code: None,
            looping_valid: true,
            looping_errors: None,
            loops: Vec::new(),
        }
    }
}

impl AsnTransactionSet {
    /// Transaction set identifier for an Advance Shipment Notice.
    pub const TRANSACTION_SET_CODE: &'static str = "856";
    /// Id of the beginning segment carrying the shipment header fields.
    pub const BEGINNING_SEGMENT_ID: &'static str = "BSN";

    /// The shipment root, when the first bound root is one.
    pub fn shipment(&self) -> Option<&Shipment> {
        self.loops.first().and_then(AsnLoop::as_shipment)
    }
}

impl TransactionSet for AsnTransactionSet {
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

    fn looping_valid(&self) -> bool {
        self.looping_valid
    }

    fn looping_errors(&self) -> Option<&[ErrorDetail]> {
        self.looping_errors.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registered binder for the 856 transaction set
#[derive(Debug, Default)]
pub struct AsnTransactionSetParser;

impl AsnTransactionSetParser {
    /// Create a new 856 binder.
    pub fn new() -> Self {
        Self
    }
}

impl TransactionSetParser for AsnTransactionSetParser {
    fn transaction_set_code(&self) -> &str {
        AsnTransactionSet::TRANSACTION_SET_CODE
    }

    fn parse(&self, segments: &[Segment]) -> Box<dyn TransactionSet> {
        let mut transaction = AsnTransactionSet {
            envelope: TransactionEnvelope::from_segments(segments),
            ..AsnTransactionSet::default()
        };

        if let Some(bsn) = segments
            .iter()
            .find(|s| s.id() == AsnTransactionSet::BEGINNING_SEGMENT_ID)
        {
            transaction.purpose_code = bsn.non_empty_element(1).map(str::to_string);
            transaction.shipment_identification = bsn.non_empty_element(2).map(str::to_string);
            transaction.shipment_date = bsn.non_empty_element(3).map(str::to_string);
            transaction.shipment_time = bsn.non_empty_element(4).map(str::to_string);
            transaction.hierarchical_structure_code =
                bsn.non_empty_element(5).map(str::to_string);
        }

        if let Some(start) = segments
            .iter()
            .position(|s| s.id() == HierarchicalLoop::SEGMENT_ID)
        {
            let end = segments
                .iter()
                .rposition(|s| s.id() == TransactionEnvelope::TRAILER_ID)
                .unwrap_or(segments.len())
                .max(start);

            let resolution = find_hierarchical_loops(&segments[start..end]);
            transaction.looping_valid = resolution.is_valid();
            transaction.loops = resolution.loops.into_iter().map(bind_loop).collect();
            if !resolution.errors.is_empty() {
                transaction.looping_errors = Some(resolution.errors);
            }
        }

        debug!(
            shipment_id = ?transaction.shipment_identification,
            roots = transaction.loops.len(),
            valid = transaction.looping_valid,
            "bound 856 transaction set"
        );
        Box::new(transaction)
    }
}
