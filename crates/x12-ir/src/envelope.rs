//! Interchange and functional group envelopes
//!
//! The outermost X12 nesting: an interchange (ISA/IEA) wraps functional
//! groups (GS/GE), each of which wraps transaction sets (ST/SE). The
//! structs here hold the positional header fields by name plus the
//! trailer's declared counts and control numbers; cross-checking the
//! declared values against what was actually observed happens in the
//! envelope assembler.

use crate::segment::Segment;
use crate::transaction::TransactionSet;
use serde::{Deserialize, Serialize};

/// Fixed-position fields of the ISA header and IEA trailer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterchangeEnvelope {
    /// ISA01 authorization information qualifier
    pub authorization_information_qualifier: Option<String>,
    /// ISA02 authorization information
    pub authorization_information: Option<String>,
    /// ISA03 security information qualifier
    pub security_information_qualifier: Option<String>,
    /// ISA04 security information
    pub security_information: Option<String>,
    /// ISA05 sender id qualifier
    pub interchange_id_qualifier: Option<String>,
    /// ISA06 sender id
    pub interchange_sender_id: Option<String>,
    /// ISA07 receiver id qualifier
    pub interchange_id_qualifier_two: Option<String>,
    /// ISA08 receiver id
    pub interchange_receiver_id: Option<String>,
    /// ISA09 interchange date (YYMMDD)
    pub interchange_date: Option<String>,
    /// ISA10 interchange time (HHMM)
    pub interchange_time: Option<String>,
    /// ISA11 control standard id
    pub interchange_control_standard_id: Option<String>,
    /// ISA12 control version number
    pub interchange_control_version: Option<String>,
    /// ISA13 interchange control number
    pub interchange_control_number: Option<String>,
    /// ISA14 acknowledgment requested flag
    pub acknowledgement_requested: Option<String>,
    /// ISA15 usage indicator (P production, T test)
    pub usage_indicator: Option<String>,
    /// ISA16 component element separator
    pub element_separator: Option<String>,
    /// IEA01 declared number of functional groups
    pub number_of_groups: Option<u32>,
    /// IEA02 interchange control number repeated in the trailer
    pub trailer_interchange_control_number: Option<String>,
}

impl InterchangeEnvelope {
    /// Segment id that opens an interchange.
    pub const HEADER_ID: &'static str = "ISA";
    /// Segment id that closes an interchange.
    pub const TRAILER_ID: &'static str = "IEA";
}

/// One functional group: GS/GE fields plus the transaction sets it owns
#[derive(Debug, Default)]
pub struct Group {
    /// GS01 functional identifier code (e.g. "SH" for shipment notices)
    pub functional_code: Option<String>,
    /// GS02 application sender's code
    pub application_sender_code: Option<String>,
    /// GS03 application receiver's code
    pub application_receiver_code: Option<String>,
    /// GS04 group date (CCYYMMDD)
    pub date: Option<String>,
    /// GS05 group time
    pub time: Option<String>,
    /// GS06 group control number
    pub header_group_control_number: Option<String>,
    /// GS07 responsible agency code
    pub responsible_agency_code: Option<String>,
    /// GS08 version / release / industry identifier code
    pub version: Option<String>,

    /// Transaction sets in document order.
    pub transactions: Vec<Box<dyn TransactionSet>>,

    /// Segments that appeared inside the group but outside any ST/SE pair.
    pub extra_segments: Vec<Segment>,

    /// GE01 declared number of transaction sets
    pub number_of_transactions: Option<u32>,
    /// GE02 group control number repeated in the trailer
    pub trailer_group_control_number: Option<String>,
}

impl Group {
    /// Segment id that opens a functional group.
    pub const HEADER_ID: &'static str = "GS";
    /// Segment id that closes a functional group.
    pub const TRAILER_ID: &'static str = "GE";

    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the header and trailer control numbers agree.
    pub fn control_numbers_match(&self) -> bool {
        self.header_group_control_number == self.trailer_group_control_number
    }
}
