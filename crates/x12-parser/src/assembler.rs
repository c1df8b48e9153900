//! Envelope assembly state machine
//!
//! Folds the flat segment stream into the interchange -> group ->
//! transaction set nesting. The machine is strict about the six envelope
//! markers (ISA/GS/ST/SE/GE/IEA) and their declared counts, and
//! permissive about everything else: a segment id it does not recognize
//! in the current state is appended to the innermost open container
//! instead of being rejected. Count and control number mismatches are
//! recorded on the document and never abort the build.

use crate::registry::TransactionSetRegistry;
use crate::tokenizer::TokenizedDocument;
use tracing::{debug, warn};
use x12_ir::{
    ErrorDetail, Group, InterchangeEnvelope, Segment, StandardDocument, TransactionEnvelope,
    TransactionSet, UnhandledTransactionSet,
};

/// Assembly states, driven by the envelope marker segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing open yet; an ISA header is expected.
    AwaitInterchange,
    /// Interchange open; a GS header (or the IEA trailer) is expected.
    AwaitGroup,
    /// Group open; an ST header (or the GE trailer) is expected.
    AwaitTransactionSet,
    /// Transaction set open; segments accumulate until the SE trailer.
    InTransactionSet,
    /// Transaction set closed; the next ST or the GE trailer may follow.
    AwaitGroupTrailer,
    /// Group closed; the next GS or the IEA trailer may follow.
    AwaitInterchangeTrailer,
}

/// Folds a tokenized segment stream into a [`StandardDocument`]
pub struct EnvelopeAssembler<'a> {
    registry: &'a TransactionSetRegistry,
    state: State,
    seen_interchange: bool,
    document: StandardDocument,
    current_group: Option<Group>,
    current_transaction: Vec<Segment>,
}

impl<'a> EnvelopeAssembler<'a> {
    /// Create an assembler that dispatches transaction sets through the
    /// given registry.
    pub fn new(registry: &'a TransactionSetRegistry) -> Self {
        Self {
            registry,
            state: State::AwaitInterchange,
            seen_interchange: false,
            document: StandardDocument::default(),
            current_group: None,
            current_transaction: Vec::new(),
        }
    }

    /// Consume the whole segment stream and return the assembled
    /// document together with any structural errors it accumulated.
    pub fn assemble(mut self, tokens: TokenizedDocument) -> StandardDocument {
        self.document.separators = tokens.separators;
        for segment in tokens.segments {
            self.consume(segment);
        }
        self.finalize()
    }

    fn consume(&mut self, segment: Segment) {
        let id = segment.id().to_string();
        match id.as_str() {
            InterchangeEnvelope::HEADER_ID
                if self.state == State::AwaitInterchange && !self.seen_interchange =>
            {
                self.document.interchange = interchange_from_header(&segment);
                self.seen_interchange = true;
                self.state = State::AwaitGroup;
                debug!(
                    control_number = ?self.document.interchange.interchange_control_number,
                    "opened interchange"
                );
            }
            Group::HEADER_ID
                if matches!(
                    self.state,
                    State::AwaitGroup | State::AwaitInterchangeTrailer
                ) =>
            {
                self.current_group = Some(group_from_header(&segment));
                self.state = State::AwaitTransactionSet;
            }
            TransactionEnvelope::HEADER_ID
                if matches!(
                    self.state,
                    State::AwaitTransactionSet | State::AwaitGroupTrailer
                ) =>
            {
                self.current_transaction.push(segment);
                self.state = State::InTransactionSet;
            }
            TransactionEnvelope::TRAILER_ID if self.state == State::InTransactionSet => {
                self.current_transaction.push(segment);
                self.close_transaction();
                self.state = State::AwaitGroupTrailer;
            }
            Group::TRAILER_ID
                if matches!(
                    self.state,
                    State::AwaitTransactionSet | State::AwaitGroupTrailer
                ) =>
            {
                self.close_group(&segment);
                self.state = State::AwaitInterchangeTrailer;
            }
            InterchangeEnvelope::TRAILER_ID
                if matches!(
                    self.state,
                    State::AwaitGroup | State::AwaitInterchangeTrailer
                ) =>
            {
                self.close_interchange(&segment);
                self.state = State::AwaitInterchange;
            }
            _ => self.bucket(segment),
        }
    }

    /// Anything unrecognized in the current state lands in the innermost
    /// open container.
    fn bucket(&mut self, segment: Segment) {
        match self.state {
            State::InTransactionSet => self.current_transaction.push(segment),
            State::AwaitTransactionSet | State::AwaitGroupTrailer => {
                match self.current_group.as_mut() {
                    Some(group) => group.extra_segments.push(segment),
                    None => self.document.extra_segments.push(segment),
                }
            }
            _ => self.document.extra_segments.push(segment),
        }
    }

    fn close_transaction(&mut self) {
        let segments = std::mem::take(&mut self.current_transaction);
        self.validate_transaction(&segments);

        let code = segments
            .first()
            .and_then(|st| st.non_empty_element(1))
            .unwrap_or("")
            .to_string();
        let transaction: Box<dyn TransactionSet> = match self.registry.get(&code) {
            Some(parser) => parser.parse(&segments),
            None => {
                debug!(%code, "no parser registered for transaction set");
                Box::new(UnhandledTransactionSet::new(segments))
            }
        };
        if let Some(group) = self.current_group.as_mut() {
            group.transactions.push(transaction);
        }
    }

    /// Cross-check the SE trailer against the segments actually consumed
    /// (the ST and SE markers count themselves).
    fn validate_transaction(&mut self, segments: &[Segment]) {
        let Some(trailer) = segments
            .iter()
            .rev()
            .find(|s| s.id() == TransactionEnvelope::TRAILER_ID)
        else {
            return;
        };

        let actual = segments.len();
        match trailer.non_empty_element(1).map(str::parse::<usize>) {
            Some(Ok(declared)) if declared == actual => {}
            Some(Ok(declared)) => self.record_error(ErrorDetail::new(
                TransactionEnvelope::TRAILER_ID,
                format!("transaction set declared {declared} segments but contained {actual}"),
            )),
            Some(Err(_)) | None => self.record_error(ErrorDetail::new(
                TransactionEnvelope::TRAILER_ID,
                "transaction set trailer has no usable segment count".to_string(),
            )),
        }

        let header_control = segments
            .first()
            .filter(|st| st.id() == TransactionEnvelope::HEADER_ID)
            .and_then(|st| st.non_empty_element(2));
        let trailer_control = trailer.non_empty_element(2);
        if let (Some(header), Some(se)) = (header_control, trailer_control) {
            if header != se {
                self.record_error(ErrorDetail::new(
                    TransactionEnvelope::TRAILER_ID,
                    format!("transaction set control number mismatch: ST '{header}', SE '{se}'"),
                ));
            }
        }
    }

    fn close_group(&mut self, trailer: &Segment) {
        let Some(mut group) = self.current_group.take() else {
            return;
        };

        group.trailer_group_control_number = trailer.non_empty_element(2).map(str::to_string);

        let actual = group.transactions.len();
        match trailer.non_empty_element(1).map(str::parse::<u32>) {
            Some(Ok(declared)) => {
                group.number_of_transactions = Some(declared);
                if declared as usize != actual {
                    self.record_error(ErrorDetail::new(
                        Group::TRAILER_ID,
                        format!("group declared {declared} transaction sets but contained {actual}"),
                    ));
                }
            }
            Some(Err(_)) | None => self.record_error(ErrorDetail::new(
                Group::TRAILER_ID,
                "group trailer has no usable transaction set count".to_string(),
            )),
        }

        if !group.control_numbers_match() {
            let header = group.header_group_control_number.as_deref().unwrap_or("");
            let in_trailer = group.trailer_group_control_number.as_deref().unwrap_or("");
            self.record_error(ErrorDetail::new(
                Group::TRAILER_ID,
                format!("group control number mismatch: GS '{header}', GE '{in_trailer}'"),
            ));
        }

        debug!(transactions = actual, "closed functional group");
        self.document.groups.push(group);
    }

    fn close_interchange(&mut self, trailer: &Segment) {
        self.document.interchange.trailer_interchange_control_number =
            trailer.non_empty_element(2).map(str::to_string);

        let actual = self.document.groups.len();
        match trailer.non_empty_element(1).map(str::parse::<u32>) {
            Some(Ok(declared)) => {
                self.document.interchange.number_of_groups = Some(declared);
                if declared as usize != actual {
                    self.record_error(ErrorDetail::new(
                        InterchangeEnvelope::TRAILER_ID,
                        format!("interchange declared {declared} groups but contained {actual}"),
                    ));
                }
            }
            Some(Err(_)) | None => self.record_error(ErrorDetail::new(
                InterchangeEnvelope::TRAILER_ID,
                "interchange trailer has no usable group count".to_string(),
            )),
        }
    }

    fn finalize(mut self) -> StandardDocument {
        if self.state == State::InTransactionSet {
            self.record_error(ErrorDetail::new(
                TransactionEnvelope::TRAILER_ID,
                "transaction set is missing its SE trailer".to_string(),
            ));
            self.close_transaction();
            self.state = State::AwaitGroupTrailer;
        }

        if let Some(group) = self.current_group.take() {
            self.record_error(ErrorDetail::new(
                Group::TRAILER_ID,
                "functional group is missing its GE trailer".to_string(),
            ));
            self.document.groups.push(group);
            self.state = State::AwaitInterchangeTrailer;
        }

        if self.seen_interchange && self.state != State::AwaitInterchange {
            self.record_error(ErrorDetail::new(
                InterchangeEnvelope::TRAILER_ID,
                "interchange is missing its IEA trailer".to_string(),
            ));
        }

        self.document
    }

    fn record_error(&mut self, error: ErrorDetail) {
        warn!(segment = %error.segment_id, message = %error.message, "structural error");
        self.document.structural_errors.push(error);
    }
}

fn interchange_from_header(header: &Segment) -> InterchangeEnvelope {
    let field = |index: usize| header.non_empty_element(index).map(str::to_string);
    InterchangeEnvelope {
        authorization_information_qualifier: field(1),
        authorization_information: field(2),
        security_information_qualifier: field(3),
        security_information: field(4),
        interchange_id_qualifier: field(5),
        interchange_sender_id: field(6),
        interchange_id_qualifier_two: field(7),
        interchange_receiver_id: field(8),
        interchange_date: field(9),
        interchange_time: field(10),
        interchange_control_standard_id: field(11),
        interchange_control_version: field(12),
        interchange_control_number: field(13),
        acknowledgement_requested: field(14),
        usage_indicator: field(15),
        element_separator: field(16),
        number_of_groups: None,
        trailer_interchange_control_number: None,
    }
}

fn group_from_header(header: &Segment) -> Group {
    let field = |index: usize| header.non_empty_element(index).map(str::to_string);
    Group {
        functional_code: field(1),
        application_sender_code: field(2),
        application_receiver_code: field(3),
        date: field(4),
        time: field(5),
        header_group_control_number: field(6),
        responsible_agency_code: field(7),
        version: field(8),
        ..Group::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x12_ir::Separators;

    fn tokens(raw: &[&str]) -> TokenizedDocument {
        TokenizedDocument {
            separators: Separators::default(),
            segments: raw
                .iter()
                .map(|s| Segment::new(s.split('*').map(str::to_string).collect()))
                .collect(),
        }
    }

    fn assemble(raw: &[&str]) -> StandardDocument {
        let registry = TransactionSetRegistry::new();
        EnvelopeAssembler::new(&registry).assemble(tokens(raw))
    }

    const WELL_FORMED: &[&str] = &[
        "ISA*01*0000000000*01*0000000000*ZZ*SENDER*ZZ*RECEIVER*101127*1719*U*00400*000003438*0*P*>",
        "GS*SH*4405197800*999999999*20111206*1045*49*X*004060",
        "ST*856*0008",
        "BSN*14*829716*20111206*142428*0002",
        "SE*3*0008",
        "GE*1*49",
        "IEA*1*000003438",
    ];

    #[test]
    fn test_well_formed_interchange_has_no_errors() {
        let doc = assemble(WELL_FORMED);
        assert!(doc.is_structurally_valid(), "{:?}", doc.structural_errors);
        assert_eq!(doc.groups.len(), 1);
        assert_eq!(doc.groups[0].transactions.len(), 1);
    }

    #[test]
    fn test_interchange_header_fields() {
        let doc = assemble(WELL_FORMED);
        let isa = &doc.interchange;
        assert_eq!(isa.authorization_information_qualifier.as_deref(), Some("01"));
        assert_eq!(isa.interchange_sender_id.as_deref(), Some("SENDER"));
        assert_eq!(isa.interchange_receiver_id.as_deref(), Some("RECEIVER"));
        assert_eq!(isa.usage_indicator.as_deref(), Some("P"));
        assert_eq!(isa.element_separator.as_deref(), Some(">"));
        assert_eq!(isa.number_of_groups, Some(1));
        assert_eq!(
            isa.trailer_interchange_control_number.as_deref(),
            Some("000003438")
        );
    }

    #[test]
    fn test_group_header_and_trailer_fields() {
        let doc = assemble(WELL_FORMED);
        let group = &doc.groups[0];
        assert_eq!(group.functional_code.as_deref(), Some("SH"));
        assert_eq!(group.application_sender_code.as_deref(), Some("4405197800"));
        assert_eq!(group.header_group_control_number.as_deref(), Some("49"));
        assert_eq!(group.trailer_group_control_number.as_deref(), Some("49"));
        assert_eq!(group.number_of_transactions, Some(1));
        assert_eq!(group.version.as_deref(), Some("004060"));
    }

    #[test]
    fn test_unregistered_code_falls_back_to_unhandled() {
        let doc = assemble(WELL_FORMED);
        let tx = &doc.groups[0].transactions[0];
        assert_eq!(tx.identifier_code(), "856");
        assert_eq!(tx.header_control_number(), Some("0008"));
        assert_eq!(tx.expected_number_of_segments(), Some(3));
        assert_eq!(tx.trailer_control_number(), Some("0008"));
        let unhandled = tx
            .as_any()
            .downcast_ref::<UnhandledTransactionSet>()
            .expect("fallback type");
        assert_eq!(unhandled.segments.len(), 3);
    }

    #[test]
    fn test_segment_count_mismatch_is_recorded() {
        let mut raw = WELL_FORMED.to_vec();
        raw[4] = "SE*31*0008";
        let doc = assemble(&raw);
        assert!(!doc.is_structurally_valid());
        assert_eq!(doc.structural_errors.len(), 1);
        assert_eq!(doc.structural_errors[0].segment_id, "SE");
        assert_eq!(
            doc.structural_errors[0].message,
            "transaction set declared 31 segments but contained 3"
        );
        // The transaction set itself is kept.
        assert_eq!(doc.groups[0].transactions.len(), 1);
    }

    #[test]
    fn test_transaction_control_number_mismatch_is_recorded() {
        let mut raw = WELL_FORMED.to_vec();
        raw[4] = "SE*3*0009";
        let doc = assemble(&raw);
        assert_eq!(doc.structural_errors.len(), 1);
        assert!(
            doc.structural_errors[0]
                .message
                .contains("ST '0008', SE '0009'")
        );
    }

    #[test]
    fn test_group_count_mismatch_is_recorded() {
        let mut raw = WELL_FORMED.to_vec();
        raw[5] = "GE*2*49";
        let doc = assemble(&raw);
        assert_eq!(doc.structural_errors.len(), 1);
        assert_eq!(
            doc.structural_errors[0].message,
            "group declared 2 transaction sets but contained 1"
        );
    }

    #[test]
    fn test_group_control_number_mismatch_is_recorded() {
        let mut raw = WELL_FORMED.to_vec();
        raw[5] = "GE*1*50";
        let doc = assemble(&raw);
        assert_eq!(doc.structural_errors.len(), 1);
        assert!(
            doc.structural_errors[0]
                .message
                .contains("GS '49', GE '50'")
        );
    }

    #[test]
    fn test_interchange_group_count_mismatch_is_recorded() {
        let mut raw = WELL_FORMED.to_vec();
        raw[6] = "IEA*3*000003438";
        let doc = assemble(&raw);
        assert!(!doc.is_structurally_valid());
        assert_eq!(
            doc.structural_errors[0].message,
            "interchange declared 3 groups but contained 1"
        );
        // Best-effort structure survives.
        assert_eq!(doc.groups.len(), 1);
        assert_eq!(doc.interchange.number_of_groups, Some(3));
    }

    #[test]
    fn test_missing_trailers_are_recorded_best_effort() {
        let doc = assemble(&WELL_FORMED[0..4]);
        let ids: Vec<&str> = doc
            .structural_errors
            .iter()
            .map(|e| e.segment_id.as_str())
            .collect();
        assert_eq!(ids, vec!["SE", "GE", "IEA"]);
        // The open transaction set and group were still kept.
        assert_eq!(doc.groups.len(), 1);
        assert_eq!(doc.groups[0].transactions.len(), 1);
    }

    #[test]
    fn test_multiple_transaction_sets_keep_document_order() {
        let raw = &[
            WELL_FORMED[0],
            WELL_FORMED[1],
            "ST*856*0001",
            "BSN*00*111111*20111206*142428",
            "SE*3*0001",
            "ST*856*0002",
            "BSN*00*222222*20111206*142428",
            "SE*3*0002",
            "GE*2*49",
            "IEA*1*000003438",
        ];
        let doc = assemble(raw);
        assert!(doc.is_structurally_valid(), "{:?}", doc.structural_errors);
        let controls: Vec<Option<&str>> = doc.groups[0]
            .transactions
            .iter()
            .map(|tx| tx.header_control_number())
            .collect();
        assert_eq!(controls, vec![Some("0001"), Some("0002")]);
    }

    #[test]
    fn test_segment_between_envelopes_is_bucketed() {
        let raw = &[
            WELL_FORMED[0],
            "TA1*000003438*101127*1719*A*000",
            WELL_FORMED[1],
            WELL_FORMED[2],
            WELL_FORMED[3],
            WELL_FORMED[4],
            "XYZ*stray",
            WELL_FORMED[5],
            WELL_FORMED[6],
        ];
        let doc = assemble(raw);
        assert!(doc.is_structurally_valid(), "{:?}", doc.structural_errors);
        assert_eq!(doc.extra_segments.len(), 1);
        assert_eq!(doc.extra_segments[0].id(), "TA1");
        assert_eq!(doc.groups[0].extra_segments.len(), 1);
        assert_eq!(doc.groups[0].extra_segments[0].id(), "XYZ");
    }
}
