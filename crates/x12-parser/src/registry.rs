//! Transaction set parser registry
//!
//! Each transaction set code ("856", "850", ...) is bound by its own
//! parser implementation. The registry is a plain lookup table populated
//! before parsing begins; `StandardParser::parse` only ever reads it
//! through a shared reference, so once parsing starts the table is
//! effectively immutable and safe to share across threads.

use std::collections::HashMap;
use x12_ir::{Segment, TransactionSet};

/// Binder for one transaction set code
pub trait TransactionSetParser: Send + Sync {
    /// The transaction set identifier this parser handles (e.g. "856").
    fn transaction_set_code(&self) -> &str;

    /// Bind one transaction set's segment range (ST and SE included)
    /// into its typed representation.
    fn parse(&self, segments: &[Segment]) -> Box<dyn TransactionSet>;
}

/// Lookup table from transaction set code to its registered parser
#[derive(Default)]
pub struct TransactionSetRegistry {
    parsers: HashMap<String, Box<dyn TransactionSetParser>>,
}

impl TransactionSetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register a parser under the code it reports. A later registration
    /// for the same code replaces the earlier one.
    pub fn register(&mut self, parser: impl TransactionSetParser + 'static) {
        self.parsers
            .insert(parser.transaction_set_code().to_string(), Box::new(parser));
    }

    /// Look up the parser for a transaction set code.
    pub fn get(&self, code: &str) -> Option<&dyn TransactionSetParser> {
        self.parsers.get(code).map(|parser| parser.as_ref())
    }

    /// Check if a code has a registered parser.
    pub fn contains(&self, code: &str) -> bool {
        self.parsers.contains_key(code)
    }
}
