//! Standard parser facade
//!
//! Ties the stages together: tokenize, assemble envelopes, and dispatch
//! each transaction set to its registered binder. Binders are registered
//! once up front; `parse` takes `&self`, so a configured parser can be
//! shared freely across threads and documents.

use crate::assembler::EnvelopeAssembler;
use crate::registry::{TransactionSetParser, TransactionSetRegistry};
use crate::tokenizer::tokenize;
use crate::Result;
use x12_ir::StandardDocument;

/// Parser for standard X12 interchanges
#[derive(Default)]
pub struct StandardParser {
    registry: TransactionSetRegistry,
}

impl StandardParser {
    /// Create a parser with no transaction set binders registered.
    /// Unregistered codes still parse; they come back as
    /// [`x12_ir::UnhandledTransactionSet`].
    pub fn new() -> Self {
        Self {
            registry: TransactionSetRegistry::new(),
        }
    }

    /// Create a parser around an already-populated registry.
    pub fn with_registry(registry: TransactionSetRegistry) -> Self {
        Self { registry }
    }

    /// Register a binder for the transaction set code it reports.
    /// Registration must finish before the first parse; `parse` only
    /// reads the table.
    pub fn register_transaction_set_parser(
        &mut self,
        parser: impl TransactionSetParser + 'static,
    ) {
        self.registry.register(parser);
    }

    /// Parse one interchange.
    ///
    /// Empty or whitespace-only source is the defined empty case and
    /// yields `Ok(None)`. Structural defects inside the interchange do
    /// not fail the call; they are collected on the returned document.
    ///
    /// # Errors
    ///
    /// Fails only when the source cannot be tokenized: the first segment
    /// is not an ISA header, or the header cannot declare its delimiters.
    pub fn parse(&self, source: &str) -> Result<Option<StandardDocument>> {
        let Some(tokens) = tokenize(source)? else {
            return Ok(None);
        };
        let document = EnvelopeAssembler::new(&self.registry).assemble(tokens);
        Ok(Some(document))
    }
}
