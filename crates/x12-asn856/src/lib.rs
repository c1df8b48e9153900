//! # x12-asn856
//!
//! ASN 856 (Advance Shipment Notice) transaction set binder.
//!
//! Register [`AsnTransactionSetParser`] with a
//! [`StandardParser`](x12_parser::StandardParser) to get typed 856
//! documents: the BSN shipment header plus the hierarchical loop forest
//! bound into shipment / order / tare / pack / item shapes.
//!
//! ```rust
//! use x12_asn856::AsnTransactionSetParser;
//! use x12_parser::StandardParser;
//!
//! let mut parser = StandardParser::new();
//! parser.register_transaction_set_parser(AsnTransactionSetParser::new());
//!
//! assert!(parser.parse("").unwrap().is_none());
//! ```

pub mod loops;
pub mod parser;
pub mod segments;

pub use loops::{AsnLoop, Item, Order, Pack, Shipment, Tare, UnparsedLoop};
pub use parser::{AsnTransactionSet, AsnTransactionSetParser};
