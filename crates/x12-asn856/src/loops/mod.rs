//! Typed 856 loops
//!
//! An 856 nests its hierarchical loops as shipment -> order -> tare ->
//! pack -> item, each identified by its HL level code. Binding converts
//! the generic loop forest into this closed set of variants; a level
//! code the binder does not recognize passes through as [`UnparsedLoop`]
//! with its raw segments intact and its children still bound.

mod item;
mod order;
mod pack;
mod shipment;
mod tare;

pub use item::Item;
pub use order::Order;
pub use pack::Pack;
pub use shipment::Shipment;
pub use tare::Tare;

use serde::{Deserialize, Serialize};
use x12_ir::{HierarchicalLoop, Segment};

/// One bound loop of an 856 document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsnLoop {
    Shipment(Shipment),
    Order(Order),
    Tare(Tare),
    Pack(Pack),
    Item(Item),
    /// A loop whose level code has no typed shape.
    Unparsed(UnparsedLoop),
}

impl AsnLoop {
    /// The loop's hierarchical id.
    pub fn hierarchical_id(&self) -> &str {
        match self {
            Self::Shipment(l) => &l.id,
            Self::Order(l) => &l.id,
            Self::Tare(l) => &l.id,
            Self::Pack(l) => &l.id,
            Self::Item(l) => &l.id,
            Self::Unparsed(l) => &l.id,
        }
    }

    /// The loop's level code.
    pub fn code(&self) -> &str {
        match self {
            Self::Shipment(_) => Shipment::CODE,
            Self::Order(_) => Order::CODE,
            Self::Tare(_) => Tare::CODE,
            Self::Pack(_) => Pack::CODE,
            Self::Item(_) => Item::CODE,
            Self::Unparsed(l) => &l.code,
        }
    }

    /// Bound child loops in document order.
    pub fn children(&self) -> &[AsnLoop] {
        match self {
            Self::Shipment(l) => &l.loops,
            Self::Order(l) => &l.loops,
            Self::Tare(l) => &l.loops,
            Self::Pack(l) => &l.loops,
            Self::Item(l) => &l.loops,
            Self::Unparsed(l) => &l.loops,
        }
    }

    /// Narrow to a shipment loop.
    pub fn as_shipment(&self) -> Option<&Shipment> {
        match self {
            Self::Shipment(l) => Some(l),
            _ => None,
        }
    }

    /// Narrow to an order loop.
    pub fn as_order(&self) -> Option<&Order> {
        match self {
            Self::Order(l) => Some(l),
            _ => None,
        }
    }

    /// Narrow to a tare loop.
    pub fn as_tare(&self) -> Option<&Tare> {
        match self {
            Self::Tare(l) => Some(l),
            _ => None,
        }
    }

    /// Narrow to a pack loop.
    pub fn as_pack(&self) -> Option<&Pack> {
        match self {
            Self::Pack(l) => Some(l),
            _ => None,
        }
    }

    /// Narrow to an item loop.
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(l) => Some(l),
            _ => None,
        }
    }

    /// Narrow to an unparsed loop.
    pub fn as_unparsed(&self) -> Option<&UnparsedLoop> {
        match self {
            Self::Unparsed(l) => Some(l),
            _ => None,
        }
    }
}

/// Convert one generic loop (and its subtree) into its typed shape.
pub fn bind_loop(source: HierarchicalLoop) -> AsnLoop {
    match source.code.as_str() {
        Shipment::CODE => AsnLoop::Shipment(Shipment::from_loop(source)),
        Order::CODE => AsnLoop::Order(Order::from_loop(source)),
        Tare::CODE => AsnLoop::Tare(Tare::from_loop(source)),
        Pack::CODE => AsnLoop::Pack(Pack::from_loop(source)),
        Item::CODE => AsnLoop::Item(Item::from_loop(source)),
        _ => AsnLoop::Unparsed(UnparsedLoop::from_loop(source)),
    }
}

/// Pass-through for unrecognized level codes
///
/// Keeps the raw segments (nothing consumed them) while the children are
/// still bound normally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnparsedLoop {
    /// Hierarchical id of the loop.
    pub id: String,
    /// Parent hierarchical id, `None` for a root.
    pub parent_id: Option<String>,
    /// The unrecognized level code.
    pub code: String,
    /// Hierarchical child code, when present.
    pub child_code: Option<String>,
    /// The loop's raw segments, in source order.
    pub segments: Vec<Segment>,
    /// Bound child loops in document order.
    pub loops: Vec<AsnLoop>,
}

impl UnparsedLoop {
    fn from_loop(source: HierarchicalLoop) -> Self {
        let HierarchicalLoop {
            id,
            parent_id,
            code,
            child_code,
            segments,
            children,
        } = source;
        Self {
            id,
            parent_id,
            code,
            child_code,
            segments,
            loops: children.into_iter().map(bind_loop).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(raw: &str) -> Segment {
        Segment::new(raw.split('*').map(str::to_string).collect())
    }

    fn hl(id: &str, parent: Option<&str>, code: &str) -> HierarchicalLoop {
        HierarchicalLoop::new(id, parent.map(str::to_string), code, None)
    }

    #[test]
    fn test_bind_dispatches_on_level_code() {
        assert!(matches!(bind_loop(hl("1", None, "S")), AsnLoop::Shipment(_)));
        assert!(matches!(bind_loop(hl("2", Some("1"), "O")), AsnLoop::Order(_)));
        assert!(matches!(bind_loop(hl("3", Some("2"), "T")), AsnLoop::Tare(_)));
        assert!(matches!(bind_loop(hl("4", Some("3"), "P")), AsnLoop::Pack(_)));
        assert!(matches!(bind_loop(hl("5", Some("4"), "I")), AsnLoop::Item(_)));
    }

    #[test]
    fn test_unknown_level_code_passes_through() {
        let mut source = hl("7", Some("1"), "Q");
        source.add_segment(segment("ZZZ*value"));
        source.add_child(hl("8", Some("7"), "I"));

        let bound = bind_loop(source);
        assert_eq!(bound.code(), "Q");
        let unparsed = bound.as_unparsed().expect("unparsed variant");
        // Segments are retained because nothing consumed them.
        assert_eq!(unparsed.segments.len(), 1);
        // Children of an unrecognized loop are still bound.
        assert!(matches!(unparsed.loops[0], AsnLoop::Item(_)));
    }

    #[test]
    fn test_narrowing_accessors() {
        let bound = bind_loop(hl("1", None, "S"));
        assert!(bound.as_shipment().is_some());
        assert!(bound.as_order().is_none());
        assert_eq!(bound.hierarchical_id(), "1");
        assert_eq!(bound.code(), "S");
    }
}
