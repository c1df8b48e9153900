//! Item level of an 856

use crate::loops::{AsnLoop, bind_loop};
use crate::segments::{LINItemIdentification, SN1ItemDetail};
use serde::{Deserialize, Serialize};
use x12_ir::HierarchicalLoop;

/// The item level of information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Hierarchical id of the loop.
    pub id: String,
    /// Parent hierarchical id.
    pub parent_id: Option<String>,

    /// LIN item identification. The last occurrence wins when repeated.
    pub lin: Option<LINItemIdentification>,
    /// SN1 shipped quantity detail. The last occurrence wins when repeated.
    pub sn1: Option<SN1ItemDetail>,

    /// Bound child loops in document order.
    pub loops: Vec<AsnLoop>,
}

impl Item {
    /// Level code of an item loop.
    pub const CODE: &'static str = "I";

    /// Returns true if the loop passed in is an item loop.
    pub fn matches(source: &HierarchicalLoop) -> bool {
        source.has_code(Self::CODE)
    }

    /// Bind a generic loop into the item shape, consuming it.
    pub fn from_loop(source: HierarchicalLoop) -> Self {
        let HierarchicalLoop {
            id,
            parent_id,
            segments,
            children,
            ..
        } = source;

        let mut item = Self {
            id,
            parent_id,
            ..Self::default()
        };

        for segment in &segments {
            match segment.id() {
                LINItemIdentification::ID => {
                    item.lin = Some(LINItemIdentification::parse(segment));
                }
                SN1ItemDetail::ID => {
                    item.sn1 = Some(SN1ItemDetail::parse(segment));
                }
                _ => {}
            }
        }

        item.loops = children.into_iter().map(bind_loop).collect();
        item
    }
}
