//! Tare (pallet) level of an 856

use crate::loops::{AsnLoop, bind_loop};
use crate::segments::MANMarkNumber;
use serde::{Deserialize, Serialize};
use x12_ir::HierarchicalLoop;

/// The tare level of information, typically one pallet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tare {
    /// Hierarchical id of the loop.
    pub id: String,
    /// Parent hierarchical id.
    pub parent_id: Option<String>,

    /// MAN marks and numbers (e.g. the pallet's SSCC-18 license plate).
    pub man_list: Option<Vec<MANMarkNumber>>,

    /// Bound child loops (packs, items) in document order.
    pub loops: Vec<AsnLoop>,
}

impl Tare {
    /// Level code of a tare loop.
    pub const CODE: &'static str = "T";

    /// Returns true if the loop passed in is a tare loop.
    pub fn matches(source: &HierarchicalLoop) -> bool {
        source.has_code(Self::CODE)
    }

    /// Bind a generic loop into the tare shape, consuming it.
    pub fn from_loop(source: HierarchicalLoop) -> Self {
        let HierarchicalLoop {
            id,
            parent_id,
            segments,
            children,
            ..
        } = source;

        let mut tare = Self {
            id,
            parent_id,
            ..Self::default()
        };

        for segment in &segments {
            match segment.id() {
                MANMarkNumber::ID => tare.add_mark_number(MANMarkNumber::parse(segment)),
                _ => {}
            }
        }

        tare.loops = children.into_iter().map(bind_loop).collect();
        tare
    }

    /// Helper method to add a MAN record.
    pub fn add_mark_number(&mut self, man: MANMarkNumber) {
        self.man_list.get_or_insert_with(Vec::new).push(man);
    }
}
