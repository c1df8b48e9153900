//! Pack (carton) level of an 856

use crate::loops::{AsnLoop, bind_loop};
use crate::segments::MANMarkNumber;
use serde::{Deserialize, Serialize};
use x12_ir::HierarchicalLoop;

/// The pack level of information, typically one carton
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    /// Hierarchical id of the loop.
    pub id: String,
    /// Parent hierarchical id.
    pub parent_id: Option<String>,

    /// MAN marks and numbers (e.g. the carton's tracking barcode).
    pub man_list: Option<Vec<MANMarkNumber>>,

    /// Bound child loops (items) in document order.
    pub loops: Vec<AsnLoop>,
}

impl Pack {
    /// Level code of a pack loop.
    pub const CODE: &'static str = "P";

    /// Returns true if the loop passed in is a pack loop.
    pub fn matches(source: &HierarchicalLoop) -> bool {
        source.has_code(Self::CODE)
    }

    /// Bind a generic loop into the pack shape, consuming it.
    pub fn from_loop(source: HierarchicalLoop) -> Self {
        let HierarchicalLoop {
            id,
            parent_id,
            segments,
            children,
            ..
        } = source;

        let mut pack = Self {
            id,
            parent_id,
            ..Self::default()
        };

        for segment in &segments {
            match segment.id() {
                MANMarkNumber::ID => pack.add_mark_number(MANMarkNumber::parse(segment)),
                _ => {}
            }
        }

        pack.loops = children.into_iter().map(bind_loop).collect();
        pack
    }

    /// Helper method to add a MAN record.
    pub fn add_mark_number(&mut self, man: MANMarkNumber) {
        self.man_list.get_or_insert_with(Vec::new).push(man);
    }
}
