//! Hierarchical loop nodes
//!
//! X12 transaction sets describe nesting with HL segments: each carries
//! its own id, the id of its parent, and a level code classifying the
//! loop's business meaning ("S" shipment, "O" order, ...). A loop owns
//! the non-HL segments that follow its HL segment and the child loops
//! that named it as their parent. The parent linkage is kept as the
//! parent's id only; ownership always runs parent -> children.

use crate::segment::Segment;
use serde::{Deserialize, Serialize};

/// One HL segment's scope: its identity, owned segments, and child loops
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchicalLoop {
    /// Hierarchical id (HL01), unique within one transaction set.
    pub id: String,

    /// Parent hierarchical id (HL02); `None` marks a root.
    pub parent_id: Option<String>,

    /// Level code classifying the loop (HL03), e.g. "O" for an order.
    pub code: String,

    /// Hierarchical child code (HL04), when present.
    pub child_code: Option<String>,

    /// Non-loop segments owned directly by this loop, in source order.
    pub segments: Vec<Segment>,

    /// Child loops in the order their HL segments occurred.
    pub children: Vec<HierarchicalLoop>,
}

impl HierarchicalLoop {
    /// Id of the segment that opens a hierarchical loop.
    pub const SEGMENT_ID: &'static str = "HL";

    /// Create a loop node. Id, parent id, and level code are write-once:
    /// they are never touched again after construction.
    pub fn new(
        id: impl Into<String>,
        parent_id: Option<String>,
        code: impl Into<String>,
        child_code: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id,
            code: code.into(),
            child_code,
            segments: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Whether this loop carries the given level code.
    pub fn has_code(&self, code: &str) -> bool {
        self.code == code
    }

    /// Whether this loop is a root (no declared parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Append a directly-owned segment.
    pub fn add_segment(&mut self, segment: Segment) -> &mut Self {
        self.segments.push(segment);
        self
    }

    /// Append a child loop, preserving document order.
    pub fn add_child(&mut self, child: HierarchicalLoop) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Find the first direct child carrying the given level code.
    pub fn find_child_with_code(&self, code: &str) -> Option<&HierarchicalLoop> {
        self.children.iter().find(|child| child.has_code(code))
    }
}
