//! Hierarchical loop builder and validator
//!
//! A transaction set's nesting arrives flattened: each HL segment names
//! its own id, its parent's id, and a level code, and every segment that
//! follows it belongs to that loop until the next HL. Rebuilding the tree
//! is a single left-to-right pass. Parent references are resolved against
//! the ids seen so far, so a reference to an id that has not appeared yet
//! is a structural defect; the orphaned loop is promoted to a root so its
//! descendants stay reachable, the defect is recorded, and the build
//! carries on. Cycles cannot form: a loop can only attach to an earlier
//! one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use x12_ir::{ErrorDetail, HierarchicalLoop, Segment};

/// Outcome of resolving one transaction set's loop structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoopResolution {
    /// Root loops in document order. Orphaned loops whose parent could
    /// not be resolved appear here as additional roots.
    pub loops: Vec<HierarchicalLoop>,

    /// Structural defects in the order they were discovered.
    pub errors: Vec<ErrorDetail>,
}

impl LoopResolution {
    /// Whether the loop structure resolved without defects.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Rebuild the loop forest from a transaction set's loop region.
///
/// The slice should start at the first HL segment and stop before the SE
/// trailer; any leading non-HL segments are ignored. Segments and child
/// loops keep their source order.
pub fn find_hierarchical_loops(segments: &[Segment]) -> LoopResolution {
    let mut nodes: Vec<HierarchicalLoop> = Vec::new();
    let mut children_of: Vec<Vec<usize>> = Vec::new();
    let mut roots: Vec<usize> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();
    let mut errors: Vec<ErrorDetail> = Vec::new();
    let mut current: Option<usize> = None;

    for segment in segments {
        if segment.id() != HierarchicalLoop::SEGMENT_ID {
            if let Some(open) = current {
                nodes[open].add_segment(segment.clone());
            }
            continue;
        }

        let id = segment.element(1).unwrap_or("").to_string();
        let parent_id = segment.non_empty_element(2).map(str::to_string);
        let code = segment.element(3).unwrap_or("").to_string();
        let child_code = segment.non_empty_element(4).map(str::to_string);

        let index = nodes.len();
        nodes.push(HierarchicalLoop::new(
            id.clone(),
            parent_id.clone(),
            code,
            child_code,
        ));
        children_of.push(Vec::new());

        match &parent_id {
            Some(parent) => match index_by_id.get(parent) {
                Some(&parent_index) => children_of[parent_index].push(index),
                None => {
                    let message = format!("HL segment ({id}) is missing parent ({parent})");
                    warn!(%message, "loop resolution defect");
                    errors.push(ErrorDetail::new(HierarchicalLoop::SEGMENT_ID, message));
                    roots.push(index);
                }
            },
            None => roots.push(index),
        }

        if index_by_id.contains_key(&id) {
            let message = format!("HL segment ({id}) has a duplicate hierarchical id");
            warn!(%message, "loop resolution defect");
            errors.push(ErrorDetail::new(HierarchicalLoop::SEGMENT_ID, message));
        } else {
            index_by_id.insert(id, index);
        }

        current = Some(index);
    }

    let mut slots: Vec<Option<HierarchicalLoop>> = nodes.into_iter().map(Some).collect();
    let loops = roots
        .iter()
        .filter_map(|&root| attach_children(root, &mut slots, &children_of))
        .collect();

    LoopResolution { loops, errors }
}

/// Move a node out of the arena with its subtree assembled underneath it.
/// Children always have larger indices than their parent, so each slot is
/// taken exactly once.
fn attach_children(
    index: usize,
    slots: &mut [Option<HierarchicalLoop>],
    children_of: &[Vec<usize>],
) -> Option<HierarchicalLoop> {
    let mut node = slots[index].take()?;
    for &child in &children_of[index] {
        if let Some(child_node) = attach_children(child, slots, children_of) {
            node.add_child(child_node);
        }
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(raw: &[&str]) -> Vec<Segment> {
        raw.iter()
            .map(|s| Segment::new(s.split('*').map(str::to_string).collect()))
            .collect()
    }

    #[test]
    fn test_single_root_loop() {
        let resolution = find_hierarchical_loops(&segments(&["HL*1**S", "TD1*PLT94*1"]));
        assert!(resolution.is_valid());
        assert_eq!(resolution.loops.len(), 1);
        let root = &resolution.loops[0];
        assert_eq!(root.id, "1");
        assert_eq!(root.code, "S");
        assert!(root.is_root());
        assert_eq!(root.segments.len(), 1);
        assert_eq!(root.segments[0].id(), "TD1");
    }

    #[test]
    fn test_nested_loops() {
        let resolution = find_hierarchical_loops(&segments(&[
            "HL*1**S",
            "TD1*PLT94*1",
            "HL*2*1*O",
            "PRF*0391494868",
            "HL*3*2*I",
            "LIN**UP*008815509184",
        ]));
        assert!(resolution.is_valid());
        assert_eq!(resolution.loops.len(), 1);

        let shipment = &resolution.loops[0];
        assert_eq!(shipment.children.len(), 1);
        let order = &shipment.children[0];
        assert_eq!(order.id, "2");
        assert_eq!(order.code, "O");
        assert_eq!(order.segments[0].id(), "PRF");
        assert_eq!(order.children.len(), 1);
        assert_eq!(order.children[0].code, "I");
    }

    #[test]
    fn test_children_keep_document_order() {
        let resolution = find_hierarchical_loops(&segments(&[
            "HL*1**S",
            "HL*2*1*O",
            "HL*3*1*O",
            "HL*4*1*O",
        ]));
        assert!(resolution.is_valid());
        let ids: Vec<&str> = resolution.loops[0]
            .children
            .iter()
            .map(|child| child.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_missing_parent_is_reported_and_promoted_to_root() {
        let resolution = find_hierarchical_loops(&segments(&[
            "HL*1**S",
            "HL*2*99*O",
            "PRF*0391494868",
            "HL*3*2*I",
        ]));
        assert!(!resolution.is_valid());
        assert_eq!(resolution.errors.len(), 1);
        assert_eq!(
            resolution.errors[0].message,
            "HL segment (2) is missing parent (99)"
        );
        assert_eq!(resolution.errors[0].segment_id, "HL");

        // The orphan becomes a second root and keeps its own subtree.
        assert_eq!(resolution.loops.len(), 2);
        let orphan = &resolution.loops[1];
        assert_eq!(orphan.id, "2");
        assert_eq!(orphan.segments[0].id(), "PRF");
        assert_eq!(orphan.children.len(), 1);
        assert_eq!(orphan.children[0].id, "3");
    }

    #[test]
    fn test_forward_parent_reference_is_a_defect() {
        // "2" names parent "3", which only appears later in the stream.
        let resolution =
            find_hierarchical_loops(&segments(&["HL*1**S", "HL*2*3*O", "HL*3*1*O"]));
        assert!(!resolution.is_valid());
        assert_eq!(
            resolution.errors[0].message,
            "HL segment (2) is missing parent (3)"
        );
    }

    #[test]
    fn test_duplicate_hierarchical_id_is_reported() {
        let resolution = find_hierarchical_loops(&segments(&[
            "HL*1**S",
            "HL*2*1*O",
            "HL*2*1*O",
        ]));
        assert!(!resolution.is_valid());
        assert_eq!(resolution.errors.len(), 1);
        assert_eq!(
            resolution.errors[0].message,
            "HL segment (2) has a duplicate hierarchical id"
        );
        // Both nodes stay in the forest.
        assert_eq!(resolution.loops[0].children.len(), 2);
    }

    #[test]
    fn test_error_order_follows_discovery_order() {
        let resolution = find_hierarchical_loops(&segments(&[
            "HL*1**S",
            "HL*2*98*O",
            "HL*3*99*O",
        ]));
        assert_eq!(resolution.errors.len(), 2);
        assert!(resolution.errors[0].message.contains("(2)"));
        assert!(resolution.errors[1].message.contains("(3)"));
    }

    #[test]
    fn test_leading_non_hl_segments_are_ignored() {
        let resolution =
            find_hierarchical_loops(&segments(&["BSN*14*829716", "HL*1**S", "TD1*PLT94*1"]));
        assert!(resolution.is_valid());
        assert_eq!(resolution.loops.len(), 1);
        assert_eq!(resolution.loops[0].segments.len(), 1);
    }

    #[test]
    fn test_no_hl_segments_yields_empty_forest() {
        let resolution = find_hierarchical_loops(&segments(&["BSN*14*829716"]));
        assert!(resolution.is_valid());
        assert!(resolution.loops.is_empty());
    }
}
