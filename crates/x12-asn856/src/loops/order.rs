//! Order level of an 856

use crate::loops::{AsnLoop, bind_loop};
use crate::segments::{PRFPurchaseOrderReference, REFReferenceInformation, TD1CarrierDetail};
use serde::{Deserialize, Serialize};
use x12_ir::HierarchicalLoop;

/// The order level of information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Hierarchical id of the loop.
    pub id: String,
    /// Parent hierarchical id, normally the shipment loop.
    pub parent_id: Option<String>,

    /// PRF purchase order reference. A repeated PRF overwrites the
    /// earlier one; the last occurrence wins.
    pub prf: Option<PRFPurchaseOrderReference>,
    /// TD1 carrier details.
    pub td1_list: Option<Vec<TD1CarrierDetail>>,
    /// REF reference records.
    pub ref_list: Option<Vec<REFReferenceInformation>>,

    /// Bound child loops (tares, packs, items) in document order.
    pub loops: Vec<AsnLoop>,
}

impl Order {
    /// Level code of an order loop.
    pub const CODE: &'static str = "O";

    /// Returns true if the loop passed in is an order loop.
    pub fn matches(source: &HierarchicalLoop) -> bool {
        source.has_code(Self::CODE)
    }

    /// Bind a generic loop into the order shape, consuming it.
    pub fn from_loop(source: HierarchicalLoop) -> Self {
        let HierarchicalLoop {
            id,
            parent_id,
            segments,
            children,
            ..
        } = source;

        let mut order = Self {
            id,
            parent_id,
            ..Self::default()
        };

        for segment in &segments {
            match segment.id() {
                PRFPurchaseOrderReference::ID => {
                    order.prf = Some(PRFPurchaseOrderReference::parse(segment));
                }
                TD1CarrierDetail::ID => {
                    order.add_carrier_detail(TD1CarrierDetail::parse(segment));
                }
                REFReferenceInformation::ID => {
                    order.add_reference_information(REFReferenceInformation::parse(segment));
                }
                _ => {}
            }
        }

        order.loops = children.into_iter().map(bind_loop).collect();
        order
    }

    /// Helper method to add a TD1 carrier detail.
    pub fn add_carrier_detail(&mut self, td1: TD1CarrierDetail) {
        self.td1_list.get_or_insert_with(Vec::new).push(td1);
    }

    /// Helper method to add a REF record.
    pub fn add_reference_information(&mut self, reference: REFReferenceInformation) {
        self.ref_list.get_or_insert_with(Vec::new).push(reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x12_ir::Segment;

    fn segment(raw: &str) -> Segment {
        Segment::new(raw.split('*').map(str::to_string).collect())
    }

    fn order_loop() -> HierarchicalLoop {
        let mut source = HierarchicalLoop::new("2", Some("1".to_string()), "O", None);
        source.add_segment(segment("PRF*0391494868"));
        source.add_segment(segment("TD1*CTN94*21"));
        source.add_segment(segment("REF*IA*99999999"));
        source.add_segment(segment("REF*DP*00005"));
        source.add_segment(segment("REF*MR*0073"));
        source
    }

    #[test]
    fn test_matches_level_code() {
        assert!(Order::matches(&HierarchicalLoop::new("2", None, "O", None)));
        assert!(!Order::matches(&HierarchicalLoop::new("1", None, "S", None)));
    }

    #[test]
    fn test_bind_order_records() {
        let order = Order::from_loop(order_loop());
        assert_eq!(order.id, "2");
        assert_eq!(order.parent_id.as_deref(), Some("1"));

        let prf = order.prf.as_ref().expect("purchase order reference");
        assert_eq!(prf.purchase_order_number.as_deref(), Some("0391494868"));

        let td1_list = order.td1_list.as_ref().expect("TD1 records");
        assert_eq!(td1_list.len(), 1);
        assert_eq!(td1_list[0].packaging_code.as_deref(), Some("CTN94"));
        assert_eq!(td1_list[0].lading_quantity.as_deref(), Some("21"));

        let ref_list = order.ref_list.as_ref().expect("REF records");
        let qualifiers: Vec<Option<&str>> =
            ref_list.iter().map(|r| r.qualifier.as_deref()).collect();
        assert_eq!(qualifiers, vec![Some("IA"), Some("DP"), Some("MR")]);
    }

    #[test]
    fn test_repeated_prf_last_write_wins() {
        let mut source = HierarchicalLoop::new("2", Some("1".to_string()), "O", None);
        source.add_segment(segment("PRF*1111111111"));
        source.add_segment(segment("PRF*2222222222"));

        let order = Order::from_loop(source);
        assert_eq!(
            order.prf.and_then(|prf| prf.purchase_order_number),
            Some("2222222222".to_string())
        );
    }

    #[test]
    fn test_unrecognized_segment_is_dropped() {
        let mut source = HierarchicalLoop::new("2", Some("1".to_string()), "O", None);
        source.add_segment(segment("PRF*0391494868"));
        source.add_segment(segment("FOB*PP"));

        let order = Order::from_loop(source);
        assert!(order.prf.is_some());
        // FOB has no accumulator on the order shape; it vanishes quietly.
        assert!(order.td1_list.is_none());
        assert!(order.ref_list.is_none());
    }

    #[test]
    fn test_absent_lists_stay_absent_not_empty() {
        let order = Order::from_loop(order_loop());
        let json = serde_json::to_value(&order).unwrap();
        // Lists that never saw a record serialize as null, not [].
        assert!(json.get("td1_list").is_some());
        let bare = Order::from_loop(HierarchicalLoop::new("9", None, "O", None));
        let bare_json = serde_json::to_value(&bare).unwrap();
        assert!(bare_json.get("td1_list").unwrap().is_null());
        assert!(bare_json.get("ref_list").unwrap().is_null());
    }

    #[test]
    fn test_child_items_bind_recursively() {
        let mut source = order_loop();
        let mut item = HierarchicalLoop::new("3", Some("2".to_string()), "I", None);
        item.add_segment(segment("LIN**UP*008815509184"));
        source.add_child(item);

        let order = Order::from_loop(source);
        assert_eq!(order.loops.len(), 1);
        let bound_item = order.loops[0].as_item().expect("item loop");
        assert_eq!(
            bound_item
                .lin
                .as_ref()
                .and_then(|lin| lin.product_id.as_deref()),
            Some("008815509184")
        );
    }
}
