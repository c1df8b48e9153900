//! Shipment level of an 856

use crate::loops::{AsnLoop, bind_loop};
use crate::segments::{
    DTMDateTimeReference, N1PartyIdentification, REFReferenceInformation, TD1CarrierDetail,
    TD5CarrierRouting,
};
use serde::{Deserialize, Serialize};
use x12_ir::HierarchicalLoop;

/// The shipment level of information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Hierarchical id of the loop.
    pub id: String,
    /// Parent hierarchical id; the shipment is normally the root.
    pub parent_id: Option<String>,

    /// TD1 carrier details.
    pub td1_list: Option<Vec<TD1CarrierDetail>>,
    /// TD5 carrier routing.
    pub td5_list: Option<Vec<TD5CarrierRouting>>,
    /// REF reference records.
    pub ref_list: Option<Vec<REFReferenceInformation>>,
    /// DTM date/time references.
    pub dtm_list: Option<Vec<DTMDateTimeReference>>,
    /// N1 parties with their attached N3/N4 detail.
    pub parties: Option<Vec<N1PartyIdentification>>,

    /// Bound child loops (orders, tares, ...) in document order.
    pub loops: Vec<AsnLoop>,
}

impl Shipment {
    /// Level code of a shipment loop.
    pub const CODE: &'static str = "S";

    /// Returns true if the loop passed in is a shipment loop.
    pub fn matches(source: &HierarchicalLoop) -> bool {
        source.has_code(Self::CODE)
    }

    /// Bind a generic loop into the shipment shape, consuming it.
    pub fn from_loop(source: HierarchicalLoop) -> Self {
        let HierarchicalLoop {
            id,
            parent_id,
            segments,
            children,
            ..
        } = source;

        let mut shipment = Self {
            id,
            parent_id,
            ..Self::default()
        };

        for segment in &segments {
            match segment.id() {
                TD1CarrierDetail::ID => {
                    shipment.add_carrier_detail(TD1CarrierDetail::parse(segment));
                }
                TD5CarrierRouting::ID => {
                    shipment.add_carrier_routing(TD5CarrierRouting::parse(segment));
                }
                REFReferenceInformation::ID => {
                    shipment.add_reference_information(REFReferenceInformation::parse(segment));
                }
                DTMDateTimeReference::ID => {
                    shipment.add_date_time_reference(DTMDateTimeReference::parse(segment));
                }
                N1PartyIdentification::ID => {
                    shipment
                        .parties
                        .get_or_insert_with(Vec::new)
                        .push(N1PartyIdentification::parse(segment));
                }
                N1PartyIdentification::ADDRESS_ID => {
                    if let Some(party) = shipment.last_party_mut() {
                        party.add_address_line(segment);
                    }
                }
                N1PartyIdentification::GEOGRAPHIC_ID => {
                    if let Some(party) = shipment.last_party_mut() {
                        party.set_geographic(segment);
                    }
                }
                _ => {}
            }
        }

        shipment.loops = children.into_iter().map(bind_loop).collect();
        shipment
    }

    /// Helper method to add a TD1 carrier detail.
    pub fn add_carrier_detail(&mut self, td1: TD1CarrierDetail) {
        self.td1_list.get_or_insert_with(Vec::new).push(td1);
    }

    /// Helper method to add a TD5 carrier routing.
    pub fn add_carrier_routing(&mut self, td5: TD5CarrierRouting) {
        self.td5_list.get_or_insert_with(Vec::new).push(td5);
    }

    /// Helper method to add a REF record.
    pub fn add_reference_information(&mut self, reference: REFReferenceInformation) {
        self.ref_list.get_or_insert_with(Vec::new).push(reference);
    }

    /// Helper method to add a DTM record.
    pub fn add_date_time_reference(&mut self, dtm: DTMDateTimeReference) {
        self.dtm_list.get_or_insert_with(Vec::new).push(dtm);
    }

    fn last_party_mut(&mut self) -> Option<&mut N1PartyIdentification> {
        self.parties.as_mut().and_then(|parties| parties.last_mut())
    }
}
