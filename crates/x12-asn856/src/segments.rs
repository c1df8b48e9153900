//! Segment records used by the 856 loops
//!
//! Each record is the typed form of one segment: a struct of named
//! fields extracted from the segment's positional elements. Extraction
//! never fails; absent or empty elements simply stay `None`.

use serde::{Deserialize, Serialize};
use x12_ir::Segment;

fn field(segment: &Segment, index: usize) -> Option<String> {
    segment.non_empty_element(index).map(str::to_string)
}

/// PRF - Purchase Order Reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PRFPurchaseOrderReference {
    /// PRF01 purchase order number
    pub purchase_order_number: Option<String>,
    /// PRF04 purchase order date
    pub purchase_order_date: Option<String>,
}

impl PRFPurchaseOrderReference {
    pub const ID: &'static str = "PRF";

    pub fn parse(segment: &Segment) -> Self {
        Self {
            purchase_order_number: field(segment, 1),
            purchase_order_date: field(segment, 4),
        }
    }
}

/// TD1 - Carrier Details (Quantity and Weight)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TD1CarrierDetail {
    /// TD101 packaging code (e.g. "PLT94", "CTN94")
    pub packaging_code: Option<String>,
    /// TD102 lading quantity
    pub lading_quantity: Option<String>,
    /// TD106 weight qualifier
    pub weight_qualifier: Option<String>,
    /// TD107 weight
    pub weight: Option<String>,
    /// TD108 unit of measurement code
    pub unit_of_measure: Option<String>,
}

impl TD1CarrierDetail {
    pub const ID: &'static str = "TD1";

    pub fn parse(segment: &Segment) -> Self {
        Self {
            packaging_code: field(segment, 1),
            lading_quantity: field(segment, 2),
            weight_qualifier: field(segment, 6),
            weight: field(segment, 7),
            unit_of_measure: field(segment, 8),
        }
    }
}

/// TD5 - Carrier Details (Routing Sequence)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TD5CarrierRouting {
    /// TD501 routing sequence code
    pub routing_sequence_code: Option<String>,
    /// TD502 identification code qualifier
    pub id_code_qualifier: Option<String>,
    /// TD503 identification code (e.g. the SCAC)
    pub id_code: Option<String>,
    /// TD504 transportation method type code
    pub transportation_method: Option<String>,
    /// TD505 routing description
    pub routing: Option<String>,
}

impl TD5CarrierRouting {
    pub const ID: &'static str = "TD5";

    pub fn parse(segment: &Segment) -> Self {
        Self {
            routing_sequence_code: field(segment, 1),
            id_code_qualifier: field(segment, 2),
            id_code: field(segment, 3),
            transportation_method: field(segment, 4),
            routing: field(segment, 5),
        }
    }
}

/// REF - Reference Information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct REFReferenceInformation {
    /// REF01 reference identification qualifier (e.g. "BM", "IA")
    pub qualifier: Option<String>,
    /// REF02 reference identification
    pub reference: Option<String>,
    /// REF03 free-form description
    pub description: Option<String>,
}

impl REFReferenceInformation {
    pub const ID: &'static str = "REF";

    pub fn parse(segment: &Segment) -> Self {
        Self {
            qualifier: field(segment, 1),
            reference: field(segment, 2),
            description: field(segment, 3),
        }
    }
}

/// DTM - Date/Time Reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DTMDateTimeReference {
    /// DTM01 date/time qualifier (e.g. "011" shipped)
    pub qualifier: Option<String>,
    /// DTM02 date
    pub date: Option<String>,
    /// DTM03 time
    pub time: Option<String>,
}

impl DTMDateTimeReference {
    pub const ID: &'static str = "DTM";

    pub fn parse(segment: &Segment) -> Self {
        Self {
            qualifier: field(segment, 1),
            date: field(segment, 2),
            time: field(segment, 3),
        }
    }
}

/// N1 - Party Identification, with its attached N3/N4 detail
///
/// N1 opens a party; the N3 address lines and the N4 geographic segment
/// that follow it belong to that party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct N1PartyIdentification {
    /// N101 entity identifier code (e.g. "SF" ship from, "ST" ship to)
    pub entity_identifier_code: Option<String>,
    /// N102 party name
    pub name: Option<String>,
    /// N103 identification code qualifier
    pub id_code_qualifier: Option<String>,
    /// N104 identification code
    pub id_code: Option<String>,
    /// N3 address lines, in source order
    pub address_lines: Vec<String>,
    /// N4 geographic location, when present
    pub geographic: Option<N4GeographicLocation>,
}

impl N1PartyIdentification {
    pub const ID: &'static str = "N1";
    /// Address information segment attached to the open party.
    pub const ADDRESS_ID: &'static str = "N3";
    /// Geographic location segment attached to the open party.
    pub const GEOGRAPHIC_ID: &'static str = "N4";

    pub fn parse(segment: &Segment) -> Self {
        Self {
            entity_identifier_code: field(segment, 1),
            name: field(segment, 2),
            id_code_qualifier: field(segment, 3),
            id_code: field(segment, 4),
            address_lines: Vec::new(),
            geographic: None,
        }
    }

    /// Attach an N3 address line.
    pub fn add_address_line(&mut self, segment: &Segment) {
        if let Some(line) = segment.non_empty_element(1) {
            self.address_lines.push(line.to_string());
        }
    }

    /// Attach the N4 geographic location.
    pub fn set_geographic(&mut self, segment: &Segment) {
        self.geographic = Some(N4GeographicLocation::parse(segment));
    }
}

/// N4 - Geographic Location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct N4GeographicLocation {
    /// N401 city name
    pub city: Option<String>,
    /// N402 state or province code
    pub state: Option<String>,
    /// N403 postal code
    pub postal_code: Option<String>,
    /// N404 country code
    pub country: Option<String>,
}

impl N4GeographicLocation {
    pub const ID: &'static str = "N4";

    pub fn parse(segment: &Segment) -> Self {
        Self {
            city: field(segment, 1),
            state: field(segment, 2),
            postal_code: field(segment, 3),
            country: field(segment, 4),
        }
    }
}

/// LIN - Item Identification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LINItemIdentification {
    /// LIN01 assigned identification
    pub assigned_identification: Option<String>,
    /// LIN02 product id qualifier (e.g. "UP" for UPC)
    pub product_id_qualifier: Option<String>,
    /// LIN03 product id
    pub product_id: Option<String>,
}

impl LINItemIdentification {
    pub const ID: &'static str = "LIN";

    pub fn parse(segment: &Segment) -> Self {
        Self {
            assigned_identification: field(segment, 1),
            product_id_qualifier: field(segment, 2),
            product_id: field(segment, 3),
        }
    }
}

/// SN1 - Item Detail (Shipment)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SN1ItemDetail {
    /// SN101 assigned identification
    pub assigned_identification: Option<String>,
    /// SN102 number of units shipped
    pub number_of_units: Option<String>,
    /// SN103 unit of measurement code
    pub unit_of_measure: Option<String>,
}

impl SN1ItemDetail {
    pub const ID: &'static str = "SN1";

    pub fn parse(segment: &Segment) -> Self {
        Self {
            assigned_identification: field(segment, 1),
            number_of_units: field(segment, 2),
            unit_of_measure: field(segment, 3),
        }
    }
}

/// MAN - Marks and Numbers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MANMarkNumber {
    /// MAN01 marks and numbers qualifier (e.g. "GM" for SSCC-18)
    pub qualifier: Option<String>,
    /// MAN02 marks and numbers
    pub number: Option<String>,
}

impl MANMarkNumber {
    pub const ID: &'static str = "MAN";

    pub fn parse(segment: &Segment) -> Self {
        Self {
            qualifier: field(segment, 1),
            number: field(segment, 2),
        }
    }
}
