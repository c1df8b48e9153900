//! Segment and element primitives
//!
//! A segment is one record of an X12 payload: an ordered list of element
//! strings, identified by the value of its first element (e.g. "ISA",
//! "HL", "PRF"). Elements carry no intrinsic type; callers coerce.

use serde::{Deserialize, Serialize};

/// One delimiter-separated record of an X12 payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    elements: Vec<String>,
}

impl Segment {
    /// Create a segment from its ordered elements. The first element is
    /// the segment id.
    pub fn new(elements: Vec<String>) -> Self {
        Self { elements }
    }

    /// The segment id (value of the first element), or "" for a segment
    /// with no elements.
    pub fn id(&self) -> &str {
        self.elements.first().map_or("", String::as_str)
    }

    /// Data element at the given position, 1-indexed the way the standard
    /// numbers them (ISA01 is `element(1)`). `element(0)` is the id.
    /// Returns `None` past the end of the segment; present-but-empty
    /// elements come back as `Some("")`.
    pub fn element(&self, index: usize) -> Option<&str> {
        self.elements.get(index).map(String::as_str)
    }

    /// Data element at the given position, treating an empty value the
    /// same as an absent one.
    pub fn non_empty_element(&self, index: usize) -> Option<&str> {
        self.element(index).filter(|value| !value.is_empty())
    }

    /// Number of elements, including the id.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Split a composite element into its sub-elements using the
    /// interchange's sub-element separator. Simple elements come back as
    /// a single-entry list.
    pub fn composite(&self, index: usize, sub_element: char) -> Option<Vec<&str>> {
        self.element(index)
            .map(|value| value.split(sub_element).collect())
    }

    /// All elements in order.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }
}
