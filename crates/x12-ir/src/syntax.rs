//! X12 delimiter definitions
//!
//! X12 does not carry a service string advice segment; the delimiters are
//! read from fixed positions inside the interchange header instead. This
//! module holds the resulting separator set and the common defaults.

use serde::{Deserialize, Serialize};

/// Common X12 separators (when no interchange header has been read yet)
pub const DEFAULT_ELEMENT_SEPARATOR: char = '*';
pub const DEFAULT_SEGMENT_TERMINATOR: char = '~';
pub const DEFAULT_SUB_ELEMENT_SEPARATOR: char = '>';

/// Separators observed for one interchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separators {
    /// Element separator (commonly '*')
    pub element: char,
    /// Segment terminator (commonly '~')
    pub segment: char,
    /// Sub-element separator for composite fields (commonly '>')
    pub sub_element: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            element: DEFAULT_ELEMENT_SEPARATOR,
            segment: DEFAULT_SEGMENT_TERMINATOR,
            sub_element: DEFAULT_SUB_ELEMENT_SEPARATOR,
        }
    }
}

impl Separators {
    /// Create a separator set from the three observed characters.
    pub fn new(element: char, segment: char, sub_element: char) -> Self {
        Self {
            element,
            segment,
            sub_element,
        }
    }

    /// Check if a character is one of the delimiters.
    pub fn is_delimiter(&self, c: char) -> bool {
        c == self.element || c == self.segment || c == self.sub_element
    }
}
