//! Delimiter-aware tokenizer
//!
//! X12 is self-describing about its delimiters: the interchange header is
//! a fixed-width segment, so the element separator is simply the byte at
//! offset 3 (right after "ISA") and the segment terminator is the byte at
//! offset 105, right after the last fixed-width field. The sub-element
//! separator for composite fields is declared in ISA16. Everything after
//! that is a plain split: segments on the terminator, elements on the
//! separator, with line-ending noise around terminators trimmed away.

use crate::{Error, Result};
use tracing::debug;
use x12_ir::{Segment, Separators};

/// Byte offset of the element separator inside the ISA header.
const ELEMENT_SEPARATOR_OFFSET: usize = 3;

/// Byte offset of the segment terminator inside the ISA header.
const SEGMENT_TERMINATOR_OFFSET: usize = 105;

/// Element of the ISA header that declares the sub-element separator.
const SUB_ELEMENT_SEPARATOR_ELEMENT: usize = 16;

/// The segment sequence of one interchange plus the delimiters it used
#[derive(Debug, Clone)]
pub struct TokenizedDocument {
    /// Delimiters discovered from the interchange header.
    pub separators: Separators,
    /// All segments in source order, the envelope markers included.
    pub segments: Vec<Segment>,
}

/// Split raw interchange text into segments.
///
/// Empty (or whitespace-only) input is the defined empty case and yields
/// `Ok(None)`: there is no document, and that is not an error.
///
/// # Errors
///
/// Fails when the first segment is not an ISA interchange header, or when
/// the header is too short or too damaged to declare its delimiters.
pub fn tokenize(source: &str) -> Result<Option<TokenizedDocument>> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if !trimmed.starts_with("ISA") {
        return Err(Error::MissingInterchangeHeader);
    }

    let bytes = trimmed.as_bytes();
    if bytes.len() <= SEGMENT_TERMINATOR_OFFSET {
        return Err(Error::MalformedInterchangeHeader(format!(
            "header is {} bytes, expected at least {}",
            bytes.len(),
            SEGMENT_TERMINATOR_OFFSET + 1
        )));
    }

    let element = separator_at(bytes, ELEMENT_SEPARATOR_OFFSET)?;
    let segment_terminator = separator_at(bytes, SEGMENT_TERMINATOR_OFFSET)?;
    if element == segment_terminator {
        return Err(Error::MalformedInterchangeHeader(format!(
            "element separator and segment terminator are both '{element}'"
        )));
    }

    let segments: Vec<Segment> = trimmed
        .split(segment_terminator)
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| Segment::new(raw.split(element).map(str::to_string).collect()))
        .collect();

    let sub_element = sub_element_separator(&segments[0])?;
    let separators = Separators::new(element, segment_terminator, sub_element);
    debug!(
        element = %element,
        segment = %segment_terminator,
        sub_element = %sub_element,
        count = segments.len(),
        "tokenized interchange"
    );

    Ok(Some(TokenizedDocument {
        separators,
        segments,
    }))
}

fn separator_at(bytes: &[u8], offset: usize) -> Result<char> {
    let byte = bytes[offset];
    if byte.is_ascii() && !byte.is_ascii_alphanumeric() {
        Ok(byte as char)
    } else {
        Err(Error::MalformedInterchangeHeader(format!(
            "byte {offset} is not a usable delimiter"
        )))
    }
}

fn sub_element_separator(isa: &Segment) -> Result<char> {
    isa.element(SUB_ELEMENT_SEPARATOR_ELEMENT)
        .and_then(|value| value.chars().next())
        .ok_or_else(|| {
            Error::MalformedInterchangeHeader(
                "ISA16 sub-element separator is missing".to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISA: &str = "ISA*01*0000000000*01*0000000000*ZZ*ABCDEFGHIJKLMNO*ZZ*123456789012345*101127*1719*U*00400*000003438*0*P*>~";

    #[test]
    fn test_empty_source_yields_no_tokens() {
        assert!(tokenize("").unwrap().is_none());
        assert!(tokenize("   \r\n  ").unwrap().is_none());
    }

    #[test]
    fn test_source_must_start_with_isa() {
        let result = tokenize("GS*SH*4405197800*999999999~");
        assert!(matches!(result, Err(Error::MissingInterchangeHeader)));
    }

    #[test]
    fn test_truncated_header_is_fatal() {
        let result = tokenize("ISA*01*0000000000");
        assert!(matches!(
            result,
            Err(Error::MalformedInterchangeHeader(_))
        ));
    }

    #[test]
    fn test_separator_discovery() {
        let tokens = tokenize(ISA).unwrap().unwrap();
        assert_eq!(tokens.separators.element, '*');
        assert_eq!(tokens.separators.segment, '~');
        assert_eq!(tokens.separators.sub_element, '>');
    }

    #[test]
    fn test_isa_fields_split() {
        let tokens = tokenize(ISA).unwrap().unwrap();
        let isa = &tokens.segments[0];
        assert_eq!(isa.id(), "ISA");
        assert_eq!(isa.element(1), Some("01"));
        assert_eq!(isa.element(6), Some("ABCDEFGHIJKLMNO"));
        assert_eq!(isa.element(16), Some(">"));
    }

    #[test]
    fn test_newlines_around_terminators_produce_no_empty_segments() {
        let source = format!("{ISA}\r\nGS*SH*A*B*20111206*1045*49*X*004060~\n\nIEA*1*000003438~\n");
        let tokens = tokenize(&source).unwrap().unwrap();
        let ids: Vec<&str> = tokens.segments.iter().map(Segment::id).collect();
        assert_eq!(ids, vec!["ISA", "GS", "IEA"]);
    }

    #[test]
    fn test_custom_terminator() {
        let source = ISA.replace('~', "|");
        let with_more = format!("{source}GS*SH*A*B*20111206*1045*49*X*004060|");
        let tokens = tokenize(&with_more).unwrap().unwrap();
        assert_eq!(tokens.separators.segment, '|');
        assert_eq!(tokens.segments.len(), 2);
    }

    #[test]
    fn test_alphanumeric_delimiter_is_rejected() {
        // Corrupt the element separator position with a letter.
        let mut corrupted = ISA.to_string();
        corrupted.replace_range(3..4, "X");
        let result = tokenize(&corrupted);
        assert!(matches!(
            result,
            Err(Error::MalformedInterchangeHeader(_))
        ));
    }
}
