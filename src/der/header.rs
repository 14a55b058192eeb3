use crate::der::{parse_der_length_minimal, Class, Tag};
use crate::error::{DerError, DerResult};
use core::convert::TryFrom;
use nom::number::streaming::be_u8;
use rusticata_macros::custom_check;

/// DER object header (identifier and length)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Header {
    /// Object class: universal, application, context-specific, or private
    pub class: Class,
    /// Constructed bit of the identifier octet
    pub constructed: bool,
    /// Tag number
    pub tag: Tag,
    /// Content length
    pub len: usize,
    /// Number of identifier and length octets
    pub header_len: usize,
}

impl Header {
    /// Build a new DER header
    pub fn new(class: Class, constructed: bool, tag: Tag, len: usize) -> Self {
        let header_len = 1 + crate::der::length::encoded_length_size(len);
        Header {
            class,
            constructed,
            tag,
            len,
            header_len,
        }
    }

    /// Return true if object has universal class
    #[inline]
    pub fn is_universal(&self) -> bool {
        self.class == Class::Universal
    }

    /// Return true if object has context-specific class
    #[inline]
    pub fn is_contextspecific(&self) -> bool {
        self.class == Class::ContextSpecific
    }

    /// Return true if this is a primitive type
    #[inline]
    pub fn is_primitive(&self) -> bool {
        !self.constructed
    }

    /// Return true if this is a constructed type
    #[inline]
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Size of the whole element (header and content)
    #[inline]
    pub fn total_len(&self) -> usize {
        self.header_len + self.len
    }

    /// Identifier octet matching this header
    pub fn identifier_octet(&self) -> u8 {
        let constructed = if self.constructed { 0b0010_0000 } else { 0 };
        self.class.identifier_bits() | constructed | (self.tag.0 as u8 & 0b0001_1111)
    }
}

/// Read the identifier octet: class, constructed bit and tag number
///
/// The high-tag-number form (low 5 bits all set) is rejected with `HighTagNumber`.
pub(crate) fn parse_identifier(i: &[u8]) -> DerResult<(Class, bool, u32)> {
    let (rem, b0) = be_u8::<_, DerError>(i)?;
    let tag = u32::from(b0 & 0b0001_1111);
    custom_check!(i, tag == 0x1f, DerError::HighTagNumber)?;
    let class = Class::try_from(b0 >> 6).map_err(nom::Err::Error)?;
    let constructed = b0 & 0b0010_0000 != 0;
    Ok((rem, (class, constructed, tag)))
}

/// Read an object header
///
/// The length must be definite and in its shortest form. The content itself is not read: the
/// caller has to check that enough bytes remain.
pub fn der_read_element_header(i: &[u8]) -> DerResult<Header> {
    let (rem, (class, constructed, tag)) = parse_identifier(i)?;
    let (rem, len) = parse_der_length_minimal(rem)?;
    let hdr = Header {
        class,
        constructed,
        tag: Tag(tag),
        len,
        header_len: i.len() - rem.len(),
    };
    Ok((rem, hdr))
}
