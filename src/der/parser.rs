use crate::der::integer::is_minimal;
use crate::der::*;
use crate::error::*;
use crate::oid::Oid;
use log::{debug, trace};
use nom::bytes::streaming::take;
use nom::{Err, Needed};
use rusticata_macros::custom_check;
use std::borrow::Cow;
use std::str;

/// Maximum recursion limit
pub const MAX_RECURSION: usize = 50;

/// Parse DER object recursively, with the default configuration
///
/// Return a tuple containing the remaining (unparsed) bytes and the DER Object, or an error.
///
/// *Note: this is the same as calling `parse_der_recursive` with `MAX_RECURSION` and strict
/// bounds.*
///
/// ### Example
///
/// ```
/// use der_codec::der::{parse_der, Tag};
///
/// let bytes = &[0x02, 0x03, 0x01, 0x00, 0x01];
/// let (_, obj) = parse_der(bytes).expect("parsing failed");
///
/// assert_eq!(obj.tag(), Tag::Integer);
/// ```
#[inline]
pub fn parse_der(i: &[u8]) -> DerResult {
    parse_der_recursive(i, 0, &ParserConfig::default())
}

/// Parse one element: identifier, length, then content dispatched on class and tag
pub fn parse_der_recursive<'a>(i: &'a [u8], depth: usize, cfg: &ParserConfig) -> DerResult<'a> {
    if depth > cfg.max_depth {
        debug!("nesting depth {} exceeds limit {}", depth, cfg.max_depth);
        return Err(Err::Error(DerError::MaxDepth));
    }
    let (rem, hdr) = der_read_element_header(i)?;
    if rem.len() < hdr.len {
        return Err(Err::Incomplete(Needed::new(hdr.len - rem.len())));
    }
    trace!(
        "element class={} constructed={} tag={} len={} depth={}",
        hdr.class,
        hdr.constructed,
        hdr.tag.0,
        hdr.len,
        depth
    );
    match hdr.class {
        Class::Universal => {
            der_read_element_content_as(rem, hdr.tag, hdr.len, hdr.constructed, depth, cfg)
        }
        Class::ContextSpecific => der_read_context_specific(i, &hdr, depth, cfg),
        class => {
            debug!("rejecting element of class {}", class);
            Err(Err::Error(DerError::InvalidClass))
        }
    }
}

/// Incomplete input inside a bounded content means a child runs past its parent
#[inline]
pub(crate) fn bounded(e: Err<DerError>) -> Err<DerError> {
    match e {
        Err::Incomplete(_) => Err::Error(DerError::ElementOverflow),
        e => e,
    }
}

/// Read the content of a context-specific element
///
/// `i` starts at the identifier octet. A constructed encoding holding exactly one element is
/// decoded as EXPLICIT tagging. Anything else (primitive, empty, or several elements) can only be
/// IMPLICIT tagging and is kept as an opaque value.
fn der_read_context_specific<'a>(
    i: &'a [u8],
    hdr: &Header,
    depth: usize,
    cfg: &ParserConfig,
) -> DerResult<'a> {
    let total = hdr.total_len();
    let content = &i[hdr.header_len..total];
    if hdr.is_primitive() || content.is_empty() {
        return Ok((&i[total..], der_context_specific_opaque(&i[..total], hdr)));
    }
    match cfg.bounds {
        Bounds::Strict => {
            let (rest, inner) = parse_der_recursive(content, depth + 1, cfg).map_err(bounded)?;
            if !rest.is_empty() {
                trace!("[{}] holds more than one element, kept as IMPLICIT", hdr.tag.0);
                return Ok((&i[total..], der_context_specific_opaque(&i[..total], hdr)));
            }
            let cs = ContextSpecific::from_parts(hdr.tag.0, TagMode::Explicit, false, inner);
            Ok((&i[total..], DerValue::ContextSpecific(cs)))
        }
        Bounds::Permissive => {
            let (rest, inner) = parse_der_recursive(&i[hdr.header_len..], depth + 1, cfg)?;
            // the nested element may run past the declared end
            let rem = if rest.len() < i.len() - total {
                rest
            } else {
                &i[total..]
            };
            let cs = ContextSpecific::from_parts(hdr.tag.0, TagMode::Explicit, false, inner);
            Ok((rem, DerValue::ContextSpecific(cs)))
        }
    }
}

/// Wrap the raw span of a context-specific element as an IMPLICIT value of unknown type
fn der_context_specific_opaque<'a>(span: &'a [u8], hdr: &Header) -> DerValue<'a> {
    let opaque = Opaque::from_raw_parts(span, hdr.header_len);
    let cs = ContextSpecific::from_parts(
        hdr.tag.0,
        TagMode::Implicit,
        hdr.is_primitive(),
        DerValue::Direct(opaque),
    );
    DerValue::ContextSpecific(cs)
}

#[inline]
pub(crate) fn der_read_content_bool(i: &[u8]) -> DerResult {
    let (rem, content) = take::<_, _, DerError>(1usize)(i)?;
    match content[0] {
        0x00 => Ok((rem, DerValue::Boolean(false))),
        0xff => Ok((rem, DerValue::Boolean(true))),
        _ => Err(Err::Error(DerError::DerConstraintFailed)),
    }
}

#[inline]
pub(crate) fn der_read_content_integer(i: &[u8], len: usize) -> DerResult {
    let (rem, content) = take::<_, _, DerError>(len)(i)?;
    custom_check!(i, content.is_empty(), DerError::InvalidLength)?;
    // X.690 8.3.2: the first 9 bits shall not be all ones or all zeroes
    custom_check!(i, !is_minimal(content), DerError::DerConstraintFailed)?;
    Ok((rem, DerValue::Integer(Cow::Borrowed(content))))
}

pub(crate) fn der_read_content_bitstring(i: &[u8], len: usize) -> DerResult {
    let (rem, content) = take::<_, _, DerError>(len)(i)?;
    custom_check!(i, content.is_empty(), DerError::InvalidLength)?;
    let unused_bits = content[0];
    let data = &content[1..];
    custom_check!(i, unused_bits > 7, DerError::InvalidLength)?;
    custom_check!(
        i,
        data.is_empty() && unused_bits != 0,
        DerError::InvalidLength
    )?;
    // X.690 11.2.1: padding bits shall be zero
    if let Some(last) = data.last() {
        let mask = (1u8 << unused_bits) - 1;
        custom_check!(i, last & mask != 0, DerError::DerConstraintFailed)?;
    }
    let b = BitStringObject {
        unused_bits,
        data: Cow::Borrowed(data),
    };
    Ok((rem, DerValue::BitString(b)))
}

#[inline]
pub(crate) fn der_read_content_octetstring(i: &[u8], len: usize) -> DerResult {
    let (rem, content) = take::<_, _, DerError>(len)(i)?;
    Ok((rem, DerValue::OctetString(Cow::Borrowed(content))))
}

pub(crate) fn der_read_content_oid(i: &[u8], len: usize) -> DerResult {
    let (rem, content) = take::<_, _, DerError>(len)(i)?;
    let oid = Oid::from_der_content(content).map_err(|e| {
        debug!("invalid object identifier content: {}", e);
        Err::Error(e)
    })?;
    Ok((rem, DerValue::Oid(oid)))
}

pub(crate) fn der_read_content_utf8string(i: &[u8], len: usize) -> DerResult {
    let (rem, content) = take::<_, _, DerError>(len)(i)?;
    let s = str::from_utf8(content).or(Err(Err::Error(DerError::StringInvalidCharset)))?;
    Ok((rem, DerValue::Utf8String(Cow::Borrowed(s))))
}

/// Test if character is part of the PrintableString alphabet (X.680 41.4)
#[rustfmt::skip]
#[inline]
pub(crate) fn is_printable(b: u8) -> bool {
    b.is_ascii_alphanumeric() ||
        matches!(b, b' ' | b'\'' | b'(' | b')' | b'+' | b',' | b'-' | b'.' | b'/' | b':' | b'=' | b'?')
}

pub(crate) fn der_read_content_printablestring(i: &[u8], len: usize) -> DerResult {
    let (rem, content) = take::<_, _, DerError>(len)(i)?;
    custom_check!(
        i,
        !content.iter().all(|&b| is_printable(b)),
        DerError::StringInvalidCharset
    )?;
    let s = str::from_utf8(content).or(Err(Err::Error(DerError::StringInvalidCharset)))?;
    Ok((rem, DerValue::PrintableString(Cow::Borrowed(s))))
}

pub(crate) fn der_read_content_ia5string(i: &[u8], len: usize) -> DerResult {
    let (rem, content) = take::<_, _, DerError>(len)(i)?;
    custom_check!(i, !content.is_ascii(), DerError::StringInvalidCharset)?;
    let s = str::from_utf8(content).or(Err(Err::Error(DerError::StringInvalidCharset)))?;
    Ok((rem, DerValue::Ia5String(Cow::Borrowed(s))))
}

pub(crate) fn der_read_content_sequence<'a>(
    i: &'a [u8],
    len: usize,
    depth: usize,
    cfg: &ParserConfig,
) -> DerResult<'a> {
    let mut items = Vec::new();
    match cfg.bounds {
        Bounds::Strict => {
            let (rem, mut content) = take::<_, _, DerError>(len)(i)?;
            while !content.is_empty() {
                let (next, item) =
                    parse_der_recursive(content, depth + 1, cfg).map_err(bounded)?;
                items.push(item);
                content = next;
            }
            Ok((rem, DerValue::Sequence(items)))
        }
        Bounds::Permissive => {
            if i.len() < len {
                return Err(Err::Incomplete(Needed::new(len - i.len())));
            }
            let mut cursor = i;
            while i.len() - cursor.len() < len {
                let (next, item) = parse_der_recursive(cursor, depth + 1, cfg)?;
                items.push(item);
                cursor = next;
            }
            // the last child may end past the declared length
            Ok((cursor, DerValue::Sequence(items)))
        }
    }
}

/// Parse the next bytes as the *content* of a DER object.
///
/// Content type is *not* checked, caller is responsible of providing the correct tag.
/// `i` starts after the length octets. Constraints of the tag (primitive or constructed, length
/// and DER rules) are checked.
pub fn der_read_element_content_as<'a>(
    i: &'a [u8],
    tag: Tag,
    len: usize,
    constructed: bool,
    depth: usize,
    cfg: &ParserConfig,
) -> DerResult<'a> {
    if i.len() < len {
        return Err(Err::Incomplete(Needed::new(len - i.len())));
    }
    match tag {
        Tag::Boolean => {
            custom_check!(i, constructed, DerError::ConstructUnexpected)?;
            custom_check!(i, len != 1, DerError::InvalidLength)?;
            der_read_content_bool(i)
        }
        Tag::Integer => {
            custom_check!(i, constructed, DerError::ConstructUnexpected)?;
            der_read_content_integer(i, len)
        }
        Tag::BitString => {
            custom_check!(i, constructed, DerError::ConstructUnexpected)?;
            der_read_content_bitstring(i, len)
        }
        Tag::OctetString => {
            custom_check!(i, constructed, DerError::ConstructUnexpected)?;
            der_read_content_octetstring(i, len)
        }
        Tag::Null => {
            custom_check!(i, constructed, DerError::ConstructUnexpected)?;
            custom_check!(i, len != 0, DerError::InvalidLength)?;
            Ok((i, DerValue::Null))
        }
        Tag::Oid => {
            custom_check!(i, constructed, DerError::ConstructUnexpected)?;
            der_read_content_oid(i, len)
        }
        Tag::Utf8String => {
            custom_check!(i, constructed, DerError::ConstructUnexpected)?;
            der_read_content_utf8string(i, len)
        }
        Tag::Sequence => {
            custom_check!(i, !constructed, DerError::ConstructExpected)?;
            der_read_content_sequence(i, len, depth, cfg)
        }
        Tag::PrintableString => {
            custom_check!(i, constructed, DerError::ConstructUnexpected)?;
            der_read_content_printablestring(i, len)
        }
        Tag::Ia5String => {
            custom_check!(i, constructed, DerError::ConstructUnexpected)?;
            der_read_content_ia5string(i, len)
        }
        _ => {
            debug!("unsupported universal tag {}", tag.0);
            Err(Err::Error(DerError::UnsupportedTag(tag.0)))
        }
    }
}

/// Parse a DER object, expecting a value with specified universal tag
pub fn parse_der_with_tag<T: Into<Tag>>(i: &[u8], tag: T) -> DerResult {
    let tag = tag.into();
    let (rem, hdr) = der_read_element_header(i)?;
    custom_check!(
        i,
        !hdr.is_universal() || hdr.tag != tag,
        DerError::InvalidTag
    )?;
    der_read_element_content_as(
        rem,
        hdr.tag,
        hdr.len,
        hdr.constructed,
        0,
        &ParserConfig::default(),
    )
}

/// Read a boolean value
///
/// The encoding of a boolean value shall be primitive. The contents octets shall consist of a
/// single octet.
///
/// If the boolean value is FALSE, the octet shall be zero.
/// If the boolean value is TRUE, the octet shall be one byte, and have all bits set to one (0xff).
#[inline]
pub fn parse_der_bool(i: &[u8]) -> DerResult {
    parse_der_with_tag(i, Tag::Boolean)
}

/// Read an integer value
///
/// The encoding of an integer value shall be primitive. The contents octets shall consist of one
/// or more octets, and shall be minimal.
///
/// To access the content, use the [`as_u64`](enum.DerValue.html#method.as_u64),
/// [`as_u32`](enum.DerValue.html#method.as_u32) or [`as_i64`](enum.DerValue.html#method.as_i64)
/// methods. Remember that a DER integer has unlimited size, so these methods return `Result`.
///
/// # Examples
///
/// ```rust
/// # use der_codec::der::{parse_der_integer, DerValue};
/// let empty = &b""[..];
/// let bytes = [0x02, 0x03, 0x01, 0x00, 0x01];
/// let expected  = DerValue::from_int_slice(b"\x01\x00\x01");
/// assert_eq!(
///     parse_der_integer(&bytes),
///     Ok((empty, expected))
/// );
/// ```
#[inline]
pub fn parse_der_integer(i: &[u8]) -> DerResult {
    parse_der_with_tag(i, Tag::Integer)
}

/// Read an bitstring value
#[inline]
pub fn parse_der_bitstring(i: &[u8]) -> DerResult {
    parse_der_with_tag(i, Tag::BitString)
}

/// Read an octetstring value
#[inline]
pub fn parse_der_octetstring(i: &[u8]) -> DerResult {
    parse_der_with_tag(i, Tag::OctetString)
}

/// Read a null value
#[inline]
pub fn parse_der_null(i: &[u8]) -> DerResult {
    parse_der_with_tag(i, Tag::Null)
}

/// Read an object identifier value
#[inline]
pub fn parse_der_oid(i: &[u8]) -> DerResult {
    parse_der_with_tag(i, Tag::Oid)
}

/// Read a UTF-8 string value
#[inline]
pub fn parse_der_utf8string(i: &[u8]) -> DerResult {
    parse_der_with_tag(i, Tag::Utf8String)
}

/// Read a printable string value
#[inline]
pub fn parse_der_printablestring(i: &[u8]) -> DerResult {
    parse_der_with_tag(i, Tag::PrintableString)
}

/// Read an IA5 string value
#[inline]
pub fn parse_der_ia5string(i: &[u8]) -> DerResult {
    parse_der_with_tag(i, Tag::Ia5String)
}

/// Parse a sequence of DER elements
///
/// Read a sequence of DER objects, without any constraint on the types.
/// Sequence is parsed recursively, so if constructed elements are found, they are parsed using
/// the same function.
///
/// To read a specific sequence of objects (giving the expected types), use the
/// [`parse_der_sequence_defined`](fn.parse_der_sequence_defined.html) function.
#[inline]
pub fn parse_der_sequence(i: &[u8]) -> DerResult {
    parse_der_with_tag(i, Tag::Sequence)
}

/// Parse DER object and try to decode it as a 32-bits unsigned integer
#[inline]
pub fn parse_der_u32(i: &[u8]) -> DerResult<u32> {
    let (rem, obj) = parse_der_integer(i)?;
    let v = obj.as_u32().map_err(Err::Error)?;
    Ok((rem, v))
}

/// Parse DER object and try to decode it as a 64-bits unsigned integer
#[inline]
pub fn parse_der_u64(i: &[u8]) -> DerResult<u64> {
    let (rem, obj) = parse_der_integer(i)?;
    let v = obj.as_u64().map_err(Err::Error)?;
    Ok((rem, v))
}

/// Parse DER object and try to decode it as a 64-bits signed integer
#[inline]
pub fn parse_der_i64(i: &[u8]) -> DerResult<i64> {
    let (rem, obj) = parse_der_integer(i)?;
    let v = obj.as_i64().map_err(Err::Error)?;
    Ok((rem, v))
}

/// Content parser for a known universal tag, for use with IMPLICIT tagging
///
/// The returned function reads the content described by the header (usually the header of the
/// context-specific element) as if it had tag `tag`.
pub fn parse_der_content<'a>(tag: Tag) -> impl Fn(&'a [u8], &Header) -> DerResult<'a> {
    move |i: &'a [u8], hdr: &Header| {
        der_read_element_content_as(
            i,
            tag,
            hdr.len,
            hdr.constructed,
            0,
            &ParserConfig::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_read_bool() {
        let empty = &b""[..];
        assert_eq!(
            parse_der_bool(&[0x01, 0x01, 0xff]),
            Ok((empty, DerValue::Boolean(true)))
        );
        assert_eq!(
            parse_der_bool(&[0x01, 0x01, 0x00]),
            Ok((empty, DerValue::Boolean(false)))
        );
        assert_eq!(
            parse_der_bool(&[0x01, 0x01, 0x01]),
            Err(Err::Error(DerError::DerConstraintFailed))
        );
        assert_eq!(
            parse_der_bool(&[0x01, 0x02, 0x00, 0x00]),
            Err(Err::Error(DerError::InvalidLength))
        );
    }

    #[test]
    fn test_read_integer_not_minimal() {
        assert_eq!(
            parse_der_integer(&[0x02, 0x02, 0x00, 0x01]),
            Err(Err::Error(DerError::DerConstraintFailed))
        );
        assert_eq!(
            parse_der_integer(&[0x02, 0x00]),
            Err(Err::Error(DerError::InvalidLength))
        );
    }

    #[test]
    fn test_read_bitstring_padding() {
        let (_, obj) = parse_der_bitstring(&hex!("03 02 04 f0")).expect("bitstring");
        assert_eq!(obj.as_bitstring().map(|b| b.unused_bits), Ok(4));
        assert_eq!(
            parse_der_bitstring(&hex!("03 02 04 f8")),
            Err(Err::Error(DerError::DerConstraintFailed))
        );
        assert_eq!(
            parse_der_bitstring(&hex!("03 01 01")),
            Err(Err::Error(DerError::InvalidLength))
        );
        assert_eq!(
            parse_der_bitstring(&hex!("03 02 08 00")),
            Err(Err::Error(DerError::InvalidLength))
        );
    }

    #[test]
    fn test_printable_alphabet() {
        assert!(b"Test User 1'()+,-./:=?".iter().all(|&b| is_printable(b)));
        assert!(!is_printable(b'@'));
        assert!(!is_printable(b'*'));
        assert!(!is_printable(0x80));
    }

    #[test]
    fn test_max_depth() {
        let cfg = ParserConfig::default().with_max_depth(1);
        let bytes = hex!("30 04 30 02 30 00");
        assert_eq!(
            parse_der_recursive(&bytes, 0, &cfg),
            Err(Err::Error(DerError::MaxDepth))
        );
        let bytes = hex!("30 02 30 00");
        assert!(parse_der_recursive(&bytes, 0, &cfg).is_ok());
    }

    #[test]
    fn test_context_specific_several_elements() {
        let bytes = hex!("a0 04 05 00 05 00");
        let (rem, obj) = parse_der(&bytes).expect("strict");
        assert!(rem.is_empty());
        let cs = obj.as_context_specific().expect("context-specific");
        assert_eq!(cs.mode(), TagMode::Implicit);
        assert!(!cs.is_primitive());
        assert_eq!(cs.value().as_slice(), Ok(&bytes[..]));

        let cfg = ParserConfig::default().with_bounds(Bounds::Permissive);
        let (rem, obj) = parse_der_recursive(&bytes, 0, &cfg).expect("permissive");
        assert!(rem.is_empty());
        let cs = obj.as_context_specific().expect("context-specific");
        assert_eq!(cs.mode(), TagMode::Explicit);
        assert_eq!(cs.value(), &DerValue::Null);
    }

    #[test]
    fn test_context_specific_empty() {
        let bytes = hex!("a0 00");
        let (rem, obj) = parse_der(&bytes).expect("empty content");
        assert!(rem.is_empty());
        let cs = obj.as_context_specific().expect("context-specific");
        assert_eq!(cs.mode(), TagMode::Implicit);
        assert!(!cs.is_primitive());
    }
}
