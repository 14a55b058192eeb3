use crate::der::parser::bounded;
use crate::der::*;
use crate::error::*;
use nom::bytes::streaming::take;
use nom::error::ErrorKind;
use nom::Err;
use rusticata_macros::custom_check;

/// Read a SEQUENCE header, returning the remaining input and the sequence content
fn der_read_sequence_content(i: &[u8]) -> DerResult<&[u8]> {
    let (rem, hdr) = der_read_element_header(i)?;
    custom_check!(
        i,
        !hdr.is_universal() || hdr.tag != Tag::Sequence,
        DerError::InvalidTag
    )?;
    custom_check!(i, hdr.is_primitive(), DerError::ConstructExpected)?;
    take::<_, _, DerError>(hdr.len)(rem)
}

/// Parse a SEQUENCE OF object
///
/// Given a subparser for a DER type, parse a sequence of identical objects.
///
/// ```rust
/// # use der_codec::der::{parse_der_integer, parse_der_sequence_of, DerValue};
/// # use der_codec::error::DerResult;
/// #
/// /// Read a SEQUENCE OF INTEGER
/// fn parser(i:&[u8]) -> DerResult {
///     parse_der_sequence_of(parse_der_integer)(i)
/// };
///
/// # let empty = &b""[..];
/// # let bytes = [ 0x30, 0x0a,
/// #               0x02, 0x03, 0x01, 0x00, 0x01,
/// #               0x02, 0x03, 0x01, 0x00, 0x00,
/// # ];
/// # let expected  = DerValue::from_seq(vec![
/// #     DerValue::from_int_slice(b"\x01\x00\x01"),
/// #     DerValue::from_int_slice(b"\x01\x00\x00"),
/// # ]);
/// # assert_eq!(parser(&bytes), Ok((empty, expected)));
/// let (rem, v) = parser(&bytes).expect("parsing failed");
/// ```
pub fn parse_der_sequence_of<'a, F>(f: F) -> impl Fn(&'a [u8]) -> DerResult<'a>
where
    F: Fn(&'a [u8]) -> DerResult<'a>,
{
    let parser = parse_der_sequence_of_v(f);
    move |i: &'a [u8]| {
        let (rem, items) = parser(i)?;
        Ok((rem, DerValue::Sequence(items)))
    }
}

/// Parse a SEQUENCE OF object (returning a vec)
///
/// Given a subparser for a DER type, parse a sequence of identical objects.
///
/// This differs from `parse_der_sequence_of` in the parse function and return type.
///
/// ```rust
/// # use der_codec::der::{parse_der_u32, parse_der_sequence_of_v};
/// # use der_codec::error::DerResult;
/// #
/// /// Read a SEQUENCE OF INTEGER
/// fn parser(i:&[u8]) -> DerResult<Vec<u32>> {
///     parse_der_sequence_of_v(parse_der_u32)(i)
/// };
///
/// # let bytes = [ 0x30, 0x0a,
/// #               0x02, 0x03, 0x01, 0x00, 0x01,
/// #               0x02, 0x03, 0x01, 0x00, 0x00,
/// # ];
/// let (rem, v) = parser(&bytes).expect("parsing failed");
/// # assert!(rem.is_empty());
/// assert_eq!(v, vec![0x10001, 0x10000]);
/// ```
pub fn parse_der_sequence_of_v<'a, T, F>(f: F) -> impl Fn(&'a [u8]) -> DerResult<'a, Vec<T>>
where
    F: Fn(&'a [u8]) -> DerResult<'a, T>,
{
    move |i: &'a [u8]| {
        let (rem, mut content) = der_read_sequence_content(i)?;
        let mut items = Vec::new();
        while !content.is_empty() {
            let (next, item) = f(content).map_err(bounded)?;
            // a subparser consuming nothing would loop forever
            custom_check!(
                content,
                next.len() == content.len(),
                DerError::NomError(ErrorKind::Many0)
            )?;
            items.push(item);
            content = next;
        }
        Ok((rem, items))
    }
}

/// Parse a defined sequence of DER elements (function version)
///
/// Given a parser for the sequence content, apply it to build the output and return the
/// remaining bytes and the built object. The content parser must consume the whole sequence
/// content.
///
/// ```rust
/// # use der_codec::der::*;
/// # use der_codec::error::DerResult;
/// #
/// /// Read SEQUENCE { a INTEGER, b INTEGER }
/// fn parser(i: &[u8]) -> DerResult<(u32, u32)> {
///     parse_der_sequence_defined(|content| {
///         let (content, a) = parse_der_u32(content)?;
///         let (content, b) = parse_der_u32(content)?;
///         Ok((content, (a, b)))
///     })(i)
/// }
///
/// let bytes = [ 0x30, 0x0a,
///               0x02, 0x03, 0x01, 0x00, 0x01,
///               0x02, 0x03, 0x01, 0x00, 0x00,
/// ];
/// let (rem, v) = parser(&bytes).expect("parsing failed");
/// assert_eq!(v, (0x10001, 0x10000));
/// ```
pub fn parse_der_sequence_defined<'a, O, F>(f: F) -> impl Fn(&'a [u8]) -> DerResult<'a, O>
where
    F: Fn(&'a [u8]) -> DerResult<'a, O>,
{
    move |i: &'a [u8]| {
        let (rem, content) = der_read_sequence_content(i)?;
        let (inner_rem, output) = f(content).map_err(bounded)?;
        custom_check!(inner_rem, !inner_rem.is_empty(), DerError::TrailingData)?;
        Ok((rem, output))
    }
}
