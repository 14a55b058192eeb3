use crate::der::parser::bounded;
use crate::der::*;
use crate::error::*;
use nom::bytes::streaming::take;
use nom::Err;
use rusticata_macros::custom_check;

/// Read a context-specific header with tag `tag`, returning the remaining input, the header and
/// the content
fn der_read_tagged_header(i: &[u8], tag: Tag) -> DerResult<(&[u8], Header)> {
    let (rem, hdr) = der_read_element_header(i)?;
    custom_check!(
        i,
        !hdr.is_contextspecific() || hdr.tag != tag,
        DerError::InvalidTag
    )?;
    let (rem, content) = take::<_, _, DerError>(hdr.len)(rem)?;
    Ok((rem, (content, hdr)))
}

/// Read a TAGGED EXPLICIT value (function version)
///
/// The nested element must fill the tagged content.
///
/// The following parses `[2] EXPLICIT INTEGER`:
///
/// ```rust
/// # use der_codec::der::*;
/// # use der_codec::error::DerResult;
/// #
/// fn parse_int_explicit(i:&[u8]) -> DerResult<u32> {
///     parse_der_tagged_explicit(
///         2,
///         parse_der_u32
///     )(i)
/// }
///
/// # let bytes = &[0xa2, 0x05, 0x02, 0x03, 0x01, 0x00, 0x01];
/// let res = parse_int_explicit(bytes);
/// # match res {
/// #     Ok((rem,val)) => {
/// #         assert!(rem.is_empty());
/// #         assert_eq!(val, 0x10001);
/// #     },
/// #     _ => assert!(false)
/// # }
/// ```
pub fn parse_der_tagged_explicit<'a, T, Output, F>(
    tag: T,
    f: F,
) -> impl Fn(&'a [u8]) -> DerResult<'a, Output>
where
    F: Fn(&'a [u8]) -> DerResult<'a, Output>,
    T: Into<Tag>,
{
    let tag = tag.into();
    move |i: &'a [u8]| {
        let (rem, (content, hdr)) = der_read_tagged_header(i, tag)?;
        // X.690 8.14.2: if implicit tagging was not used, the encoding shall be constructed
        custom_check!(i, hdr.is_primitive(), DerError::ConstructExpected)?;
        let (inner_rem, output) = f(content).map_err(bounded)?;
        custom_check!(inner_rem, !inner_rem.is_empty(), DerError::TrailingData)?;
        Ok((rem, output))
    }
}

/// Read a TAGGED IMPLICIT value (function version)
///
/// `f` receives the content and the header of the tagged element.
///
/// The following parses `[2] IMPLICIT INTEGER`:
///
/// ```rust
/// # use der_codec::der::*;
/// # use der_codec::error::DerResult;
/// #
/// fn parse_int_implicit(i:&[u8]) -> DerResult<u32> {
///     let (rem, obj) = parse_der_tagged_implicit(
///         2,
///         parse_der_content(Tag::Integer),
///     )(i)?;
///     let v = obj.as_u32().map_err(nom::Err::Error)?;
///     Ok((rem, v))
/// }
///
/// # let bytes = &[0x82, 0x03, 0x01, 0x00, 0x01];
/// let res = parse_int_implicit(bytes);
/// # match res {
/// #     Ok((rem,val)) => {
/// #         assert!(rem.is_empty());
/// #         assert_eq!(val, 0x10001);
/// #     },
/// #     _ => assert!(false)
/// # }
/// ```
pub fn parse_der_tagged_implicit<'a, T, Output, F>(
    tag: T,
    f: F,
) -> impl Fn(&'a [u8]) -> DerResult<'a, Output>
where
    F: Fn(&'a [u8], &Header) -> DerResult<'a, Output>,
    T: Into<Tag>,
{
    let tag = tag.into();
    move |i: &'a [u8]| {
        let (rem, (content, hdr)) = der_read_tagged_header(i, tag)?;
        let (inner_rem, output) = f(content, &hdr).map_err(bounded)?;
        custom_check!(inner_rem, !inner_rem.is_empty(), DerError::TrailingData)?;
        Ok((rem, output))
    }
}
