//! DER encoder, built on `cookie-factory` serializers

use crate::der::integer::trim_integer;
use crate::der::length::der_encode_length;
use crate::der::parser::is_printable;
use crate::der::*;
use crate::error::{DerError, GEN_INVALID_VALUE, GEN_LENGTH_OUT_OF_RANGE, GEN_OID_TOO_LONG};
use cookie_factory::bytes::be_u8 as gen_u8;
use cookie_factory::combinator::slice;
use cookie_factory::sequence::tuple;
use cookie_factory::{gen_simple, GenError, SerializeFn};
use core::convert::TryFrom;
use std::io::Write;

/// Serialize an identifier octet and the length octets
pub fn der_encode_header<'a, W: Write + 'a>(hdr: &Header) -> impl SerializeFn<W> + 'a {
    let identifier = hdr.identifier_octet();
    let len = Length::try_from(hdr.len).ok();
    move |out| match len {
        Some(len) => tuple((gen_u8(identifier), der_encode_length(len)))(out),
        None => Err(GenError::CustomError(GEN_LENGTH_OUT_OF_RANGE)),
    }
}

/// Serialize a complete element (identifier, length and content)
///
/// Values captured as raw bytes (`DerValue::Direct`) are written unchanged. Integers are written
/// in their minimal form and booleans as `0x00`/`0xff`.
pub fn der_encode_value<'a, W: Write + 'a>(value: &'a DerValue<'a>) -> impl SerializeFn<W> + 'a {
    move |out| {
        if let DerValue::Direct(opaque) = value {
            return slice(opaque.as_bytes())(out);
        }
        let content = der_encode_content(value)?;
        let hdr = Header::new(
            value.class(),
            value.is_constructed(),
            value.tag(),
            content.len(),
        );
        tuple((der_encode_header(&hdr), slice(content)))(out)
    }
}

/// Content octets of a value
///
/// For `[n] IMPLICIT` values, this is the content of the wrapped value.
fn der_encode_content(value: &DerValue<'_>) -> Result<Vec<u8>, GenError> {
    let out = Vec::new();
    match value {
        DerValue::Boolean(b) => gen_simple(gen_u8(if *b { 0xff } else { 0x00 }), out),
        DerValue::Integer(i) => {
            if i.is_empty() {
                return Err(GenError::CustomError(GEN_INVALID_VALUE));
            }
            gen_simple(slice(trim_integer(i)), out)
        }
        DerValue::BitString(b) => {
            if b.unused_bits > 7 || (b.data.is_empty() && b.unused_bits != 0) {
                return Err(GenError::CustomError(GEN_INVALID_VALUE));
            }
            let mut data = b.data.to_vec();
            if let Some(last) = data.last_mut() {
                // padding bits are not part of the value
                *last &= !((1u8 << b.unused_bits) - 1);
            }
            gen_simple(tuple((gen_u8(b.unused_bits), slice(data))), out)
        }
        DerValue::OctetString(s) => gen_simple(slice(s), out),
        DerValue::Utf8String(s) => gen_simple(slice(s.as_bytes()), out),
        DerValue::PrintableString(s) => {
            if !s.bytes().all(is_printable) {
                return Err(GenError::CustomError(GEN_INVALID_VALUE));
            }
            gen_simple(slice(s.as_bytes()), out)
        }
        DerValue::Ia5String(s) => {
            if !s.is_ascii() {
                return Err(GenError::CustomError(GEN_INVALID_VALUE));
            }
            gen_simple(slice(s.as_bytes()), out)
        }
        DerValue::Null => Ok(out),
        DerValue::Oid(oid) => {
            let content = oid.to_der_content().map_err(|e| match e {
                DerError::OidTooLong => GenError::CustomError(GEN_OID_TOO_LONG),
                _ => GenError::CustomError(GEN_INVALID_VALUE),
            })?;
            gen_simple(slice(content), out)
        }
        DerValue::Sequence(items) => {
            let mut out = out;
            for item in items {
                out = gen_simple(der_encode_value(item), out)?;
            }
            Ok(out)
        }
        DerValue::ContextSpecific(cs) => match cs.mode() {
            TagMode::Explicit => gen_simple(der_encode_value(cs.value()), out),
            TagMode::Implicit => der_encode_content(cs.value()),
        },
        DerValue::Direct(opaque) => Ok(opaque.content().to_vec()),
    }
}

impl<'a> DerValue<'a> {
    /// Encode the value as DER
    ///
    /// The output is the canonical encoding. Values without a valid encoding (invalid bitstring
    /// padding count, characters outside the alphabet of a string type, oversized content) fail.
    ///
    /// ```rust
    /// use der_codec::der::DerValue;
    ///
    /// let v = DerValue::from_seq(vec![DerValue::from_u64(5), DerValue::Null]);
    /// assert_eq!(v.to_vec(), Ok(vec![0x30, 0x05, 0x02, 0x01, 0x05, 0x05, 0x00]));
    /// ```
    pub fn to_vec(&self) -> Result<Vec<u8>, DerError> {
        let v = gen_simple(der_encode_value(self), Vec::new())?;
        Ok(v)
    }
}
