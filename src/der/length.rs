//! Length octets (X.690 8.1.3)

use crate::error::{DerError, DerResult};
use cookie_factory::bytes::be_u8 as gen_u8;
use cookie_factory::combinator::slice;
use cookie_factory::sequence::tuple;
use cookie_factory::{gen_simple, SerializeFn};
use core::convert::TryFrom;
use nom::bytes::streaming::take;
use nom::number::streaming::be_u8;
use rusticata_macros::custom_check;
use std::io::Write;

/// Largest content length handled by the codec (31-bit signed range)
pub const MAX_LENGTH: usize = i32::MAX as usize;

/// Largest number of octets following the initial length octet
pub const MAX_LENGTH_OCTETS: usize = 4;

/// Definite content length, always in `[0, MAX_LENGTH]`
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Length(usize);

impl Length {
    /// Length value
    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    /// Number of octets of the DER encoding of this length
    #[inline]
    pub fn encoded_len(self) -> usize {
        encoded_length_size(self.0)
    }
}

impl TryFrom<usize> for Length {
    type Error = DerError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value > MAX_LENGTH {
            return Err(DerError::LengthOutOfRange);
        }
        Ok(Length(value))
    }
}

impl TryFrom<i64> for Length {
    type Error = DerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(DerError::LengthOutOfRange);
        }
        let v = usize::try_from(value).or(Err(DerError::LengthOutOfRange))?;
        Length::try_from(v)
    }
}

impl From<Length> for usize {
    #[inline]
    fn from(len: Length) -> usize {
        len.0
    }
}

/// Decoded length, with the number of octets the length field occupied
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DecodedLength {
    pub value: usize,
    pub octets: usize,
}

/// Number of octets needed to encode `value` in the shortest form
pub(crate) fn encoded_length_size(value: usize) -> usize {
    if value <= 127 {
        1
    } else {
        let significant = (usize::BITS - value.leading_zeros()) as usize;
        1 + (significant + 7) / 8
    }
}

/// Serialize a length in the shortest form allowed by DER
pub(crate) fn der_encode_length<'a, W: Write + 'a>(len: Length) -> impl SerializeFn<W> + 'a {
    move |out| {
        let sz = len.value();
        if sz <= 127 {
            // definite, short form
            gen_u8(sz as u8)(out)
        } else {
            // definite, long form: no leading zero octet
            let v: Vec<u8> = sz
                .to_be_bytes()
                .iter()
                .cloned()
                .skip_while(|&b| b == 0)
                .collect();
            let b0 = 0b1000_0000 | (v.len() as u8);
            tuple((gen_u8(b0), slice(v)))(out)
        }
    }
}

/// Encode `size` as DER length octets
///
/// Fails with `LengthOutOfRange` if `size` does not fit a 31-bit signed value.
///
/// ```rust
/// # use der_codec::der::encode_length;
/// assert_eq!(encode_length(5), Ok(vec![0x05]));
/// assert_eq!(encode_length(500), Ok(vec![0x82, 0x01, 0xf4]));
/// ```
pub fn encode_length(size: usize) -> Result<Vec<u8>, DerError> {
    let len = Length::try_from(size)?;
    Ok(gen_simple(der_encode_length(len), Vec::new())?)
}

/// Read length octets
///
/// Returns `Incomplete` if the input ends inside the length field.
pub fn parse_der_length(i: &[u8]) -> DerResult<usize> {
    let (rem, b0) = be_u8::<_, DerError>(i)?;
    if b0 & 0x80 == 0 {
        return Ok((rem, usize::from(b0)));
    }
    let count = usize::from(b0 & 0x7f);
    // 0x80 alone is the indefinite form (8.1.3.6)
    custom_check!(rem, count == 0, DerError::IndefiniteLength)?;
    custom_check!(rem, count > MAX_LENGTH_OCTETS, DerError::LengthTooLarge)?;
    let (rem, llen) = take::<_, _, DerError>(count)(rem)?;
    let value = llen
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    custom_check!(rem, value > MAX_LENGTH as u64, DerError::LengthOverflow)?;
    Ok((rem, value as usize))
}

/// Read length octets, also rejecting encodings longer than necessary (X.690 10.1)
pub fn parse_der_length_minimal(i: &[u8]) -> DerResult<usize> {
    let (rem, value) = parse_der_length(i)?;
    let octets = i.len() - rem.len();
    custom_check!(
        i,
        octets != encoded_length_size(value),
        DerError::DerConstraintFailed
    )?;
    Ok((rem, value))
}

/// Decode the length field starting at `offset`
///
/// ```rust
/// # use der_codec::der::decode_length;
/// let len = decode_length(&[0x30, 0x82, 0x01, 0xf4], 1).expect("valid length");
/// assert_eq!((len.value, len.octets), (500, 3));
/// ```
pub fn decode_length(bytes: &[u8], offset: usize) -> Result<DecodedLength, DerError> {
    let i = bytes.get(offset..).ok_or(DerError::Truncated)?;
    let (rem, value) = parse_der_length(i)?;
    Ok(DecodedLength {
        value,
        octets: i.len() - rem.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_short_form() {
        assert_eq!(encode_length(0), Ok(vec![0x00]));
        assert_eq!(encode_length(127), Ok(vec![0x7f]));
    }

    #[test]
    fn test_encode_long_form() {
        assert_eq!(encode_length(128), Ok(vec![0x81, 0x80]));
        assert_eq!(encode_length(255), Ok(vec![0x81, 0xff]));
        assert_eq!(encode_length(256), Ok(vec![0x82, 0x01, 0x00]));
        assert_eq!(encode_length(65535), Ok(vec![0x82, 0xff, 0xff]));
        assert_eq!(encode_length(65536), Ok(vec![0x83, 0x01, 0x00, 0x00]));
        assert_eq!(
            encode_length(MAX_LENGTH),
            Ok(vec![0x84, 0x7f, 0xff, 0xff, 0xff])
        );
        assert_eq!(encode_length(MAX_LENGTH + 1), Err(DerError::LengthOutOfRange));
    }

    #[test]
    fn test_length_from_signed() {
        assert_eq!(Length::try_from(-1i64), Err(DerError::LengthOutOfRange));
        assert_eq!(Length::try_from(12i64).map(usize::from), Ok(12));
        assert_eq!(
            Length::try_from(i64::from(i32::MAX) + 1),
            Err(DerError::LengthOutOfRange)
        );
    }

    #[test]
    fn test_encoded_length_size() {
        for &n in &[0usize, 1, 127, 128, 255, 256, 65535, 65536, 0xff_ffff, MAX_LENGTH] {
            let len = Length::try_from(n).unwrap();
            assert_eq!(len.encoded_len(), encode_length(n).unwrap().len(), "n={}", n);
        }
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            decode_length(&[0x05], 0),
            Ok(DecodedLength { value: 5, octets: 1 })
        );
        assert_eq!(
            decode_length(&[0x82, 0x01, 0xf4], 0),
            Ok(DecodedLength {
                value: 500,
                octets: 3
            })
        );
        assert_eq!(decode_length(&[0x80], 0), Err(DerError::IndefiniteLength));
        assert_eq!(
            decode_length(&[0x85, 1, 2, 3, 4, 5], 0),
            Err(DerError::LengthTooLarge)
        );
        assert_eq!(
            decode_length(&[0x84, 0x80, 0x00, 0x00, 0x00], 0),
            Err(DerError::LengthOverflow)
        );
        assert_eq!(decode_length(&[0x82, 0x01], 0), Err(DerError::Truncated));
        assert_eq!(decode_length(&[0x05], 1), Err(DerError::Truncated));
        assert_eq!(decode_length(&[0x05], 2), Err(DerError::Truncated));
    }

    #[test]
    fn test_decode_not_minimal() {
        let bytes = [0x81, 0x05];
        assert_eq!(parse_der_length(&bytes), Ok((&b""[..], 5)));
        assert_eq!(
            parse_der_length_minimal(&bytes),
            Err(nom::Err::Error(DerError::DerConstraintFailed))
        );
        let bytes = [0x82, 0x00, 0x80];
        assert_eq!(
            parse_der_length_minimal(&bytes),
            Err(nom::Err::Error(DerError::DerConstraintFailed))
        );
    }
}
