use crate::der::integer::*;
use crate::der::{der_read_element_header, Class};
use crate::error::DerError;
use crate::oid::Oid;
use rusticata_macros::newtype_enum;
use std::borrow::Cow;
use std::ops::Index;
use std::str::FromStr;

/// Largest tag number that fits the low-tag-number form
pub const MAX_LOW_TAG: u32 = 30;

/// DER Tag as defined in X.680 section 8.4
///
/// Only low tag numbers (0 to 30) can be encoded or decoded. `Tag::Opaque` is not a real tag: it
/// is reported by values captured as raw bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub u32);

newtype_enum! {
impl debug Tag {
    Boolean = 0x1,
    Integer = 0x2,
    BitString = 0x3,
    OctetString = 0x4,
    Null = 0x05,
    Oid = 0x06,
    Utf8String = 0xc,

    Sequence = 0x10,
    PrintableString = 0x13,

    Ia5String = 0x16,

    Opaque = 0xff,
}
}

impl From<u32> for Tag {
    fn from(v: u32) -> Self {
        Tag(v)
    }
}

/// Context-specific tagging mode
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TagMode {
    /// The tag wraps the complete encoding of the inner value
    Explicit,
    /// The tag replaces the identifier of the inner value
    Implicit,
}

/// Representation of a DER-encoded (X.690) value
///
/// Decoded values borrow their data from the input buffer. Values built for encoding can own it.
#[derive(Debug, Clone, PartialEq)]
pub enum DerValue<'a> {
    Boolean(bool),
    /// Two's complement, big-endian content octets
    Integer(Cow<'a, [u8]>),
    BitString(BitStringObject<'a>),
    OctetString(Cow<'a, [u8]>),
    Utf8String(Cow<'a, str>),
    PrintableString(Cow<'a, str>),
    Ia5String(Cow<'a, str>),
    Null,
    Oid(Oid),
    Sequence(Vec<DerValue<'a>>),
    ContextSpecific(ContextSpecific<'a>),
    /// A complete element kept as raw bytes
    Direct(Opaque<'a>),
}

/// BitString wrapper
#[derive(Clone, Debug, PartialEq)]
pub struct BitStringObject<'a> {
    /// Number of unused bits in the last octet (0 to 7)
    pub unused_bits: u8,
    pub data: Cow<'a, [u8]>,
}

impl<'a> BitStringObject<'a> {
    /// Build a bitstring, checking the number of unused bits
    pub fn new<D: Into<Cow<'a, [u8]>>>(unused_bits: u8, data: D) -> Result<Self, DerError> {
        let data = data.into();
        if unused_bits > 7 || (data.is_empty() && unused_bits != 0) {
            return Err(DerError::InvalidValue);
        }
        Ok(BitStringObject { unused_bits, data })
    }

    /// Number of significant bits
    pub fn bit_len(&self) -> usize {
        (self.data.len() * 8).saturating_sub(usize::from(self.unused_bits))
    }

    /// Test if bit `bitnum` is set
    pub fn is_set(&self, bitnum: usize) -> bool {
        if bitnum >= self.bit_len() {
            return false;
        }
        let byte_pos = bitnum / 8;
        let b = 7 - (bitnum % 8);
        (self.data[byte_pos] & (1 << b)) != 0
    }
}

impl<'a> AsRef<[u8]> for BitStringObject<'a> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Context-specific tagged value
///
/// Built with [`ContextSpecific::new`], which rejects EXPLICIT tagging with a primitive encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSpecific<'a> {
    tag: u32,
    mode: TagMode,
    primitive: bool,
    value: Box<DerValue<'a>>,
}

impl<'a> ContextSpecific<'a> {
    /// Wrap `value` with context-specific tag `[tag]`
    ///
    /// Fails with `ExplicitPrimitive` for `TagMode::Explicit` with `primitive` set, with
    /// `TagOutOfRange` for tags above 30, and with `InvalidValue` if an IMPLICIT primitive flag
    /// does not match the encoding of the inner value.
    pub fn new(
        tag: u32,
        mode: TagMode,
        primitive: bool,
        value: DerValue<'a>,
    ) -> Result<Self, DerError> {
        if mode == TagMode::Explicit && primitive {
            return Err(DerError::ExplicitPrimitive);
        }
        if tag > MAX_LOW_TAG {
            return Err(DerError::TagOutOfRange(tag));
        }
        if mode == TagMode::Implicit && primitive != value.is_primitive() {
            return Err(DerError::InvalidValue);
        }
        Ok(ContextSpecific::from_parts(tag, mode, primitive, value))
    }

    pub(crate) fn from_parts(tag: u32, mode: TagMode, primitive: bool, value: DerValue<'a>) -> Self {
        ContextSpecific {
            tag,
            mode,
            primitive,
            value: Box::new(value),
        }
    }

    #[inline]
    pub fn tag(&self) -> u32 {
        self.tag
    }

    #[inline]
    pub fn mode(&self) -> TagMode {
        self.mode
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.primitive
    }

    #[inline]
    pub fn value(&self) -> &DerValue<'a> {
        &self.value
    }

    pub fn into_value(self) -> DerValue<'a> {
        *self.value
    }
}

/// A complete DER element (identifier, length and content) kept as raw bytes
///
/// This is how IMPLICIT tagged values are decoded: without the ASN.1 definition, the type of the
/// content is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Opaque<'a> {
    data: Cow<'a, [u8]>,
    header_len: usize,
}

impl<'a> Opaque<'a> {
    /// Check that `data` holds exactly one element with a supported header
    pub fn new<D: Into<Cow<'a, [u8]>>>(data: D) -> Result<Self, DerError> {
        let data = data.into();
        let header_len = match der_read_element_header(&data) {
            Ok((rem, hdr)) if hdr.class.is_supported() && rem.len() == hdr.len => hdr.header_len,
            _ => return Err(DerError::InvalidOpaque),
        };
        Ok(Opaque { data, header_len })
    }

    pub(crate) fn from_raw_parts(data: &'a [u8], header_len: usize) -> Self {
        Opaque {
            data: Cow::Borrowed(data),
            header_len,
        }
    }

    /// The whole element
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Identifier octet of the element
    #[inline]
    pub fn identifier(&self) -> u8 {
        self.data[0]
    }

    /// Content octets of the element
    #[inline]
    pub fn content(&self) -> &[u8] {
        &self.data[self.header_len..]
    }

    #[inline]
    pub fn is_constructed(&self) -> bool {
        self.identifier() & 0b0010_0000 != 0
    }
}

impl<'a> DerValue<'a> {
    /// Build an INTEGER from a signed value
    pub fn from_i64(i: i64) -> DerValue<'static> {
        DerValue::Integer(Cow::Owned(encode_i64(i)))
    }

    /// Build an INTEGER from an unsigned value
    pub fn from_u64(i: u64) -> DerValue<'static> {
        DerValue::Integer(Cow::Owned(encode_u64(i)))
    }

    /// Build an INTEGER from a slice containing an encoded integer
    pub fn from_int_slice(i: &'a [u8]) -> DerValue<'a> {
        DerValue::Integer(Cow::Borrowed(i))
    }

    /// Build an OBJECT IDENTIFIER from its dotted form
    pub fn from_oid_str(s: &str) -> Result<DerValue<'static>, DerError> {
        Oid::from_str(s).map(DerValue::Oid)
    }

    /// Build a SEQUENCE from a vector of values
    pub fn from_seq(l: Vec<DerValue<'a>>) -> DerValue<'a> {
        DerValue::Sequence(l)
    }

    /// Build `[tag] EXPLICIT value`
    pub fn explicit(tag: u32, value: DerValue<'a>) -> Result<DerValue<'a>, DerError> {
        ContextSpecific::new(tag, TagMode::Explicit, false, value).map(DerValue::ContextSpecific)
    }

    /// Build `[tag] IMPLICIT value`, primitive if `value` is primitive
    pub fn implicit(tag: u32, value: DerValue<'a>) -> Result<DerValue<'a>, DerError> {
        let primitive = value.is_primitive();
        ContextSpecific::new(tag, TagMode::Implicit, primitive, value)
            .map(DerValue::ContextSpecific)
    }

    /// Wrap raw bytes of one complete element
    pub fn direct<D: Into<Cow<'a, [u8]>>>(data: D) -> Result<DerValue<'a>, DerError> {
        Opaque::new(data).map(DerValue::Direct)
    }

    #[rustfmt::skip]
    pub fn tag(&self) -> Tag {
        match self {
            DerValue::Boolean(_)         => Tag::Boolean,
            DerValue::Integer(_)         => Tag::Integer,
            DerValue::BitString(_)       => Tag::BitString,
            DerValue::OctetString(_)     => Tag::OctetString,
            DerValue::Utf8String(_)      => Tag::Utf8String,
            DerValue::PrintableString(_) => Tag::PrintableString,
            DerValue::Ia5String(_)       => Tag::Ia5String,
            DerValue::Null               => Tag::Null,
            DerValue::Oid(_)             => Tag::Oid,
            DerValue::Sequence(_)        => Tag::Sequence,
            DerValue::ContextSpecific(c) => Tag(c.tag),
            DerValue::Direct(_)          => Tag::Opaque,
        }
    }

    /// Class of the identifier octet this value is encoded with
    pub fn class(&self) -> Class {
        match self {
            DerValue::ContextSpecific(_) => Class::ContextSpecific,
            DerValue::Direct(o) => {
                if o.identifier() & 0b1000_0000 != 0 {
                    Class::ContextSpecific
                } else {
                    Class::Universal
                }
            }
            _ => Class::Universal,
        }
    }

    /// Test if value is primitive
    pub fn is_primitive(&self) -> bool {
        match self {
            DerValue::Sequence(_) => false,
            DerValue::ContextSpecific(c) => c.primitive,
            DerValue::Direct(o) => !o.is_constructed(),
            _ => true,
        }
    }

    /// Test if value is constructed
    #[inline]
    pub fn is_constructed(&self) -> bool {
        !self.is_primitive()
    }

    /// Attempt to read integer value from DER value.
    /// This can fail if the value is not an integer, or if it is too large.
    ///
    /// ```rust
    /// # use der_codec::der::DerValue;
    /// let der_int  = DerValue::from_int_slice(b"\x01\x00\x01");
    /// assert_eq!(
    ///     der_int.as_u64(),
    ///     Ok(0x10001)
    /// );
    /// ```
    pub fn as_u64(&self) -> Result<u64, DerError> {
        match self {
            DerValue::Integer(i) => decode_array_uint8(trim_integer(i)),
            _ => Err(DerError::TypeError),
        }
    }

    /// Attempt to read integer value from DER value.
    /// This can fail if the value is not an integer, or if it is too large.
    pub fn as_u32(&self) -> Result<u32, DerError> {
        match self {
            DerValue::Integer(i) => decode_array_uint4(trim_integer(i)),
            _ => Err(DerError::TypeError),
        }
    }

    /// Attempt to read a signed integer value from DER value.
    pub fn as_i64(&self) -> Result<i64, DerError> {
        match self {
            DerValue::Integer(i) => decode_array_int8(trim_integer(i)),
            _ => Err(DerError::TypeError),
        }
    }

    /// Attempt to read a signed integer value from DER value.
    pub fn as_i32(&self) -> Result<i32, DerError> {
        match self {
            DerValue::Integer(i) => decode_array_int4(trim_integer(i)),
            _ => Err(DerError::TypeError),
        }
    }

    pub fn as_bool(&self) -> Result<bool, DerError> {
        match *self {
            DerValue::Boolean(b) => Ok(b),
            _ => Err(DerError::TypeError),
        }
    }

    pub fn as_oid(&self) -> Result<&Oid, DerError> {
        match self {
            DerValue::Oid(o) => Ok(o),
            _ => Err(DerError::TypeError),
        }
    }

    pub fn as_bitstring(&self) -> Result<&BitStringObject<'a>, DerError> {
        match self {
            DerValue::BitString(b) => Ok(b),
            _ => Err(DerError::TypeError),
        }
    }

    pub fn as_sequence(&self) -> Result<&Vec<DerValue<'a>>, DerError> {
        match self {
            DerValue::Sequence(s) => Ok(s),
            _ => Err(DerError::TypeError),
        }
    }

    pub fn as_context_specific(&self) -> Result<&ContextSpecific<'a>, DerError> {
        match self {
            DerValue::ContextSpecific(c) => Ok(c),
            _ => Err(DerError::TypeError),
        }
    }

    /// Attempt to get the content from a DER value, as a slice.
    /// This can fail if the value does not contain a type directly equivalent to a slice (e.g a
    /// sequence). For `Direct` values, the whole element is returned.
    #[rustfmt::skip]
    pub fn as_slice(&self) -> Result<&[u8], DerError> {
        match self {
            DerValue::Utf8String(s) |
            DerValue::PrintableString(s) |
            DerValue::Ia5String(s) => Ok(s.as_bytes()),
            DerValue::Integer(s) |
            DerValue::OctetString(s) => Ok(s),
            DerValue::BitString(b) => Ok(&b.data),
            DerValue::Direct(o) => Ok(o.as_bytes()),
            _ => Err(DerError::TypeError),
        }
    }

    /// Attempt to get the content from a DER value, as a str.
    /// This can fail if the value does not contain a string type.
    pub fn as_str(&self) -> Result<&str, DerError> {
        match self {
            DerValue::Utf8String(s) | DerValue::PrintableString(s) | DerValue::Ia5String(s) => {
                Ok(s)
            }
            _ => Err(DerError::TypeError),
        }
    }

    /// Iterate over the children of a sequence (nothing for other values)
    pub fn ref_iter(&self) -> DerValueRefIterator<'_, 'a> {
        DerValueRefIterator { obj: self, idx: 0 }
    }
}

/// Build a DER value from an OID.
impl<'a> From<Oid> for DerValue<'a> {
    fn from(oid: Oid) -> DerValue<'a> {
        DerValue::Oid(oid)
    }
}

impl<'a> From<bool> for DerValue<'a> {
    fn from(b: bool) -> DerValue<'a> {
        DerValue::Boolean(b)
    }
}

impl<'a> From<ContextSpecific<'a>> for DerValue<'a> {
    fn from(c: ContextSpecific<'a>) -> DerValue<'a> {
        DerValue::ContextSpecific(c)
    }
}

#[derive(Debug)]
pub struct DerValueRefIterator<'b, 'a> {
    obj: &'b DerValue<'a>,
    idx: usize,
}

impl<'b, 'a> Iterator for DerValueRefIterator<'b, 'a> {
    type Item = &'b DerValue<'a>;
    fn next(&mut self) -> Option<&'b DerValue<'a>> {
        let res = match self.obj {
            DerValue::Sequence(v) => v.get(self.idx),
            _ => None,
        };
        self.idx += 1;
        res
    }
}

impl<'a> Index<usize> for DerValue<'a> {
    type Output = DerValue<'a>;

    fn index(&self, idx: usize) -> &DerValue<'a> {
        match self {
            DerValue::Sequence(v) if idx < v.len() => &v[idx],
            _ => panic!("Try to index DerValue which is not a sequence"),
        }
    }
}

#[cfg(feature = "bigint")]
#[cfg_attr(docsrs, doc(cfg(feature = "bigint")))]
use num_bigint::{BigInt, BigUint, Sign};

#[cfg(feature = "bigint")]
#[cfg_attr(docsrs, doc(cfg(feature = "bigint")))]
impl<'a> DerValue<'a> {
    pub fn as_bigint(&self) -> Option<BigInt> {
        match self {
            DerValue::Integer(s) => Some(BigInt::from_signed_bytes_be(s)),
            _ => None,
        }
    }

    pub fn as_biguint(&self) -> Option<BigUint> {
        match self {
            DerValue::Integer(s) if !is_highest_bit_set(s) => Some(BigUint::from_bytes_be(s)),
            _ => None,
        }
    }

    pub fn from_bigint(i: &BigInt) -> DerValue<'static> {
        let bytes = match i.sign() {
            Sign::NoSign => vec![0],
            _ => i.to_signed_bytes_be(),
        };
        DerValue::Integer(Cow::Owned(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_der_as_u64() {
        let der_obj = DerValue::from_int_slice(b"\x01\x00\x02");
        assert_eq!(der_obj.as_u64(), Ok(0x10002));
        assert_eq!(DerValue::Null.as_u64(), Err(DerError::TypeError));
        // caller-built value with redundant leading octets
        let der_obj = DerValue::Integer(Cow::Borrowed(&[0x00; 10]));
        assert_eq!(der_obj.as_u64(), Ok(0));
        let der_obj = DerValue::Integer(Cow::Owned(vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x01]));
        assert_eq!(der_obj.as_u64(), Ok(1));
        assert_eq!(der_obj.as_u32(), Ok(1));
    }

    #[test]
    fn test_der_as_signed() {
        assert_eq!(DerValue::from_i64(-129).as_i64(), Ok(-129));
        assert_eq!(DerValue::from_i64(-1).as_i32(), Ok(-1));
        assert_eq!(DerValue::from_i64(-1).as_u32(), Err(DerError::IntegerNegative));
        assert_eq!(DerValue::from_u64(u64::MAX).as_u64(), Ok(u64::MAX));
    }

    #[test]
    fn test_der_seq_iter() {
        let der_obj = DerValue::from_seq(vec![
            DerValue::from_int_slice(b"\x01\x00\x01"),
            DerValue::from_int_slice(b"\x01\x00\x00"),
        ]);
        let expected_values = vec![
            DerValue::from_int_slice(b"\x01\x00\x01"),
            DerValue::from_int_slice(b"\x01\x00\x00"),
        ];

        for (idx, v) in der_obj.ref_iter().enumerate() {
            assert_eq!((*v), expected_values[idx]);
        }
        assert_eq!(der_obj.ref_iter().count(), 2);
        assert_eq!(der_obj[1], expected_values[1]);
        assert_eq!(DerValue::Null.ref_iter().count(), 0);
    }

    #[test]
    fn test_der_from_oid() {
        let obj: DerValue = Oid::from(&[1, 2]).unwrap().into();
        let expected = DerValue::from_oid_str("1.2").unwrap();

        assert_eq!(obj, expected);
        assert_eq!(obj.tag(), Tag::Oid);
    }

    #[test]
    fn test_der_bistringobject() {
        let obj = BitStringObject::new(0, &[0x0fu8, 0x00, 0x40][..]).unwrap();
        assert!(!obj.is_set(0));
        assert!(obj.is_set(7));
        assert!(!obj.is_set(9));
        assert!(obj.is_set(17));
        assert_eq!(obj.bit_len(), 24);
        assert!(BitStringObject::new(8, &[0x00u8][..]).is_err());
        assert!(BitStringObject::new(1, &[] as &[u8]).is_err());
    }

    #[test]
    fn test_der_bistringobject_asref() {
        fn assert_equal<T: AsRef<[u8]>>(s: T, b: &[u8]) {
            assert_eq!(s.as_ref(), b);
        }
        let b: &[u8] = &[0x0f, 0x00, 0x40];
        let obj = BitStringObject::new(0, b).unwrap();
        assert_equal(obj, b);
    }

    #[test]
    fn test_context_specific_new() {
        assert_eq!(
            ContextSpecific::new(0, TagMode::Explicit, true, DerValue::Null),
            Err(DerError::ExplicitPrimitive)
        );
        assert_eq!(
            ContextSpecific::new(31, TagMode::Explicit, false, DerValue::Null),
            Err(DerError::TagOutOfRange(31))
        );
        assert_eq!(
            ContextSpecific::new(1, TagMode::Implicit, true, DerValue::from_seq(vec![])),
            Err(DerError::InvalidValue)
        );
        let c = ContextSpecific::new(3, TagMode::Explicit, false, DerValue::Null).unwrap();
        assert_eq!(c.tag(), 3);
        assert_eq!(c.mode(), TagMode::Explicit);
        assert_eq!(c.value(), &DerValue::Null);
        let v = DerValue::from(c);
        assert_eq!(v.tag(), Tag(3));
        assert_eq!(v.class(), Class::ContextSpecific);
        assert!(v.is_constructed());
    }

    #[test]
    fn test_opaque() {
        let o = Opaque::new(&[0x82u8, 0x01, 0x05][..]).unwrap();
        assert_eq!(o.content(), &[0x05]);
        assert_eq!(o.identifier(), 0x82);
        assert!(!o.is_constructed());
        assert_eq!(Opaque::new(&[0x82u8, 0x02, 0x05][..]), Err(DerError::InvalidOpaque));
        assert_eq!(
            Opaque::new(&[0x05u8, 0x00, 0x00][..]),
            Err(DerError::InvalidOpaque)
        );
        // application class
        assert_eq!(Opaque::new(&[0x45u8, 0x00][..]), Err(DerError::InvalidOpaque));
        let v = DerValue::direct(vec![0x30u8, 0x00]).unwrap();
        assert_eq!(v.tag(), Tag::Opaque);
        assert!(v.is_constructed());
    }

    #[cfg(feature = "bigint")]
    #[test]
    fn test_der_to_bigint() {
        let obj = DerValue::from_int_slice(b"\x01\x00\x01");
        let expected = BigInt::from(0x10001);

        assert_eq!(obj.as_bigint(), Some(expected.clone()));
        assert_eq!(DerValue::from_bigint(&expected), obj);
        assert_eq!(
            DerValue::from_int_slice(b"\xff").as_bigint(),
            Some(BigInt::from(-1))
        );
    }

    #[cfg(feature = "bigint")]
    #[test]
    fn test_der_to_biguint() {
        let obj = DerValue::from_int_slice(b"\x01\x00\x01");
        let expected = BigUint::from(0x10001u32);

        assert_eq!(obj.as_biguint(), Some(expected));
    }
}
