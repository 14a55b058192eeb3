#[macro_use]
extern crate pretty_assertions;

use der_codec::der::*;
use der_codec::error::*;
use der_codec::oid::Oid;
use der_codec::{encode, parse};
use hex_literal::hex;
use std::borrow::Cow;
use test_case::test_case;

#[test_case(0, &hex!("02 01 00") ; "zero")]
#[test_case(127, &hex!("02 01 7f") ; "small positive")]
#[test_case(128, &hex!("02 02 00 80") ; "high bit set")]
#[test_case(256, &hex!("02 02 01 00") ; "two octets")]
#[test_case(-1, &hex!("02 01 ff") ; "minus one")]
#[test_case(-128, &hex!("02 01 80") ; "minus 128")]
#[test_case(-129, &hex!("02 02 ff 7f") ; "minus 129")]
#[test_case(i64::MIN, &hex!("02 08 80 00 00 00 00 00 00 00") ; "min")]
fn test_encode_i64(value: i64, expected: &[u8]) {
    let obj = DerValue::from_i64(value);
    assert_eq!(encode(&obj).as_deref(), Ok(expected));
    let decoded = parse(expected).expect("decoding");
    assert_eq!(decoded.as_i64(), Ok(value));
}

#[test]
fn test_encode_u64() {
    let obj = DerValue::from_u64(u64::MAX);
    let bytes = encode(&obj).expect("encoding");
    assert_eq!(bytes, hex!("02 09 00 ff ff ff ff ff ff ff ff").to_vec());
    assert_eq!(parse(&bytes).and_then(|v| v.as_u64()), Ok(u64::MAX));
}

#[test]
fn test_encode_integer_normalized() {
    // redundant leading octets are removed
    let obj = DerValue::Integer(Cow::Borrowed(&[0x00, 0x00, 0x01]));
    assert_eq!(encode(&obj), Ok(vec![0x02, 0x01, 0x01]));
    let obj = DerValue::Integer(Cow::Borrowed(&[0xff, 0xff, 0x80]));
    assert_eq!(encode(&obj), Ok(vec![0x02, 0x01, 0x80]));
    let obj = DerValue::Integer(Cow::Borrowed(&[]));
    assert_eq!(encode(&obj), Err(DerError::InvalidValue));
}

#[test]
fn test_encode_leaves() {
    assert_eq!(encode(&DerValue::Boolean(true)), Ok(vec![0x01, 0x01, 0xff]));
    assert_eq!(encode(&DerValue::Boolean(false)), Ok(vec![0x01, 0x01, 0x00]));
    assert_eq!(encode(&DerValue::Null), Ok(vec![0x05, 0x00]));
    let obj = DerValue::Utf8String(Cow::Borrowed("é"));
    assert_eq!(encode(&obj), Ok(vec![0x0c, 0x02, 0xc3, 0xa9]));
    let obj = DerValue::PrintableString(Cow::Borrowed("Test CA"));
    assert_eq!(
        encode(&obj),
        Ok(hex!("13 07 54 65 73 74 20 43 41").to_vec())
    );
    let obj = DerValue::Ia5String(Cow::Borrowed("a@b"));
    assert_eq!(encode(&obj), Ok(hex!("16 03 61 40 62").to_vec()));
}

#[test_case(DerValue::PrintableString(Cow::Borrowed("a@b")) ; "printable at sign")]
#[test_case(DerValue::PrintableString(Cow::Borrowed("été")) ; "printable non ascii")]
#[test_case(DerValue::Ia5String(Cow::Borrowed("é")) ; "ia5 non ascii")]
#[test_case(DerValue::BitString(BitStringObject { unused_bits: 8, data: Cow::Borrowed(&[0x00]) }) ; "bitstring unused bits")]
#[test_case(DerValue::BitString(BitStringObject { unused_bits: 1, data: Cow::Borrowed(&[]) }) ; "bitstring empty with unused bits")]
fn test_encode_invalid_value(value: DerValue<'static>) {
    let err = encode(&value).expect_err("no DER encoding");
    assert_eq!(err, DerError::InvalidValue);
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
}

#[test]
fn test_encode_bitstring_padding() {
    let obj = DerValue::BitString(BitStringObject {
        unused_bits: 4,
        data: Cow::Borrowed(&[0x12, 0xff]),
    });
    let bytes = encode(&obj).expect("encoding");
    assert_eq!(bytes, hex!("03 03 04 12 f0").to_vec());
    // canonical output is accepted by the decoder
    let decoded = parse(&bytes).expect("decoding");
    assert_eq!(decoded.as_bitstring().map(BitStringObject::bit_len), Ok(12));
}

#[test]
fn test_encode_long_content() {
    let data = vec![0x41u8; 500];
    let obj = DerValue::OctetString(Cow::Borrowed(&data));
    let bytes = encode(&obj).expect("encoding");
    assert_eq!(bytes.len(), 504);
    assert_eq!(&bytes[..4], &hex!("04 82 01 f4"));
    let decoded = parse(&bytes).expect("decoding");
    assert_eq!(decoded.as_slice(), Ok(&data[..]));
}

#[test]
fn test_encode_oid() {
    let obj = DerValue::from_oid_str("2.999.3").expect("valid OID");
    assert_eq!(encode(&obj), Ok(hex!("06 03 88 37 03").to_vec()));
    // 40 arcs of u64::MAX need 10 octets each
    let mut arcs = vec![1, 2];
    arcs.extend_from_slice(&[u64::MAX; 40]);
    let obj = DerValue::Oid(Oid::from(&arcs).expect("valid arcs"));
    let err = encode(&obj).expect_err("content too long");
    assert_eq!(err, DerError::OidTooLong);
    assert_eq!(err.category(), ErrorCategory::UnsupportedFormat);
}

#[test]
fn test_encode_sequence() {
    let obj = DerValue::from_seq(vec![
        DerValue::from_u64(1),
        DerValue::from_seq(vec![DerValue::Boolean(true), DerValue::Null]),
        DerValue::from_seq(vec![]),
    ]);
    let expected = hex!("30 0c 02 01 01 30 05 01 01 ff 05 00 30 00");
    assert_eq!(encode(&obj), Ok(expected.to_vec()));
    assert_eq!(parse(&expected), Ok(obj));

    let obj = DerValue::from_seq(vec![DerValue::Null, DerValue::Null]);
    assert_eq!(encode(&obj), Ok(hex!("30 04 05 00 05 00").to_vec()));
    assert_eq!(encode(&DerValue::from_seq(vec![])), Ok(vec![0x30, 0x00]));
}

#[test]
fn test_encode_tagged() {
    // [3] EXPLICIT BOOLEAN
    let obj = DerValue::explicit(3, DerValue::Boolean(true)).expect("valid tag");
    assert_eq!(encode(&obj), Ok(hex!("a3 03 01 01 ff").to_vec()));
    // [1] IMPLICIT INTEGER
    let obj = DerValue::implicit(1, DerValue::from_u64(5)).expect("valid tag");
    assert_eq!(encode(&obj), Ok(hex!("81 01 05").to_vec()));
    // [2] IMPLICIT SEQUENCE keeps the constructed bit
    let obj = DerValue::implicit(2, DerValue::from_seq(vec![DerValue::Null])).expect("valid tag");
    assert_eq!(encode(&obj), Ok(hex!("a2 02 05 00").to_vec()));
    // highest low tag number
    let obj = DerValue::explicit(30, DerValue::Null).expect("valid tag");
    assert_eq!(encode(&obj), Ok(hex!("be 02 05 00").to_vec()));
}

#[test]
fn test_context_specific_invalid() {
    assert_eq!(
        ContextSpecific::new(0, TagMode::Explicit, true, DerValue::Null),
        Err(DerError::ExplicitPrimitive)
    );
    let err = DerValue::explicit(31, DerValue::Null).expect_err("tag too large");
    assert_eq!(err, DerError::TagOutOfRange(31));
    assert_eq!(err.category(), ErrorCategory::UnsupportedFormat);
    assert_eq!(
        ContextSpecific::new(0, TagMode::Implicit, false, DerValue::Null),
        Err(DerError::InvalidValue)
    );
}

#[test]
fn test_encode_direct() {
    let raw = hex!("04 02 ab cd");
    let obj = DerValue::direct(&raw[..]).expect("single element");
    assert_eq!(encode(&obj), Ok(raw.to_vec()));
    let seq = DerValue::from_seq(vec![obj, DerValue::Null]);
    assert_eq!(encode(&seq), Ok(hex!("30 06 04 02 ab cd 05 00").to_vec()));
}

#[test_case(&hex!("02 01") ; "truncated")]
#[test_case(&hex!("05 00 05 00") ; "two elements")]
#[test_case(&hex!("41 00") ; "application class")]
#[test_case(&hex!("04 81 01 00") ; "non minimal length")]
#[test_case(&[] ; "empty")]
fn test_direct_invalid(bytes: &[u8]) {
    assert_eq!(DerValue::direct(bytes), Err(DerError::InvalidOpaque));
}

#[test_case(&hex!("30 17 30 0d 06 09 2a 86 48 86 f7 0d 01 01 01 05 00 03 06 00 30 03 02 01 03") ; "key info")]
#[test_case(&hex!("a0 03 02 01 02") ; "explicit version")]
#[test_case(&hex!("30 08 81 03 41 42 43 0c 01 41") ; "implicit kept as raw bytes")]
#[test_case(&hex!("30 0a 16 02 61 62 13 01 41 01 01 00") ; "strings and boolean")]
fn test_roundtrip(bytes: &[u8]) {
    let value = parse(bytes).expect("decoding");
    assert_eq!(encode(&value).as_deref(), Ok(bytes));
}

#[test_case(vec![], &hex!("a2 00"), TagMode::Implicit ; "empty sequence")]
#[test_case(vec![DerValue::Null], &hex!("a2 02 05 00"), TagMode::Explicit ; "one child")]
#[test_case(vec![DerValue::Null, DerValue::from_u64(7)], &hex!("a2 05 05 00 02 01 07"), TagMode::Implicit ; "two children")]
fn test_roundtrip_implicit_constructed(
    children: Vec<DerValue<'static>>,
    expected: &[u8],
    decoded_mode: TagMode,
) {
    let value = DerValue::implicit(2, DerValue::from_seq(children)).expect("valid tag");
    let bytes = encode(&value).expect("encoding");
    assert_eq!(&bytes[..], expected);
    // without the schema, a single child reads as EXPLICIT, anything else stays raw
    let decoded = parse(&bytes).expect("decoding");
    let cs = decoded.as_context_specific().expect("context-specific");
    assert_eq!(cs.tag(), 2);
    assert_eq!(cs.mode(), decoded_mode);
    assert!(!cs.is_primitive());
    assert_eq!(encode(&decoded).as_deref(), Ok(expected));
}
