//! # DER codec
//!
//! An encoder and decoder for the subset of the Distinguished Encoding Rules (DER [[X.690]]) used
//! by X.509 certificates and PKCS structures, implemented with the
//! [nom](https://github.com/Geal/nom) parser combinator framework and the
//! [cookie-factory](https://github.com/rust-bakery/cookie-factory) serialization library.
//!
//! # Design
//!
//! Values are represented by the [`DerValue`](der/enum.DerValue.html) sum type. There are two
//! ways of decoding them: reading the elements recursively as long as the tags are known, or
//! specifying a description of the expected elements (generally from the [ASN.1][X.680]
//! description).
//!
//! The first method is provided by [`parse`](fn.parse.html), [`parse_at`](fn.parse_at.html) and
//! [`parse_der`](der/fn.parse_der.html). Without the ASN.1 definition, constructed
//! context-specific elements are read as EXPLICIT tagging, and primitive ones are kept as raw
//! bytes (`DerValue::Direct`).
//!
//! ```rust
//! use der_codec::parse;
//!
//! let bytes = [ 0x30, 0x0a,
//!               0x02, 0x03, 0x01, 0x00, 0x01,
//!               0x02, 0x03, 0x01, 0x00, 0x00,
//! ];
//!
//! let value = parse(&bytes).expect("parsing failed");
//! assert_eq!(value[0].as_u64(), Ok(0x10001));
//! ```
//!
//! The second method uses the `parse_der_*` functions as building blocks, for example to read a
//! sequence containing two integers:
//!
//! ```rust
//! use der_codec::der::*;
//! use der_codec::error::DerResult;
//!
//! fn localparse_seq(i:&[u8]) -> DerResult<(u64, u64)> {
//!     parse_der_sequence_defined(|content| {
//!         let (content, a) = parse_der_u64(content)?;
//!         let (content, b) = parse_der_u64(content)?;
//!         Ok((content, (a, b)))
//!     })(i)
//! }
//!
//! let bytes = [ 0x30, 0x0a,
//!               0x02, 0x03, 0x01, 0x00, 0x01,
//!               0x02, 0x03, 0x01, 0x00, 0x00,
//! ];
//! let parsed = localparse_seq(&bytes);
//! ```
//!
//! Encoding always produces the canonical DER form:
//!
//! ```rust
//! use der_codec::der::DerValue;
//! use der_codec::encode;
//!
//! let value = DerValue::from_seq(vec![
//!     DerValue::from_oid_str("1.2.840.113549.1.1.1").expect("valid OID"),
//!     DerValue::Null,
//! ]);
//! let bytes = encode(&value).expect("encoding failed");
//! assert_eq!(&bytes[..4], &[0x30, 0x0d, 0x06, 0x09]);
//! ```
//!
//! # Notes
//!
//! - DER constraints (minimal lengths and integers, boolean values, bitstring padding, string
//!   alphabets, primitive/constructed encodings) are verified during decoding.
//! - DER integers can be of any size, so they are stored as raw bytes. To get a native value, use
//!   [`DerValue::as_u64`](der/enum.DerValue.html#method.as_u64) and similar methods, or the
//!   `bigint` feature of this crate and
//!   [`DerValue::as_bigint`](der/enum.DerValue.html#method.as_bigint).
//! - Errors are reported as [`DerError`](error/enum.DerError.html), grouped by
//!   [`ErrorCategory`](error/enum.ErrorCategory.html). Any error means the whole input must be
//!   discarded.
//!
//! # References
//!
//! - [[X.680]] Abstract Syntax Notation One (ASN.1): Specification of basic notation.
//! - [[X.690]] ASN.1 encoding rules: Specification of Basic Encoding Rules (BER), Canonical
//!   Encoding Rules (CER) and Distinguished Encoding Rules (DER).
//!
//! [X.680]: http://www.itu.int/rec/T-REC-X.680/en "Abstract Syntax Notation One (ASN.1):
//!   Specification of basic notation."
//! [X.690]: https://www.itu.int/rec/T-REC-X.690/en "ASN.1 encoding rules: Specification of
//!   Basic Encoding Rules (BER), Canonical Encoding Rules (CER) and Distinguished Encoding Rules
//!   (DER)."

#![deny(/*missing_docs,*/
        unsafe_code,
        unstable_features,
        unused_import_braces,
        unused_qualifications)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

pub mod der;
pub mod error;
pub mod oid;
pub mod oid_names;

use crate::der::{DerParser, DerValue};
use crate::error::DerError;

pub use crate::der::parse_der;

#[doc(hidden)]
pub use der_codec_oid_macro::encode_oid;

/// Decode the DER element at the start of `bytes`
///
/// Bytes following the element are ignored.
#[inline]
pub fn parse(bytes: &[u8]) -> Result<DerValue, DerError> {
    DerParser::default().parse(bytes)
}

/// Decode the DER element starting at `offset` in `bytes`
///
/// Bytes following the element are ignored.
#[inline]
pub fn parse_at(bytes: &[u8], offset: usize) -> Result<DerValue, DerError> {
    DerParser::default().parse_at(bytes, offset)
}

/// Encode a value as DER
#[inline]
pub fn encode(value: &DerValue) -> Result<Vec<u8>, DerError> {
    value.to_vec()
}
