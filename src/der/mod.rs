//! Distinguished Encoding Rules (DER) values, decoder and encoder
//!
//! Only the subset of DER used by X.509 and PKCS structures is handled: BOOLEAN, INTEGER, BIT
//! STRING, OCTET STRING, NULL, OBJECT IDENTIFIER, UTF8String, PrintableString, IA5String,
//! SEQUENCE, and context-specific tagging. Identifiers use the low-tag-number form, lengths are
//! definite and fit a 31-bit signed value.

mod class;
mod config;
#[allow(clippy::module_inception)]
mod der;
mod header;
mod integer;
pub(crate) mod length;
mod multi;
mod parser;
mod print;
mod serialize;
mod tagged;

pub use crate::der::class::*;
pub use crate::der::config::*;
pub use crate::der::der::*;
pub use crate::der::header::*;
pub use crate::der::length::{
    decode_length, encode_length, parse_der_length, parse_der_length_minimal, DecodedLength,
    Length, MAX_LENGTH, MAX_LENGTH_OCTETS,
};
pub use crate::der::multi::*;
pub use crate::der::parser::*;
pub use crate::der::print::*;
pub use crate::der::serialize::*;
pub use crate::der::tagged::*;
