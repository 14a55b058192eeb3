//! Error type for DER encoding and decoding

use cookie_factory::GenError;
use nom::error::{ErrorKind, ParseError};
use nom::IResult;
use std::error::Error;
use std::fmt;

/// Holds the result of parsing functions
///
/// `O` is the output type, and defaults to a `DerValue`.
///
/// Note that this type is also a `Result`, so usual functions (`map`, `unwrap` etc.) are available.
pub type DerResult<'a, O = crate::der::DerValue<'a>> = IResult<&'a [u8], O, DerError>;

/// Broad classes of failure
///
/// Any failure means the buffer (or value) cannot be trusted and must be discarded as a whole.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input bytes do not form a valid (supported) DER encoding
    MalformedInput,
    /// A value or argument supplied by the caller is invalid
    InvalidArgument,
    /// The encoding is recognized but not implemented by this codec
    UnsupportedFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DerError {
    /// Input ended before the element was complete
    Truncated,
    /// Indefinite length form (BER only)
    IndefiniteLength,
    /// Length field uses more than 4 octets
    LengthTooLarge,
    /// Length does not fit a 31-bit signed value
    LengthOverflow,
    /// Identifier uses the high-tag-number form (tag >= 31)
    HighTagNumber,
    /// Application or private class
    InvalidClass,
    /// Element does not have the expected tag
    InvalidTag,
    /// Content length is invalid for this type
    InvalidLength,
    /// Primitive encoding expected
    ConstructUnexpected,
    /// Constructed encoding expected
    ConstructExpected,
    /// Encoding is valid BER but violates a DER rule
    DerConstraintFailed,
    /// String content does not match its character set
    StringInvalidCharset,
    /// Malformed object identifier content
    InvalidOid,
    /// A child element extends past the end of its parent
    ElementOverflow,
    /// Nesting deeper than the configured limit
    MaxDepth,
    /// Constructed content holds bytes after the expected elements
    TrailingData,

    /// Size is negative or above 2^31-1
    LengthOutOfRange,
    /// EXPLICIT tagging requires a constructed encoding
    ExplicitPrimitive,
    /// Malformed dotted OID string, or out-of-range arc
    InvalidOidString,
    /// Opaque bytes are not exactly one well-formed element
    InvalidOpaque,
    /// Value cannot be represented in DER
    InvalidValue,
    /// Value does not have the expected type
    TypeError,
    /// Integer is too large to fit in the requested native type
    IntegerTooLarge,
    /// Integer is negative, but an unsigned type was requested
    IntegerNegative,
    /// Output could not be generated
    SerializeFailed,

    /// Universal tag not handled by this codec
    UnsupportedTag(u32),
    /// Context-specific tag above 30
    TagOutOfRange(u32),
    /// Object identifier content longer than 127 octets
    OidTooLong,

    NomError(ErrorKind),
}

impl DerError {
    /// Category of the error
    pub fn category(&self) -> ErrorCategory {
        match self {
            DerError::Truncated
            | DerError::IndefiniteLength
            | DerError::LengthTooLarge
            | DerError::LengthOverflow
            | DerError::HighTagNumber
            | DerError::InvalidClass
            | DerError::InvalidTag
            | DerError::InvalidLength
            | DerError::ConstructUnexpected
            | DerError::ConstructExpected
            | DerError::DerConstraintFailed
            | DerError::StringInvalidCharset
            | DerError::InvalidOid
            | DerError::ElementOverflow
            | DerError::MaxDepth
            | DerError::TrailingData
            | DerError::NomError(_) => ErrorCategory::MalformedInput,
            DerError::LengthOutOfRange
            | DerError::ExplicitPrimitive
            | DerError::InvalidOidString
            | DerError::InvalidOpaque
            | DerError::InvalidValue
            | DerError::TypeError
            | DerError::IntegerTooLarge
            | DerError::IntegerNegative
            | DerError::SerializeFailed => ErrorCategory::InvalidArgument,
            DerError::UnsupportedTag(_) | DerError::TagOutOfRange(_) | DerError::OidTooLong => {
                ErrorCategory::UnsupportedFormat
            }
        }
    }
}

impl fmt::Display for DerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerError::Truncated => write!(f, "truncated input"),
            DerError::IndefiniteLength => write!(f, "indefinite length is not allowed in DER"),
            DerError::LengthTooLarge => write!(f, "length too large"),
            DerError::LengthOverflow => write!(f, "length exceeds 2^31-1"),
            DerError::HighTagNumber => write!(f, "high tag number form is not supported"),
            DerError::InvalidClass => write!(f, "unsupported identifier class"),
            DerError::InvalidTag => write!(f, "unexpected tag"),
            DerError::InvalidLength => write!(f, "invalid content length"),
            DerError::ConstructUnexpected => write!(f, "constructed encoding not allowed"),
            DerError::ConstructExpected => write!(f, "constructed encoding expected"),
            DerError::DerConstraintFailed => write!(f, "DER constraint failed"),
            DerError::StringInvalidCharset => write!(f, "invalid characters in string"),
            DerError::InvalidOid => write!(f, "invalid object identifier encoding"),
            DerError::ElementOverflow => write!(f, "element extends past its parent"),
            DerError::MaxDepth => write!(f, "maximum nesting depth exceeded"),
            DerError::TrailingData => write!(f, "trailing data inside constructed element"),
            DerError::LengthOutOfRange => write!(f, "length out of range"),
            DerError::ExplicitPrimitive => write!(f, "EXPLICIT tagging cannot be primitive"),
            DerError::InvalidOidString => write!(f, "invalid object identifier string"),
            DerError::InvalidOpaque => write!(f, "opaque bytes are not a single DER element"),
            DerError::InvalidValue => write!(f, "value has no DER encoding"),
            DerError::TypeError => write!(f, "value does not have the expected type"),
            DerError::IntegerTooLarge => write!(f, "integer too large"),
            DerError::IntegerNegative => write!(f, "integer is negative"),
            DerError::SerializeFailed => write!(f, "serialization failed"),
            DerError::UnsupportedTag(t) => write!(f, "unsupported universal tag {}", t),
            DerError::TagOutOfRange(t) => write!(f, "tag {} above 30 is not supported", t),
            DerError::OidTooLong => write!(f, "object identifier content too long"),
            DerError::NomError(e) => write!(f, "parser error: {:?}", e),
        }
    }
}

impl Error for DerError {}

impl<I> ParseError<I> for DerError {
    fn from_error_kind(_input: I, kind: ErrorKind) -> Self {
        DerError::NomError(kind)
    }
    fn append(_input: I, kind: ErrorKind, _other: Self) -> Self {
        DerError::NomError(kind)
    }
}

/// Flatten a nom error: `Incomplete` means the buffer is truncated
impl From<nom::Err<DerError>> for DerError {
    fn from(e: nom::Err<DerError>) -> Self {
        match e {
            nom::Err::Incomplete(_) => DerError::Truncated,
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
        }
    }
}

// Codes carried by `GenError::CustomError` from inside serializer closures
pub(crate) const GEN_INVALID_VALUE: u32 = 1;
pub(crate) const GEN_LENGTH_OUT_OF_RANGE: u32 = 2;
pub(crate) const GEN_OID_TOO_LONG: u32 = 3;

impl From<GenError> for DerError {
    fn from(e: GenError) -> Self {
        match e {
            GenError::CustomError(GEN_INVALID_VALUE) => DerError::InvalidValue,
            GenError::CustomError(GEN_LENGTH_OUT_OF_RANGE) | GenError::BufferTooBig(_) => {
                DerError::LengthOutOfRange
            }
            GenError::CustomError(GEN_OID_TOO_LONG) => DerError::OidTooLong,
            _ => DerError::SerializeFailed,
        }
    }
}
