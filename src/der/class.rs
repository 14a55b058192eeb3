use crate::error::DerError;
use core::convert::TryFrom;
use core::fmt;

/// Identifier octet class (bits 8-7)
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Class {
    Universal = 0b00,
    Application = 0b01,
    ContextSpecific = 0b10,
    Private = 0b11,
}

impl Class {
    /// Class bits, already shifted to their place in the identifier octet
    #[inline]
    pub const fn identifier_bits(self) -> u8 {
        (self as u8) << 6
    }

    /// Only universal and context-specific classes are handled by this codec
    #[inline]
    pub fn is_supported(self) -> bool {
        matches!(self, Class::Universal | Class::ContextSpecific)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Class::Universal => "UNIVERSAL",
            Class::Application => "APPLICATION",
            Class::ContextSpecific => "CONTEXT-SPECIFIC",
            Class::Private => "PRIVATE",
        };
        write!(f, "{}", s)
    }
}

impl TryFrom<u8> for Class {
    type Error = DerError;

    #[inline]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0b00 => Ok(Class::Universal),
            0b01 => Ok(Class::Application),
            0b10 => Ok(Class::ContextSpecific),
            0b11 => Ok(Class::Private),
            _ => Err(DerError::InvalidClass),
        }
    }
}
