use crate::der::{parse_der_recursive, DerValue, MAX_RECURSION};
use crate::error::{DerError, DerResult};

/// How the children of a constructed element are bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// Children are decoded inside the declared content only, and must fill it
    Strict,
    /// Children are decoded against the rest of the buffer, until the declared end is reached or
    /// passed. Trailing bytes inside EXPLICIT tagged content are ignored.
    Permissive,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::Strict
    }
}

/// Runtime options of the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting level of constructed elements
    pub max_depth: usize,
    pub bounds: Bounds,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: MAX_RECURSION,
            bounds: Bounds::Strict,
        }
    }
}

impl ParserConfig {
    #[inline]
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        ParserConfig { max_depth, ..self }
    }

    #[inline]
    pub fn with_bounds(self, bounds: Bounds) -> Self {
        ParserConfig { bounds, ..self }
    }
}

/// DER decoder bound to a configuration
///
/// ```rust
/// use der_codec::der::{Bounds, DerParser, ParserConfig};
///
/// let parser = DerParser::new(ParserConfig::default().with_bounds(Bounds::Permissive));
/// // the last child overflows the declared sequence length by one byte
/// let bytes = [0x30, 0x04, 0x02, 0x01, 0x01, 0x05, 0x00];
/// let seq = parser.parse(&bytes).expect("lenient parsing");
/// assert_eq!(seq.as_sequence().map(|v| v.len()), Ok(2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerParser {
    config: ParserConfig,
}

impl DerParser {
    pub fn new(config: ParserConfig) -> Self {
        DerParser { config }
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one element, returning the remaining input
    pub fn parse_der<'a>(&self, i: &'a [u8]) -> DerResult<'a> {
        parse_der_recursive(i, 0, &self.config)
    }

    /// Parse the element starting at `offset`, ignoring the bytes after it
    pub fn parse_at<'a>(&self, bytes: &'a [u8], offset: usize) -> Result<DerValue<'a>, DerError> {
        let i = bytes.get(offset..).ok_or(DerError::Truncated)?;
        let (_, value) = self.parse_der(i)?;
        Ok(value)
    }

    /// Parse the element at the start of `bytes`, ignoring the bytes after it
    #[inline]
    pub fn parse<'a>(&self, bytes: &'a [u8]) -> Result<DerValue<'a>, DerError> {
        self.parse_at(bytes, 0)
    }
}
