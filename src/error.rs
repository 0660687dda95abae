use nom::{
    error::{ErrorKind, ParseError},
    ErrorConvert,
};

/// Errors raised while decoding or encoding EDID data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EdidError {
    /// A fixed header, tag or revision byte did not have the expected value.
    #[error("malformed {block} header: {reason}")]
    MalformedHeader {
        block: &'static str,
        reason: String,
    },
    /// The stored checksum byte does not balance the block.
    #[error("checksum mismatch: stored 0x{stored:02X}, computed 0x{computed:02X}")]
    ChecksumMismatch { stored: u8, computed: u8 },
    /// A display descriptor carried a type byte this crate does not know.
    #[error("unknown display descriptor type 0x{0:02X}")]
    UnknownDescriptorType(u8),
    /// A data block's declared length is impossible for its kind.
    #[error("invalid {block} length {length}")]
    InvalidDataBlockLength { block: &'static str, length: usize },
    /// A vendor specific block did not carry the expected IEEE OUI.
    #[error("unexpected OUI {0:02X?}")]
    InvalidOui([u8; 3]),
    /// A value does not fit the field it is encoded into.
    #[error("{field} out of range: {value}")]
    ValueOutOfRange { field: &'static str, value: i64 },
    /// Encoded content does not fit into a 128 byte block.
    #[error("encoded content needs {size} bytes, more than the block provides")]
    SizeOverflow { size: usize },
    /// The VIC is not part of the CTA-861 catalog.
    #[error("invalid VIC {0}")]
    InvalidVic(u8),
    /// The EDID is empty, not a multiple of 128 bytes, or disagrees with its extension count.
    #[error("EDID length {0} is not a valid multiple of 128 bytes")]
    TotalSizeNotBlockMultiple(usize),
    /// The input ended before a field could be read.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// A low level parser failed.
    #[error("parsing failed: {0:?}")]
    Parse(ErrorKind),
}

/// The type of codec results.
pub type Result<T> = core::result::Result<T, EdidError>;

/// Result of the nom parsers used throughout the crate.
pub(crate) type ParseResult<'a, T> = nom::IResult<&'a [u8], T, EdidError>;

impl EdidError {
    pub(crate) fn out_of_range(field: &'static str, value: impl Into<i64>) -> Self {
        EdidError::ValueOutOfRange {
            field,
            value: value.into(),
        }
    }

    pub(crate) fn length(block: &'static str, length: usize) -> Self {
        EdidError::InvalidDataBlockLength { block, length }
    }

    pub(crate) fn header(block: &'static str, reason: impl Into<String>) -> Self {
        EdidError::MalformedHeader {
            block,
            reason: reason.into(),
        }
    }
}

// Lets nom's byte and bit parsers report directly in terms of `EdidError`.
impl<I> ParseError<I> for EdidError {
    fn from_error_kind(_input: I, kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Eof | ErrorKind::Complete => EdidError::UnexpectedEnd,
            kind => EdidError::Parse(kind),
        }
    }

    fn append(_input: I, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl ErrorConvert<EdidError> for EdidError {
    fn convert(self) -> EdidError {
        self
    }
}

impl From<nom::Err<EdidError>> for EdidError {
    fn from(err: nom::Err<EdidError>) -> Self {
        match err {
            nom::Err::Incomplete(_) => EdidError::UnexpectedEnd,
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
        }
    }
}

/// Aborts the running nom parser with a domain error.
pub(crate) fn fail<T>(err: EdidError) -> core::result::Result<T, nom::Err<EdidError>> {
    Err(nom::Err::Failure(err))
}
