use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    bits::array,
    error::{EdidError, ParseResult, Result},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the three text descriptors an [`AsciiString`] is.
#[derive(Debug, PartialEq, Eq, Copy, Clone, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum AsciiStringKind {
    ProductName = 0xFC,
    AlphanumericData = 0xFE,
    SerialNumber = 0xFF,
}

/// Up to 13 characters of text, terminated on the wire by a line feed.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AsciiString {
    pub kind: AsciiStringKind,
    pub text: String,
}

pub const MAX_TEXT_LEN: usize = 13;

pub(crate) fn parse_text(input: &[u8]) -> ParseResult<'_, String> {
    let (remaining, raw) = array::<MAX_TEXT_LEN>(input)?;
    let text = raw
        .iter()
        .take_while(|b| **b != b'\n')
        .map(|b| char::from(*b))
        .collect();
    Ok((remaining, text))
}

pub(crate) fn encode_text(text: &str) -> Result<[u8; MAX_TEXT_LEN]> {
    let count = text.chars().count();
    if count > MAX_TEXT_LEN {
        return Err(EdidError::out_of_range("ascii string length", count as i64));
    }

    let mut out = [b' '; MAX_TEXT_LEN];
    for (slot, c) in out.iter_mut().zip(text.chars()) {
        *slot = match u8::try_from(c) {
            Ok(b'\n') | Err(_) => return Err(EdidError::out_of_range("ascii character", u32::from(c))),
            Ok(b) => b,
        };
    }
    if count < MAX_TEXT_LEN {
        out[count] = b'\n';
    }
    Ok(out)
}
