use nom::number::complete::le_u8;

use crate::{
    bits::check_range,
    error::{EdidError, ParseResult, Result},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Image aspect ratio of a standard timing, the two most significant bits of its second byte.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AspectRatio {
    Ratio16x10,
    Ratio4x3,
    Ratio5x4,
    Ratio16x9,
}

impl AspectRatio {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => AspectRatio::Ratio16x10,
            0b01 => AspectRatio::Ratio4x3,
            0b10 => AspectRatio::Ratio5x4,
            _ => AspectRatio::Ratio16x9,
        }
    }

    fn bits(self) -> u8 {
        match self {
            AspectRatio::Ratio16x10 => 0b00,
            AspectRatio::Ratio4x3 => 0b01,
            AspectRatio::Ratio5x4 => 0b10,
            AspectRatio::Ratio16x9 => 0b11,
        }
    }

    /// (width, height) parts of the ratio.
    pub fn parts(self) -> (u16, u16) {
        match self {
            AspectRatio::Ratio16x10 => (16, 10),
            AspectRatio::Ratio4x3 => (4, 3),
            AspectRatio::Ratio5x4 => (5, 4),
            AspectRatio::Ratio16x9 => (16, 9),
        }
    }
}

/// A two byte standard timing identifier.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StandardTiming {
    pub x_resolution: u16,
    pub aspect_ratio: AspectRatio,
    /// Field refresh rate in Hz.
    pub v_frequency: u8,
}

const UNUSED: [u8; 2] = [0x01, 0x01];

impl StandardTiming {
    /// Decodes a byte pair, `01 01` being an unused slot.
    pub fn decode(b1: u8, b2: u8) -> Option<Self> {
        if [b1, b2] == UNUSED {
            return None;
        }
        Some(StandardTiming {
            x_resolution: (u16::from(b1) + 31) * 8,
            aspect_ratio: AspectRatio::from_bits(b2 >> 6),
            v_frequency: (b2 & 0x3F) + 60,
        })
    }

    /// Encodes a slot, `None` giving the unused marker.
    pub fn encode(timing: Option<&Self>) -> Result<[u8; 2]> {
        let Some(timing) = timing else {
            return Ok(UNUSED);
        };
        check_range("x_resolution", timing.x_resolution, 248..=2288)?;
        if timing.x_resolution % 8 != 0 {
            return Err(EdidError::out_of_range("x_resolution", timing.x_resolution));
        }
        check_range("v_frequency", timing.v_frequency, 60..=123)?;

        let bytes = [
            (timing.x_resolution / 8 - 31) as u8,
            (timing.aspect_ratio.bits() << 6) | (timing.v_frequency - 60),
        ];
        // 256x160@61 has no encoding of its own.
        if bytes == UNUSED {
            return Err(EdidError::out_of_range("x_resolution", timing.x_resolution));
        }
        Ok(bytes)
    }

    pub fn y_resolution(&self) -> u16 {
        let (w, h) = self.aspect_ratio.parts();
        (u32::from(self.x_resolution) * u32::from(h) / u32::from(w)) as u16
    }
}

pub(crate) fn parse_standard_timing(input: &[u8]) -> ParseResult<'_, Option<StandardTiming>> {
    let (remaining, b1) = le_u8(input)?;
    let (remaining, b2) = le_u8(remaining)?;
    Ok((remaining, StandardTiming::decode(b1, b2)))
}
